//! FILENAME: core/grid-engine/src/accessor.rs
//! Accessor Resolver - pulls a cell's raw value out of a record.

use engine::{CellValue, Record};

use crate::definition::{Accessor, ColumnDefinition, FormatterFn};
use crate::error::GridError;

/// Returns the raw value of `column` for `record`.
/// Absent fields resolve to `CellValue::Empty`.
pub fn resolve_value<R: Record>(record: &R, column: &ColumnDefinition<R>) -> CellValue {
    match &column.accessor {
        Accessor::Derive(f) => f(record),
        Accessor::Field(name) => record.field(name).unwrap_or(CellValue::Empty),
    }
}

/// Like `resolve_value`, but a field accessor on a record without that field
/// is an error.
pub fn resolve_value_strict<R: Record>(
    record: &R,
    column: &ColumnDefinition<R>,
) -> Result<CellValue, GridError> {
    match &column.accessor {
        Accessor::Derive(f) => Ok(f(record)),
        Accessor::Field(name) => record.field(name).ok_or_else(|| GridError::MissingField {
            column: column.key.clone(),
            field: name.clone(),
        }),
    }
}

/// Display string for a value: the formatter's output if there is one,
/// otherwise the plain stringification (empty for absent values).
pub fn format_value(value: &CellValue, formatter: Option<&FormatterFn>) -> String {
    match formatter {
        Some(f) => f(value),
        None => value.display_value(),
    }
}

/// Display string for one cell of a data row.
pub fn format_cell<R: Record>(record: &R, column: &ColumnDefinition<R>) -> String {
    let value = resolve_value(record, column);
    format_value(&value, column.formatter.as_ref())
}
