//! FILENAME: core/grid-engine/src/sort.rs
//! Sort Engine - orders records by one column's raw values.

use engine::{CellValue, Record};

use crate::accessor::resolve_value;
use crate::definition::{find_column, ColumnDefinition, SortDirection, SortState};

/// Returns the records ordered by the sort column.
///
/// An inactive sort or an unknown column returns the input order unchanged.
/// The sort is stable: records with equal keys keep their relative order in
/// both directions.
pub fn sort_records<'a, R: Record>(
    records: &[&'a R],
    sort: &SortState,
    columns: &[ColumnDefinition<R>],
) -> Vec<&'a R> {
    if !sort.is_active() {
        return records.to_vec();
    }

    let column = match find_column(columns, &sort.column_key) {
        Some(c) => c,
        None => {
            log::trace!("ignoring sort on unknown column '{}'", sort.column_key);
            return records.to_vec();
        }
    };

    // Resolve each key once; derive accessors may be costly
    let mut keyed: Vec<(CellValue, &'a R)> = records
        .iter()
        .map(|&record| (resolve_value(record, column), record))
        .collect();

    let descending = sort.direction == SortDirection::Descending;
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare(b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}
