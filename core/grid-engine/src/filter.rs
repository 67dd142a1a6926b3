//! FILENAME: core/grid-engine/src/filter.rs
//! Filter Engine - keeps the records that satisfy every active column filter.
//!
//! Active filters are resolved against the column set once per run; entries
//! for unknown columns and falsy values are dropped at that point so the
//! per-record check is a plain conjunction.

use engine::{CellValue, Record};
use smallvec::SmallVec;

use crate::accessor::resolve_value;
use crate::definition::{find_column, ColumnDefinition, FilterKind, FilterState};

/// A column filter prepared for matching.
enum Predicate<'s> {
    /// Lowercased needle for substring matching.
    Text(String),
    /// `None` when the filter value itself is not a finite number,
    /// in which case nothing matches.
    Number(Option<f64>),
    Select(&'s CellValue),
}

impl<'s> Predicate<'s> {
    fn new(kind: FilterKind, value: &'s CellValue) -> Self {
        match kind {
            FilterKind::Number => Predicate::Number(value.to_number()),
            FilterKind::Select => Predicate::Select(value),
            FilterKind::Text | FilterKind::Date => {
                Predicate::Text(value.display_value().to_lowercase())
            }
        }
    }

    fn matches(&self, cell: &CellValue) -> bool {
        match self {
            Predicate::Text(needle) => cell.display_value().to_lowercase().contains(needle.as_str()),
            Predicate::Number(wanted) => match (cell.to_number(), wanted) {
                (Some(n), Some(w)) => n == *w,
                _ => false,
            },
            Predicate::Select(wanted) => cell == *wanted,
        }
    }
}

/// Returns the records matching every active filter, in input order.
pub fn filter_records<'a, R, I>(
    records: I,
    filters: &FilterState,
    columns: &[ColumnDefinition<R>],
) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut active: SmallVec<[(&ColumnDefinition<R>, Predicate<'_>); 4]> = SmallVec::new();
    for (key, value) in filters.active() {
        match find_column(columns, key) {
            Some(column) => active.push((column, Predicate::new(column.filter_kind, value))),
            None => log::trace!("ignoring filter on unknown column '{}'", key),
        }
    }

    if active.is_empty() {
        return records.into_iter().collect();
    }

    records
        .into_iter()
        .filter(|record| {
            active
                .iter()
                .all(|(column, predicate)| predicate.matches(&resolve_value(*record, column)))
        })
        .collect()
}
