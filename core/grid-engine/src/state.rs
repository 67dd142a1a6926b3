//! FILENAME: core/grid-engine/src/state.rs
//! Grid State - the view state a host keeps between pipeline runs, and the
//! transitions that user intents apply to it.
//!
//! Intents: sort-by(column), set-filter(column, value),
//! set-group-by(columns), toggle-group(path). The grouping panel's add,
//! remove and reorder actions are all group-by changes.

use engine::CellValue;
use serde::{Deserialize, Serialize};

use crate::definition::{
    find_column, ColumnDefinition, FilterState, GridOptions, GroupState, SortDirection, SortState,
};
use crate::error::GridError;

/// Sort, filter and group state for one grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridState {
    pub sort: SortState,
    pub filters: FilterState,
    pub groups: GroupState,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an initial sort already applied.
    pub fn with_default_sort(sort: SortState) -> Self {
        GridState {
            sort,
            ..Self::default()
        }
    }

    /// Parses a state snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GridError> {
        Ok(serde_json::to_string(self)?)
    }

    // ========================================================================
    // SORTING
    // ========================================================================

    /// Header click on `column_key`. Ignored when sorting is disabled or the
    /// column is marked unsortable.
    pub fn toggle_sort<R>(
        &mut self,
        column_key: &str,
        columns: &[ColumnDefinition<R>],
        options: &GridOptions,
    ) {
        if !options.enable_sorting {
            return;
        }
        if let Some(column) = find_column(columns, column_key) {
            if !column.sortable {
                return;
            }
        }
        self.sort = self.sort.toggled(column_key);
    }

    /// Direction indicator for a column header.
    pub fn sort_direction_for(&self, column_key: &str) -> SortDirection {
        if self.sort.column_key == column_key {
            self.sort.direction
        } else {
            SortDirection::None
        }
    }

    // ========================================================================
    // FILTERING
    // ========================================================================

    /// Sets a column filter; a falsy value removes it. Ignored when filtering
    /// is disabled.
    pub fn set_filter(
        &mut self,
        column_key: &str,
        value: impl Into<CellValue>,
        options: &GridOptions,
    ) {
        if !options.enable_filtering {
            return;
        }
        self.filters.set(column_key, value);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn is_filtered(&self, column_key: &str) -> bool {
        self.filters.is_active(column_key)
    }

    // ========================================================================
    // GROUPING
    // ========================================================================

    /// Replaces the group-by list and clears every expanded path.
    pub fn set_group_by(&mut self, group_by: Vec<String>) {
        self.groups.set_group_by(group_by);
    }

    /// Like `set_group_by`, but rejects keys with no matching column.
    pub fn try_set_group_by<R>(
        &mut self,
        group_by: Vec<String>,
        columns: &[ColumnDefinition<R>],
    ) -> Result<(), GridError> {
        if let Some(unknown) = group_by.iter().find(|k| find_column(columns, k).is_none()) {
            return Err(GridError::UnknownColumn(unknown.clone()));
        }
        self.set_group_by(group_by);
        Ok(())
    }

    /// Appends a column as the innermost group level. Ignored for unknown or
    /// non-groupable columns and columns already grouped.
    pub fn add_group_by<R>(&mut self, column_key: &str, columns: &[ColumnDefinition<R>]) {
        let groupable = find_column(columns, column_key).map_or(false, |c| c.groupable);
        if !groupable || self.groups.group_by.iter().any(|k| k == column_key) {
            return;
        }
        let mut group_by = self.groups.group_by.clone();
        group_by.push(column_key.to_string());
        self.set_group_by(group_by);
    }

    pub fn remove_group_by(&mut self, column_key: &str) {
        if !self.groups.group_by.iter().any(|k| k == column_key) {
            return;
        }
        let group_by = self
            .groups
            .group_by
            .iter()
            .filter(|k| k.as_str() != column_key)
            .cloned()
            .collect();
        self.set_group_by(group_by);
    }

    /// Moves the group level at `from` to position `to`.
    /// Out-of-range indices leave the state untouched.
    pub fn move_group_by(&mut self, from: usize, to: usize) {
        let len = self.groups.group_by.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let mut group_by = self.groups.group_by.clone();
        let moved = group_by.remove(from);
        group_by.insert(to, moved);
        self.set_group_by(group_by);
    }

    /// Groupable columns not yet in the group-by list, in column order.
    pub fn available_group_columns<'c, R>(
        &self,
        columns: &'c [ColumnDefinition<R>],
    ) -> Vec<&'c ColumnDefinition<R>> {
        columns
            .iter()
            .filter(|c| c.groupable && !self.groups.group_by.contains(&c.key))
            .collect()
    }

    /// Expands a collapsed group or collapses an expanded one.
    pub fn toggle_group(&mut self, path: &str) {
        self.groups.toggle(path);
    }

    /// Marks every given path expanded (see `grouping::group_paths`).
    pub fn expand_all<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.groups.expanded_paths.extend(paths);
    }

    pub fn collapse_all(&mut self) {
        self.groups.expanded_paths.clear();
    }
}
