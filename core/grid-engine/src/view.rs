//! FILENAME: core/grid-engine/src/view.rs
//! Grid View - Renderable output for the frontend.
//!
//! The pipeline produces a flat list of row descriptors in literal display
//! order. Group headers carry everything a renderer needs for indentation,
//! the expand chevron and the "(n)" count; data rows borrow the record.

use serde::Serialize;

/// A synthetic header row for one node of the grouping tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRow {
    /// Stringified group values from the root, joined with `/`.
    pub path: String,

    /// The stringified group value of this node.
    pub display_value: String,

    /// Key of the column this level groups by.
    pub column_key: String,

    /// Depth in the grouping tree (0 = outermost).
    pub nesting_level: usize,

    /// Number of records under this node, at any depth.
    pub child_record_count: usize,

    pub is_expanded: bool,
}

/// One element of the pipeline output.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridRow<'a, R> {
    Group(GroupRow),
    Data { record: &'a R },
}

impl<R> Clone for GridRow<'_, R> {
    fn clone(&self) -> Self {
        match self {
            GridRow::Group(group) => GridRow::Group(group.clone()),
            GridRow::Data { record } => GridRow::Data { record: *record },
        }
    }
}

impl<'a, R> GridRow<'a, R> {
    pub fn data(record: &'a R) -> Self {
        GridRow::Data { record }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, GridRow::Group(_))
    }

    pub fn as_group(&self) -> Option<&GroupRow> {
        match self {
            GridRow::Group(group) => Some(group),
            GridRow::Data { .. } => None,
        }
    }

    pub fn record(&self) -> Option<&'a R> {
        match self {
            GridRow::Group(_) => None,
            GridRow::Data { record } => Some(*record),
        }
    }
}

/// The full output of one pipeline run.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView<'a, R> {
    /// Rows in display order.
    pub rows: Vec<GridRow<'a, R>>,

    /// Records passed into the pipeline.
    pub record_count: usize,

    /// Records left after filtering.
    pub filtered_count: usize,
}

impl<'a, R> GridView<'a, R> {
    /// True when there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn group_rows(&self) -> Vec<&GroupRow> {
        self.rows.iter().filter_map(GridRow::as_group).collect()
    }

    /// Records of the visible data rows, in display order.
    pub fn records(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.rows.iter().filter_map(GridRow::record)
    }
}
