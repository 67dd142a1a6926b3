//! FILENAME: core/grid-engine/src/definition.rs
//! Grid Definition - The column schema and the user-chosen view state.
//!
//! This module contains all the types needed to DESCRIBE a grid view.
//! The state structures are designed to be:
//! - Serializable (for sending across a host bridge or persisting layouts)
//! - Immutable snapshots of user intent, passed by value into each run
//!
//! Column definitions are not serializable: accessors and formatters may be
//! closures supplied by the host.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use engine::CellValue;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GridError;

/// Width used by renderers when a column does not set one.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

/// Separator between stringified group values in a group path.
/// Group values containing it are not escaped, so such paths can collide.
pub const GROUP_PATH_SEPARATOR: &str = "/";

/// Computes a cell value from a whole record.
pub type DeriveFn<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Turns a raw cell value into its display string.
pub type FormatterFn = Arc<dyn Fn(&CellValue) -> String + Send + Sync>;

// ============================================================================
// ACCESSOR
// ============================================================================

/// How a column pulls its raw value out of a record.
pub enum Accessor<R> {
    /// Look the value up by field name.
    Field(String),
    /// Derive the value from the record.
    Derive(DeriveFn<R>),
}

impl<R> Accessor<R> {
    pub fn field(name: impl Into<String>) -> Self {
        Accessor::Field(name.into())
    }

    pub fn derive<F>(f: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Accessor::Derive(Arc::new(f))
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(name) => Accessor::Field(name.clone()),
            Accessor::Derive(f) => Accessor::Derive(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Derive(_) => f.write_str("Derive(<fn>)"),
        }
    }
}

// ============================================================================
// COLUMN DEFINITION
// ============================================================================

/// Which predicate the filter engine applies for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// Case-insensitive substring match.
    Text,
    /// Numeric equality after coercion.
    Number,
    /// Dates are matched as text.
    Date,
    /// Exact equality on raw values.
    Select,
}

impl Default for FilterKind {
    fn default() -> Self {
        FilterKind::Text
    }
}

/// Unrecognized kind names match as text.
impl<'de> Deserialize<'de> for FilterKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(match name.as_str() {
            "number" => FilterKind::Number,
            "date" => FilterKind::Date,
            "select" => FilterKind::Select,
            _ => FilterKind::Text,
        })
    }
}

/// One entry of a select filter's dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: CellValue,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<CellValue>) -> Self {
        SelectOption {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Schema entry describing how to extract, display, sort, filter and group
/// one field of the records.
pub struct ColumnDefinition<R> {
    /// Unique id within a column set.
    pub key: String,

    /// Header title (defaults to the key).
    pub header: String,

    pub accessor: Accessor<R>,

    /// Rendered width in pixels; `None` means `DEFAULT_COLUMN_WIDTH`.
    pub width: Option<u32>,

    pub sortable: bool,

    pub filterable: bool,

    pub filter_kind: FilterKind,

    /// Dropdown entries, in display order (select kind only).
    pub select_options: Vec<SelectOption>,

    pub groupable: bool,

    pub formatter: Option<FormatterFn>,
}

impl<R> ColumnDefinition<R> {
    pub fn new(key: impl Into<String>, accessor: Accessor<R>) -> Self {
        let key = key.into();
        ColumnDefinition {
            header: key.clone(),
            key,
            accessor,
            width: None,
            sortable: true,
            filterable: false,
            filter_kind: FilterKind::Text,
            select_options: Vec::new(),
            groupable: true,
            formatter: None,
        }
    }

    /// A column reading the record field of the same name as its key.
    pub fn field(key: impl Into<String>) -> Self {
        let key = key.into();
        let accessor = Accessor::Field(key.clone());
        Self::new(key, accessor)
    }

    /// A column whose value is computed from the whole record.
    pub fn derived<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Self::new(key, Accessor::derive(f))
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Marks the column filterable with the given predicate kind.
    pub fn filterable(mut self, kind: FilterKind) -> Self {
        self.filterable = true;
        self.filter_kind = kind;
        self
    }

    pub fn groupable(mut self, groupable: bool) -> Self {
        self.groupable = groupable;
        self
    }

    /// Makes the column a select filter over `options`.
    pub fn with_select_options(mut self, options: Vec<SelectOption>) -> Self {
        self.filterable = true;
        self.filter_kind = FilterKind::Select;
        self.select_options = options;
        self
    }

    pub fn with_formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(f));
        self
    }

    pub fn display_width(&self) -> u32 {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
    }
}

impl<R> Clone for ColumnDefinition<R> {
    fn clone(&self) -> Self {
        ColumnDefinition {
            key: self.key.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            width: self.width,
            sortable: self.sortable,
            filterable: self.filterable,
            filter_kind: self.filter_kind,
            select_options: self.select_options.clone(),
            groupable: self.groupable,
            formatter: self.formatter.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnDefinition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDefinition")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("filter_kind", &self.filter_kind)
            .field("select_options", &self.select_options)
            .field("groupable", &self.groupable)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Finds the column with the given key.
pub fn find_column<'c, R>(
    columns: &'c [ColumnDefinition<R>],
    key: &str,
) -> Option<&'c ColumnDefinition<R>> {
    columns.iter().find(|c| c.key == key)
}

/// Checks that every column key is unique.
pub fn validate_columns<R>(columns: &[ColumnDefinition<R>]) -> Result<(), GridError> {
    let mut seen = FxHashSet::default();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            log::warn!("duplicate column key '{}' in grid definition", column.key);
            return Err(GridError::DuplicateColumnKey(column.key.clone()));
        }
    }
    Ok(())
}

// ============================================================================
// SORT STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Ascending,
    Descending,
    None,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::None
    }
}

/// The single active sort column, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortState {
    /// Empty means no sort column.
    pub column_key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column_key: impl Into<String>, direction: SortDirection) -> Self {
        SortState {
            column_key: column_key.into(),
            direction,
        }
    }

    pub fn ascending(column_key: impl Into<String>) -> Self {
        Self::new(column_key, SortDirection::Ascending)
    }

    pub fn descending(column_key: impl Into<String>) -> Self {
        Self::new(column_key, SortDirection::Descending)
    }

    /// True when a column is set and the direction is not `None`.
    pub fn is_active(&self) -> bool {
        !self.column_key.is_empty() && self.direction != SortDirection::None
    }

    /// The state after clicking `column_key`'s header.
    ///
    /// The same column cycles ascending -> descending -> unsorted; any other
    /// column starts over at ascending.
    pub fn toggled(&self, column_key: &str) -> SortState {
        if self.column_key == column_key {
            match self.direction {
                SortDirection::None => SortState::ascending(column_key),
                SortDirection::Ascending => SortState::descending(column_key),
                SortDirection::Descending => SortState::default(),
            }
        } else {
            SortState::ascending(column_key)
        }
    }
}

// ============================================================================
// FILTER STATE
// ============================================================================

/// Per-column filter values keyed by column key.
///
/// A falsy value (empty, "", 0, false) places no constraint on its column.
/// `set` drops such values; states built from raw entries may still carry
/// them and the filter engine skips them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<String, CellValue>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column_key: &str) -> Option<&CellValue> {
        self.values.get(column_key)
    }

    /// Sets a column's filter value; a falsy value removes the constraint.
    pub fn set(&mut self, column_key: impl Into<String>, value: impl Into<CellValue>) {
        let column_key = column_key.into();
        let value = value.into();
        if value.is_falsy() {
            self.values.remove(&column_key);
        } else {
            self.values.insert(column_key, value);
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when the column carries a non-falsy filter value.
    pub fn is_active(&self, column_key: &str) -> bool {
        self.values.get(column_key).map_or(false, |v| !v.is_falsy())
    }

    /// Entries that constrain their column.
    pub fn active(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_falsy())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for FilterState {
    /// Keeps every entry as given, falsy ones included.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FilterState {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// GROUP STATE
// ============================================================================

/// The group-by columns (outer to inner) and which group paths are open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupState {
    pub group_by: Vec<String>,
    pub expanded_paths: FxHashSet<String>,
}

impl GroupState {
    pub fn new(group_by: Vec<String>) -> Self {
        GroupState {
            group_by,
            expanded_paths: FxHashSet::default(),
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded_paths.contains(path)
    }

    /// Replaces the group-by list and clears every expanded path.
    pub fn set_group_by(&mut self, group_by: Vec<String>) {
        self.group_by = group_by;
        self.expanded_paths.clear();
    }

    /// Opens a closed path or closes an open one. Descendant paths keep their
    /// own membership.
    pub fn toggle(&mut self, path: &str) {
        if !self.expanded_paths.remove(path) {
            self.expanded_paths.insert(path.to_string());
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Feature flags for the pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    pub enable_filtering: bool,
    pub enable_sorting: bool,
    pub enable_grouping: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            enable_filtering: true,
            enable_sorting: true,
            enable_grouping: true,
        }
    }
}

impl GridOptions {
    /// Parses options from JSON; missing flags default to enabled.
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        Ok(serde_json::from_str(json)?)
    }
}
