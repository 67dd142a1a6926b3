//! FILENAME: core/grid-engine/src/lib.rs
//! Data Grid subsystem for Calcula.
//!
//! This crate turns a flat record collection plus the user's sort, filter
//! and group choices into the exact ordered rows a data grid displays,
//! including group headers with expand/collapse state. It depends on
//! `engine` only for shared types (CellValue, Record).
//!
//! Layers:
//! - `definition`: Column schema and serializable view state (what the grid IS)
//! - `accessor`, `filter`, `sort`, `grouping`: Pipeline stages (HOW we compute)
//! - `view`: Row descriptors for the renderer (WHAT we display)
//! - `engine`: Stage composition (filter -> sort -> group)
//! - `state`: Transitions applied by user intents between runs

pub mod accessor;
pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod sort;
pub mod state;
pub mod view;

pub use accessor::{format_cell, format_value, resolve_value, resolve_value_strict};
pub use definition::*;
pub use crate::engine::{calculate_grid_view, run_pipeline};
pub use error::GridError;
pub use filter::filter_records;
pub use grouping::{group_paths, group_records, GroupBucket, GroupNode};
pub use sort::sort_records;
pub use state::GridState;
pub use view::{GridRow, GridView, GroupRow};
