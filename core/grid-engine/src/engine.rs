//! FILENAME: core/grid-engine/src/engine.rs
//! Grid Engine - composes the pipeline stages into a renderable view.
//!
//! Fixed stage order:
//! 1. Filter (if enabled)
//! 2. Sort (if enabled)
//! 3. Group and flatten (if enabled, else one data row per record)
//!
//! Every call recomputes from the full input. Nothing is cached between
//! calls; hosts that want memoization key it on their own inputs.

use engine::Record;

use crate::definition::{ColumnDefinition, FilterState, GridOptions, GroupState, SortState};
use crate::filter::filter_records;
use crate::grouping::group_records;
use crate::sort::sort_records;
use crate::state::GridState;
use crate::view::{GridRow, GridView};

/// Runs the pipeline on explicit state pieces and returns the rows in
/// display order.
pub fn run_pipeline<'a, R: Record>(
    records: &'a [R],
    columns: &[ColumnDefinition<R>],
    sort: &SortState,
    filters: &FilterState,
    groups: &GroupState,
    options: &GridOptions,
) -> Vec<GridRow<'a, R>> {
    calculate(records, columns, sort, filters, groups, options).rows
}

/// Calculates the grid view for the current state.
/// This is the main entry point for renderers.
pub fn calculate_grid_view<'a, R: Record>(
    records: &'a [R],
    columns: &[ColumnDefinition<R>],
    state: &GridState,
    options: &GridOptions,
) -> GridView<'a, R> {
    calculate(
        records,
        columns,
        &state.sort,
        &state.filters,
        &state.groups,
        options,
    )
}

fn calculate<'a, R: Record>(
    records: &'a [R],
    columns: &[ColumnDefinition<R>],
    sort: &SortState,
    filters: &FilterState,
    groups: &GroupState,
    options: &GridOptions,
) -> GridView<'a, R> {
    // Step 1: Filter
    let filtered: Vec<&'a R> = if options.enable_filtering {
        filter_records(records, filters, columns)
    } else {
        records.iter().collect()
    };
    let filtered_count = filtered.len();

    // Step 2: Sort
    let sorted = if options.enable_sorting {
        sort_records(&filtered, sort, columns)
    } else {
        filtered
    };

    // Step 3: Group
    let rows = if options.enable_grouping {
        group_records(sorted, &groups.group_by, columns, &groups.expanded_paths)
    } else {
        sorted.into_iter().map(GridRow::data).collect()
    };

    log::debug!(
        "grid pipeline: {} records, {} after filter, {} rows (group by {:?})",
        records.len(),
        filtered_count,
        rows.len(),
        groups.group_by
    );

    GridView {
        rows,
        record_count: records.len(),
        filtered_count,
    }
}
