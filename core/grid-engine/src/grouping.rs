//! FILENAME: core/grid-engine/src/grouping.rs
//! Grouping Engine - multi-level partitioning and display flattening.
//!
//! Algorithm:
//! 1. Partition: bucket the records by the stringified value of the first
//!    group-by column (first-seen key order, input order inside a bucket),
//!    then recurse into every bucket with the next column.
//! 2. Flatten: walk the tree depth-first, emitting a group row per branch
//!    node and descending only into expanded paths; leaves emit one data row
//!    per record.
//!
//! A group-by key with no matching column skips its level: the records pass
//! through unchanged to the next level.

use engine::Record;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::accessor::resolve_value;
use crate::definition::{find_column, ColumnDefinition, GROUP_PATH_SEPARATOR};
use crate::view::{GridRow, GroupRow};

// ============================================================================
// PARTITION TREE
// ============================================================================

/// A node of the partition tree.
#[derive(Debug)]
pub enum GroupNode<'a, R> {
    /// Terminal records, in input order.
    Leaf(Vec<&'a R>),
    /// Buckets for one group-by column, in first-seen order.
    Branch {
        column_key: String,
        buckets: Vec<GroupBucket<'a, R>>,
    },
}

/// One distinct stringified value at a tree level and everything under it.
#[derive(Debug)]
pub struct GroupBucket<'a, R> {
    pub key: String,
    pub node: GroupNode<'a, R>,
}

impl<'a, R> GroupNode<'a, R> {
    /// Total records under this node, at any depth.
    pub fn record_count(&self) -> usize {
        match self {
            GroupNode::Leaf(records) => records.len(),
            GroupNode::Branch { buckets, .. } => {
                buckets.iter().map(|b| b.node.record_count()).sum()
            }
        }
    }
}

/// Builds the partition tree for `group_by` over `records`.
pub fn partition<'a, R: Record>(
    records: Vec<&'a R>,
    group_by: &[String],
    columns: &[ColumnDefinition<R>],
) -> GroupNode<'a, R> {
    partition_level(records, group_by, columns, 0)
}

fn partition_level<'a, R: Record>(
    records: Vec<&'a R>,
    group_by: &[String],
    columns: &[ColumnDefinition<R>],
    depth: usize,
) -> GroupNode<'a, R> {
    let column_key = match group_by.get(depth) {
        Some(key) => key,
        None => return GroupNode::Leaf(records),
    };

    let column = match find_column(columns, column_key) {
        Some(c) => c,
        None => {
            log::trace!("skipping group level {} on unknown column '{}'", depth, column_key);
            return partition_level(records, group_by, columns, depth + 1);
        }
    };

    // Order-preserving buckets: the map only indexes into the Vec
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut grouped: Vec<(String, Vec<&'a R>)> = Vec::new();

    for record in records {
        let key = resolve_value(record, column).display_value();
        match index.get(&key) {
            Some(&i) => grouped[i].1.push(record),
            None => {
                index.insert(key.clone(), grouped.len());
                grouped.push((key, vec![record]));
            }
        }
    }

    let buckets = grouped
        .into_iter()
        .map(|(key, members)| GroupBucket {
            key,
            node: partition_level(members, group_by, columns, depth + 1),
        })
        .collect();

    GroupNode::Branch {
        column_key: column.key.clone(),
        buckets,
    }
}

// ============================================================================
// FLATTENING
// ============================================================================

/// Path of a child node: the bare key at the root, otherwise
/// `parent/key`.
fn child_path(parent_path: &str, key: &str, level: usize) -> String {
    if level == 0 {
        key.to_string()
    } else {
        let mut path = String::with_capacity(parent_path.len() + 1 + key.len());
        path.push_str(parent_path);
        path.push_str(GROUP_PATH_SEPARATOR);
        path.push_str(key);
        path
    }
}

/// Flattens the tree into display rows, honoring `expanded_paths`.
pub fn flatten<'a, R>(
    tree: &GroupNode<'a, R>,
    expanded_paths: &FxHashSet<String>,
) -> Vec<GridRow<'a, R>> {
    let mut rows = Vec::new();
    flatten_node(tree, expanded_paths, 0, "", &mut rows);
    rows
}

fn flatten_node<'a, R>(
    node: &GroupNode<'a, R>,
    expanded_paths: &FxHashSet<String>,
    level: usize,
    parent_path: &str,
    rows: &mut Vec<GridRow<'a, R>>,
) {
    match node {
        GroupNode::Leaf(records) => {
            rows.extend(records.iter().map(|&record| GridRow::data(record)));
        }
        GroupNode::Branch {
            column_key,
            buckets,
        } => {
            for bucket in buckets {
                let path = child_path(parent_path, &bucket.key, level);
                let is_expanded = expanded_paths.contains(&path);

                rows.push(GridRow::Group(GroupRow {
                    path: path.clone(),
                    display_value: bucket.key.clone(),
                    column_key: column_key.clone(),
                    nesting_level: level,
                    child_record_count: bucket.node.record_count(),
                    is_expanded,
                }));

                // Collapsed groups contribute only their header
                if is_expanded {
                    flatten_node(&bucket.node, expanded_paths, level + 1, &path, rows);
                }
            }
        }
    }
}

/// Every group path in the tree, in display order, regardless of expansion.
pub fn collect_paths<R>(tree: &GroupNode<'_, R>) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths_into(tree, 0, "", &mut paths);
    paths
}

fn collect_paths_into<R>(node: &GroupNode<'_, R>, level: usize, parent_path: &str, paths: &mut Vec<String>) {
    if let GroupNode::Branch { buckets, .. } = node {
        for bucket in buckets {
            let path = child_path(parent_path, &bucket.key, level);
            paths.push(path.clone());
            collect_paths_into(&bucket.node, level + 1, &path, paths);
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Groups `records` by `group_by` and flattens the result for display.
/// With no group-by columns every record becomes a plain data row.
pub fn group_records<'a, R: Record>(
    records: Vec<&'a R>,
    group_by: &[String],
    columns: &[ColumnDefinition<R>],
    expanded_paths: &FxHashSet<String>,
) -> Vec<GridRow<'a, R>> {
    if group_by.is_empty() {
        return records.into_iter().map(GridRow::data).collect();
    }

    let tree = partition(records, group_by, columns);
    flatten(&tree, expanded_paths)
}

/// All group paths `group_by` produces over `records`, outer before inner.
/// Feeding these to the expansion set opens every group.
pub fn group_paths<R: Record>(
    records: &[R],
    group_by: &[String],
    columns: &[ColumnDefinition<R>],
) -> Vec<String> {
    let tree = partition(records.iter().collect(), group_by, columns);
    collect_paths(&tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn columns() -> Vec<ColumnDefinition<Value>> {
        vec![
            ColumnDefinition::field("dept"),
            ColumnDefinition::field("level"),
            ColumnDefinition::field("name"),
        ]
    }

    fn records() -> Vec<Value> {
        vec![
            json!({"name": "a", "dept": "Eng", "level": 5}),
            json!({"name": "b", "dept": "Sales", "level": 2}),
            json!({"name": "c", "dept": "Eng", "level": 3}),
            json!({"name": "d", "dept": "Eng", "level": 5}),
        ]
    }

    fn keys(group_by: &[&str]) -> Vec<String> {
        group_by.iter().map(|s| s.to_string()).collect()
    }

    fn expanded(paths: &[&str]) -> FxHashSet<String> {
        paths.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partition_preserves_first_seen_order() {
        let data = records();
        let tree = partition(data.iter().collect(), &keys(&["dept"]), &columns());

        match &tree {
            GroupNode::Branch { column_key, buckets } => {
                assert_eq!(column_key, "dept");
                let names: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
                assert_eq!(names, vec!["Eng", "Sales"]);
                match &buckets[0].node {
                    GroupNode::Leaf(members) => {
                        assert_eq!(members, &vec![&data[0], &data[2], &data[3]]);
                    }
                    other => panic!("expected leaf, got {:?}", other),
                }
            }
            other => panic!("expected branch, got {:?}", other),
        }
        assert_eq!(tree.record_count(), 4);
    }

    #[test]
    fn test_collapsed_root_groups_only() {
        let data = records();
        let rows = group_records(data.iter().collect(), &keys(&["dept", "level"]), &columns(), &expanded(&[]));

        assert_eq!(rows.len(), 2);
        let eng = rows[0].as_group().unwrap();
        assert_eq!(eng.path, "Eng");
        assert_eq!(eng.child_record_count, 3);
        assert!(!eng.is_expanded);
        assert_eq!(rows[1].as_group().unwrap().path, "Sales");
    }

    #[test]
    fn test_nested_paths_and_counts() {
        let data = records();
        let rows = group_records(
            data.iter().collect(),
            &keys(&["dept", "level"]),
            &columns(),
            &expanded(&["Eng", "Eng/5"]),
        );

        // Eng, Eng/5, a, d, Eng/3, Sales
        assert_eq!(rows.len(), 6);
        let five = rows[1].as_group().unwrap();
        assert_eq!(five.path, "Eng/5");
        assert_eq!(five.display_value, "5");
        assert_eq!(five.column_key, "level");
        assert_eq!(five.nesting_level, 1);
        assert_eq!(five.child_record_count, 2);
        assert_eq!(rows[2].record(), Some(&data[0]));
        assert_eq!(rows[3].record(), Some(&data[3]));
        assert_eq!(rows[4].as_group().unwrap().path, "Eng/3");
        assert!(!rows[4].as_group().unwrap().is_expanded);
        assert_eq!(rows[5].as_group().unwrap().path, "Sales");
    }

    #[test]
    fn test_child_path_without_parent_is_hidden() {
        let data = records();
        // Eng/5 is open but its parent is closed
        let rows = group_records(data.iter().collect(), &keys(&["dept", "level"]), &columns(), &expanded(&["Eng/5"]));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_unknown_group_column_skips_level() {
        let data = records();
        let rows = group_records(
            data.iter().collect(),
            &keys(&["nope", "dept"]),
            &columns(),
            &expanded(&["Sales"]),
        );

        assert_eq!(rows.len(), 3);
        let sales = rows[1].as_group().unwrap();
        assert_eq!(sales.path, "Sales");
        assert_eq!(sales.nesting_level, 0);
        assert_eq!(rows[2].record(), Some(&data[1]));
    }

    #[test]
    fn test_only_unknown_group_columns_yield_data_rows() {
        let data = records();
        let rows = group_records(data.iter().collect(), &keys(&["nope"]), &columns(), &expanded(&[]));
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| !r.is_group()));
    }

    #[test]
    fn test_empty_group_by_returns_data_rows_in_order() {
        let data = records();
        let rows = group_records(data.iter().collect(), &[], &columns(), &expanded(&[]));
        let got: Vec<&Value> = rows.iter().filter_map(GridRow::record).collect();
        assert_eq!(got, data.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_separator_keeps_dotted_values_apart() {
        let data = vec![json!({"dept": "Eng.Ops", "level": 1})];
        let paths = group_paths(&data, &keys(&["dept", "level"]), &columns());
        assert_eq!(paths, vec!["Eng.Ops", "Eng.Ops/1"]);
    }

    #[test]
    fn test_keys_containing_separator_share_paths() {
        let data = vec![
            json!({"dept": "x/y", "level": "z"}),
            json!({"dept": "x", "level": "y/z"}),
        ];
        let paths = group_paths(&data, &keys(&["dept", "level"]), &columns());
        assert_eq!(paths, vec!["x/y", "x/y/z", "x", "x/y/z"]);

        // One expanded entry opens both leaf groups
        let rows = group_records(
            data.iter().collect(),
            &keys(&["dept", "level"]),
            &columns(),
            &expanded(&["x/y", "x", "x/y/z"]),
        );
        let open: Vec<bool> = rows.iter().filter_map(GridRow::as_group).map(|g| g.is_expanded).collect();
        assert_eq!(open, vec![true, true, true, true]);
        assert_eq!(rows.iter().filter(|r| !r.is_group()).count(), 2);
    }

    #[test]
    fn test_group_paths_in_display_order() {
        let data = records();
        let paths = group_paths(&data, &keys(&["dept", "level"]), &columns());
        assert_eq!(paths, vec!["Eng", "Eng/5", "Eng/3", "Sales", "Sales/2"]);
    }

    #[test]
    fn test_missing_values_group_under_empty_key() {
        let data = vec![json!({"name": "a"}), json!({"name": "b", "dept": "Eng"})];
        let paths = group_paths(&data, &keys(&["dept"]), &columns());
        assert_eq!(paths, vec!["", "Eng"]);
    }

    #[test]
    fn test_fully_expanded_tree_contains_every_record_once() {
        let data = records();
        let group_by = keys(&["dept", "level"]);
        let all: FxHashSet<String> = group_paths(&data, &group_by, &columns()).into_iter().collect();

        let rows = group_records(data.iter().collect(), &group_by, &columns(), &all);
        let mut names: Vec<&str> = rows
            .iter()
            .filter_map(GridRow::record)
            .map(|r| r["name"].as_str().unwrap_or_default())
            .collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }
}
