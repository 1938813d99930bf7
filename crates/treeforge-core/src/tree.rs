//! The directory tree description type

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A nested directory description: each key is a directory name, each value
/// is either `None` (no subdirectories) or a nested tree.
///
/// Decoded directly from a JSON or YAML mapping, so any value that is not a
/// mapping or null fails at decode time and the materializer never has to
/// inspect raw document values. Sibling iteration order is sorted by name;
/// nothing downstream may rely on a particular sibling order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirTree(BTreeMap<String, Option<DirTree>>);

impl DirTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Number of top-level entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the tree has no entries at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, children)` pairs at this level
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&DirTree>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Total number of named entries at every depth
    ///
    /// This is the upfront "expected directory count" shown before a run. It
    /// is computed from the tree alone and does not account for skips,
    /// collisions, or prefixing during materialization.
    pub fn count_nodes(&self) -> usize {
        self.0
            .values()
            .map(|children| 1 + children.as_ref().map_or(0, DirTree::count_nodes))
            .sum()
    }

    /// Insert an entry at this level, replacing any existing entry
    pub fn insert(&mut self, name: impl Into<String>, children: Option<DirTree>) {
        self.0.insert(name.into(), children);
    }

    /// Look up a direct child entry by name
    pub fn get(&self, name: &str) -> Option<Option<&DirTree>> {
        self.0.get(name).map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirTree {
        // src/{api,db}, docs, tests
        let mut src = DirTree::new();
        src.insert("api", None);
        src.insert("db", None);
        let mut root = DirTree::new();
        root.insert("src", Some(src));
        root.insert("docs", None);
        root.insert("tests", Some(DirTree::new()));
        root
    }

    #[test]
    fn test_count_nodes_all_depths() {
        assert_eq!(sample().count_nodes(), 5);
    }

    #[test]
    fn test_count_nodes_empty() {
        assert_eq!(DirTree::new().count_nodes(), 0);
    }

    #[test]
    fn test_empty_child_mapping_counts_once() {
        let mut tree = DirTree::new();
        tree.insert("a", Some(DirTree::new()));
        assert_eq!(tree.count_nodes(), 1);
    }

    #[test]
    fn test_entries_iteration_covers_all_keys() {
        let tree = sample();
        let names: Vec<&str> = tree.entries().map(|(name, _)| name).collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"src"));
        assert!(names.contains(&"docs"));
        assert!(names.contains(&"tests"));
    }

    #[test]
    fn test_decodes_from_json_mapping() {
        let tree: DirTree = serde_json::from_str(r#"{"a": {"b": null}, "c": null}"#).unwrap();
        assert_eq!(tree.count_nodes(), 3);
        assert!(tree.get("c").unwrap().is_none());
        let a = tree.get("a").unwrap().unwrap();
        assert!(a.get("b").is_some());
    }

    #[test]
    fn test_rejects_scalar_children() {
        let result: Result<DirTree, _> = serde_json::from_str(r#"{"a": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_array_children() {
        let result: Result<DirTree, _> = serde_json::from_str(r#"{"a": ["b"]}"#);
        assert!(result.is_err());
    }
}
