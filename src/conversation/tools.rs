use crate::models::ToolInfo;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Tool invocations of one assistant turn, keyed by tool id and kept in
/// first-appearance order.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    entries: IndexMap<String, ToolInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Appended,
    Replaced,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry sharing `incoming.id` without moving it, or append
    /// `incoming` when the id is new.
    pub fn merge(&mut self, incoming: ToolInfo) -> MergeOutcome {
        match self.entries.get_mut(&incoming.id) {
            Some(entry) => {
                *entry = incoming;
                MergeOutcome::Replaced
            }
            None => {
                self.entries.insert(incoming.id.clone(), incoming);
                MergeOutcome::Appended
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ToolInfo> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolInfo> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<ToolInfo> {
        self.entries.values().cloned().collect()
    }
}

/// Pure form of [`ToolSet::merge`]: returns the merged set and leaves
/// `existing` untouched.
pub fn merge_tool(existing: &ToolSet, incoming: ToolInfo) -> ToolSet {
    let mut merged = existing.clone();
    merged.merge(incoming);
    merged
}

// IndexMap equality ignores order; two tool lists are only equal in order.
impl PartialEq for ToolSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.iter().eq(other.iter())
    }
}

impl FromIterator<ToolInfo> for ToolSet {
    fn from_iter<I: IntoIterator<Item = ToolInfo>>(iter: I) -> Self {
        let mut set = ToolSet::new();
        for tool in iter {
            set.merge(tool);
        }
        set
    }
}

impl Serialize for ToolSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}
