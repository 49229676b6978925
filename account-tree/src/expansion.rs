use crate::account::AccountId;
use crate::forest::{Forest, TreeNode};
use std::collections::HashMap;

/// Which tree nodes are open. Owned by one tree view; everything starts collapsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashMap<AccountId, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: AccountId) -> bool {
        self.expanded.get(&id).copied().unwrap_or(false)
    }

    /// Flips the entry for `id` and returns the new value.
    pub fn toggle(&mut self, id: AccountId) -> bool {
        let entry = self.expanded.entry(id).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn set(&mut self, id: AccountId, expanded: bool) {
        self.expanded.insert(id, expanded);
    }

    pub fn expand_all(&mut self, forest: &Forest) {
        let mut stack: Vec<&TreeNode> = forest.roots.iter().chain(&forest.orphans).collect();
        while let Some(node) = stack.pop() {
            if node.account.is_synthetic() && node.has_children() {
                self.expanded.insert(node.id(), true);
            }
            stack.extend(&node.children);
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.values().filter(|v| **v).count()
    }
}
