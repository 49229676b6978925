use crate::account::{Account, AccountId};
use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An account together with the accounts that name it as parent.
///
/// `Clone`, `PartialEq` and `Drop` walk the subtree with an explicit stack, so
/// a chart nested thousands of levels deep does not exhaust the call stack.
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub account: Account,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(account: Account) -> Self {
        Self {
            account,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.account.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }

    /// Number of levels in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|c| (c, level + 1)));
        }
        deepest
    }

    pub fn find(&self, id: AccountId) -> Option<&TreeNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id() == id {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }
}

impl Clone for TreeNode {
    fn clone(&self) -> Self {
        build_tree(self, |node, i| node.children.get(i), |node| node.account.clone())
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.account != b.account || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for TreeNode {}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forest {
    pub roots: Vec<TreeNode>,
    /// Subtrees whose top account points at a parent that is not in the list.
    pub orphans: Vec<TreeNode>,
}

impl Forest {
    pub fn len(&self) -> usize {
        self.tops().map(TreeNode::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.orphans.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.tops().map(TreeNode::depth).max().unwrap_or(0)
    }

    pub fn find(&self, id: AccountId) -> Option<&TreeNode> {
        self.tops().find_map(|top| top.find(id))
    }

    fn tops(&self) -> impl Iterator<Item = &TreeNode> {
        self.roots.iter().chain(&self.orphans)
    }
}

/// Groups a flat account list into a forest in one indexing pass plus one
/// traversal. Sibling order follows the input order.
pub fn build_forest(accounts: &[Account]) -> Result<Forest, TreeError> {
    let mut positions: HashMap<AccountId, usize> = HashMap::with_capacity(accounts.len());
    for (pos, account) in accounts.iter().enumerate() {
        if positions.insert(account.id, pos).is_some() {
            return Err(TreeError::DuplicateId(account.id));
        }
    }

    let mut children: HashMap<AccountId, Vec<usize>> = HashMap::new();
    let mut root_positions = Vec::new();
    let mut orphan_positions = Vec::new();
    for (pos, account) in accounts.iter().enumerate() {
        match account.parent_id {
            None => root_positions.push(pos),
            Some(parent) if positions.contains_key(&parent) => {
                children.entry(parent).or_default().push(pos);
            }
            Some(parent) => {
                tracing::warn!(
                    account = %account.id,
                    parent = %parent,
                    "account references a parent missing from the list"
                );
                orphan_positions.push(pos);
            }
        }
    }

    let mut placed = vec![false; accounts.len()];
    let mut assemble = |top: usize| {
        build_tree(
            top,
            |pos, i| {
                children
                    .get(&accounts[pos].id)
                    .and_then(|list| list.get(i))
                    .copied()
            },
            |pos| {
                placed[pos] = true;
                accounts[pos].clone()
            },
        )
    };
    let roots: Vec<TreeNode> = root_positions.into_iter().map(&mut assemble).collect();
    let orphans: Vec<TreeNode> = orphan_positions.into_iter().map(&mut assemble).collect();

    if placed.iter().any(|reached| !reached) {
        let on_loop = loop_members(accounts, &positions, &placed);
        let (members, dependents): (Vec<usize>, Vec<usize>) = (0..accounts.len())
            .filter(|&pos| !placed[pos])
            .partition(|pos| on_loop.contains(pos));
        tracing::warn!(
            members = members.len(),
            dependents = dependents.len(),
            "account list contains a parent cycle"
        );
        return Err(TreeError::Cycle {
            members: members.into_iter().map(|pos| accounts[pos].id).collect(),
            dependents: dependents.into_iter().map(|pos| accounts[pos].id).collect(),
        });
    }

    tracing::debug!(
        accounts = accounts.len(),
        roots = roots.len(),
        orphans = orphans.len(),
        "built account forest"
    );
    Ok(Forest { roots, orphans })
}

/// Depth-first construction without recursion: `child_at(src, i)` yields the
/// i-th child of a source item, `make` turns a source item into its account.
fn build_tree<S: Copy>(
    top: S,
    mut child_at: impl FnMut(S, usize) -> Option<S>,
    mut make: impl FnMut(S) -> Account,
) -> TreeNode {
    let mut pending: Vec<(S, usize, TreeNode)> = Vec::new();
    let mut src = top;
    let mut next = 0;
    let mut node = TreeNode::leaf(make(top));
    loop {
        if let Some(child) = child_at(src, next) {
            pending.push((src, next + 1, node));
            src = child;
            next = 0;
            node = TreeNode::leaf(make(child));
            continue;
        }
        match pending.pop() {
            Some((parent_src, parent_next, mut parent)) => {
                parent.children.push(node);
                src = parent_src;
                next = parent_next;
                node = parent;
            }
            None => return node,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Fresh,
    OnPath,
    Settled,
}

/// Positions of unplaced accounts that sit on a parent loop, as opposed to
/// hanging below one.
fn loop_members(
    accounts: &[Account],
    positions: &HashMap<AccountId, usize>,
    placed: &[bool],
) -> HashSet<usize> {
    let mut visit = vec![Visit::Fresh; accounts.len()];
    let mut members = HashSet::new();
    for start in 0..accounts.len() {
        if placed[start] || visit[start] != Visit::Fresh {
            continue;
        }
        let mut path = Vec::new();
        let mut pos = start;
        loop {
            match visit[pos] {
                Visit::Fresh => {
                    visit[pos] = Visit::OnPath;
                    path.push(pos);
                    match accounts[pos].parent_id.and_then(|p| positions.get(&p)) {
                        Some(&parent) => pos = parent,
                        None => break,
                    }
                }
                Visit::OnPath => {
                    if let Some(at) = path.iter().position(|&p| p == pos) {
                        members.extend(&path[at..]);
                    }
                    break;
                }
                Visit::Settled => break,
            }
        }
        for p in path {
            visit[p] = Visit::Settled;
        }
    }
    members
}
