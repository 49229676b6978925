//! Flattens a forest into the rows a tree view shows for the current
//! expansion state.

use crate::account::{AccountId, AccountType};
use crate::expansion::ExpansionState;
use crate::forest::{Forest, TreeNode};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Connector {
    None,
    Branch,
    Last,
}

impl Connector {
    pub fn glyph(self) -> &'static str {
        match self {
            Connector::None => "",
            Connector::Branch => "├─",
            Connector::Last => "└─",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeIcon {
    FolderOpen,
    FolderClosed,
    File,
}

impl NodeIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            NodeIcon::FolderOpen => "📂",
            NodeIcon::FolderClosed => "📁",
            NodeIcon::File => "📄",
        }
    }

    pub fn is_folder(self) -> bool {
        !matches!(self, NodeIcon::File)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Chevron {
    Expanded,
    Collapsed,
}

impl Chevron {
    pub fn glyph(self) -> &'static str {
        match self {
            Chevron::Expanded => "▾",
            Chevron::Collapsed => "▸",
        }
    }
}

/// Whether a row belongs to a root's subtree or to an account whose parent is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Linked,
    Unlinked,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TreeRow {
    pub id: AccountId,
    pub account_code: String,
    pub name: String,
    pub account_type: AccountType,
    pub depth: usize,
    pub connector: Connector,
    pub icon: NodeIcon,
    pub chevron: Option<Chevron>,
    pub selected: bool,
    pub section: Section,
}

/// Identity of a rendered row: changes only when the row has to be redrawn.
pub type RowKey = (AccountId, bool, Option<Chevron>);

impl TreeRow {
    pub fn key(&self) -> RowKey {
        (self.id, self.selected, self.chevron)
    }
}

/// Rows in display order: roots first, then the unlinked section. Only the
/// children of expanded nodes are emitted.
pub fn visible_rows(
    forest: &Forest,
    expansion: &ExpansionState,
    selected: Option<AccountId>,
) -> Vec<TreeRow> {
    let mut rows = Vec::with_capacity(forest.roots.len() + forest.orphans.len());
    let mut stack: Vec<(&TreeNode, usize, bool, Section)> = Vec::new();
    stack.extend(forest.orphans.iter().rev().map(|n| (n, 0, false, Section::Unlinked)));
    stack.extend(forest.roots.iter().rev().map(|n| (n, 0, false, Section::Linked)));

    while let Some((node, depth, is_last, section)) = stack.pop() {
        let has_children = node.has_children();
        let open = has_children && expansion.is_expanded(node.id());
        rows.push(row_for(node, depth, is_last, open, section, selected));

        if open {
            let last = node.children.len() - 1;
            stack.extend(
                node.children
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(i, child)| (child, depth + 1, i == last, section)),
            );
        }
    }
    rows
}

fn row_for(
    node: &TreeNode,
    depth: usize,
    is_last: bool,
    open: bool,
    section: Section,
    selected: Option<AccountId>,
) -> TreeRow {
    let (icon, chevron) = match node.account.account_type {
        AccountType::Analytical => (NodeIcon::File, None),
        AccountType::Synthetic if !node.has_children() => (NodeIcon::FolderClosed, None),
        AccountType::Synthetic if open => (NodeIcon::FolderOpen, Some(Chevron::Expanded)),
        AccountType::Synthetic => (NodeIcon::FolderClosed, Some(Chevron::Collapsed)),
    };
    let connector = match (depth, is_last) {
        (0, _) => Connector::None,
        (_, true) => Connector::Last,
        (_, false) => Connector::Branch,
    };

    TreeRow {
        id: node.id(),
        account_code: node.account.account_code.clone(),
        name: node.account.name.clone(),
        account_type: node.account.account_type,
        depth,
        connector,
        icon,
        chevron,
        selected: selected == Some(node.id()),
        section,
    }
}

/// Plain-text rendering, one line per row. Unlinked rows follow a separator line.
pub fn render_text(rows: &[TreeRow]) -> String {
    let mut out = String::new();
    let mut in_unlinked = false;
    for row in rows {
        if row.section == Section::Unlinked && !in_unlinked {
            out.push_str("-- unlinked accounts --\n");
            in_unlinked = true;
        }
        let marker = if row.selected { '>' } else { ' ' };
        let indent = "   ".repeat(row.depth.saturating_sub(1));
        let connector = match row.connector {
            Connector::None => String::new(),
            other => format!("{} ", other.glyph()),
        };
        let chevron = row.chevron.map_or(" ", Chevron::glyph);
        out.push_str(&format!(
            "{marker} {indent}{connector}{chevron} {} {} {}\n",
            row.icon.glyph(),
            row.account_code,
            row.name
        ));
    }
    out
}
