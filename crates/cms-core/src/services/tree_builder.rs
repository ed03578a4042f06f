// ============================================================================
// CMS Core - Menu Tree Builder
// File: crates/cms-core/src/services/tree_builder.rs
// ============================================================================
//! Turns flat, parent-referencing menu rows into an ordered forest.
//!
//! Malformed data is contained, never rejected:
//! - a parent id that matches no record makes the record a root (dangling)
//! - a parent chain that leads back to the record makes it a root (cycle)
//! - a repeated id keeps its first occurrence addressable, later copies are roots
//!
//! Every input record appears exactly once in the output and every sibling
//! list is ordered by (priority, id).

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::{MenuNode, MenuRecord};

/// Data problem contained while building a forest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeDiagnostic {
    /// The declared parent does not exist among the records.
    DanglingParent { id: i32, parent_id: i32 },
    /// Following parents from `id` revisits `id`; the cycle was broken here.
    CycleBroken { id: i32, parent_id: i32 },
    DuplicateId { id: i32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    pub roots: Vec<MenuNode>,
    pub diagnostics: Vec<TreeDiagnostic>,
}

impl Forest {
    pub fn len(&self) -> usize {
        self.roots.iter().map(MenuNode::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn into_roots(self) -> Vec<MenuNode> {
        self.roots
    }
}

/// Build the forest and report what had to be repaired.
pub fn build_forest(records: Vec<MenuRecord>) -> Forest {
    let count = records.len();
    let mut index: HashMap<i32, usize> = HashMap::with_capacity(count);
    let mut diagnostics = Vec::new();
    let mut duplicate = vec![false; count];

    for (pos, record) in records.iter().enumerate() {
        if index.contains_key(&record.id) {
            duplicate[pos] = true;
            diagnostics.push(TreeDiagnostic::DuplicateId { id: record.id });
        } else {
            index.insert(record.id, pos);
        }
    }

    // Parent as declared, when it names an existing record.
    let declared: Vec<Option<usize>> = records
        .iter()
        .enumerate()
        .map(|(pos, record)| {
            if duplicate[pos] || record.is_root_menu() {
                return None;
            }
            let parent = index.get(&record.parent_id).copied();
            if parent.is_none() {
                diagnostics.push(TreeDiagnostic::DanglingParent { id: record.id, parent_id: record.parent_id });
            }
            parent
        })
        .collect();

    let cut = cycle_cuts(&declared);
    for (pos, record) in records.iter().enumerate() {
        if cut[pos] {
            diagnostics.push(TreeDiagnostic::CycleBroken { id: record.id, parent_id: record.parent_id });
        }
    }

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (pos, parent) in declared.iter().enumerate() {
        match parent {
            Some(parent) if !cut[pos] => children[*parent].push(pos),
            _ => roots.push(pos),
        }
    }

    let by_order = |a: &usize, b: &usize| records[*a].sort_key().cmp(&records[*b].sort_key());
    roots.sort_by(by_order);
    for list in children.iter_mut() {
        list.sort_by(by_order);
    }

    report(&diagnostics);

    let roots = assemble(records, &roots, &children);
    Forest { roots, diagnostics }
}

/// Ordered forest only; diagnostics are logged.
pub fn build_tree(records: Vec<MenuRecord>) -> Vec<MenuNode> {
    build_forest(records).into_roots()
}

/// Pre-order flattening that keeps sibling order.
pub fn flatten(roots: &[MenuNode]) -> Vec<&MenuRecord> {
    let mut out = Vec::new();
    let mut stack: Vec<&MenuNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(&node.menu);
        stack.extend(node.children.iter().rev());
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// For every loop of declared links, mark the member that comes first in
/// input order. Each position is walked once.
fn cycle_cuts(declared: &[Option<usize>]) -> Vec<bool> {
    let mut visit = vec![Visit::New; declared.len()];
    let mut cut = vec![false; declared.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..declared.len() {
        let mut current = Some(start);
        while let Some(pos) = current {
            match visit[pos] {
                Visit::New => {
                    visit[pos] = Visit::OnPath;
                    path.push(pos);
                    current = declared[pos];
                }
                Visit::OnPath => {
                    // The loop is the tail of the path starting at `pos`.
                    if let Some(from) = path.iter().rposition(|p| *p == pos) {
                        if let Some(first) = path[from..].iter().min() {
                            cut[*first] = true;
                        }
                    }
                    current = None;
                }
                Visit::Done => current = None,
            }
        }
        for pos in path.drain(..) {
            visit[pos] = Visit::Done;
        }
    }
    cut
}

/// Build nodes bottom-up: children come after their parent in pre-order, so
/// walking that order backwards finishes every child before its parent.
fn assemble(records: Vec<MenuRecord>, roots: &[usize], children: &[Vec<usize>]) -> Vec<MenuNode> {
    let mut order = Vec::with_capacity(records.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(pos) = stack.pop() {
        order.push(pos);
        stack.extend(children[pos].iter().rev());
    }

    let mut slots: Vec<Option<MenuRecord>> = records.into_iter().map(Some).collect();
    let mut built: Vec<Option<MenuNode>> = slots.iter().map(|_| None).collect();
    for &pos in order.iter().rev() {
        let Some(menu) = slots[pos].take() else { continue };
        let nodes = children[pos].iter().filter_map(|child| built[*child].take()).collect();
        built[pos] = Some(MenuNode { menu, children: nodes });
    }
    roots.iter().filter_map(|pos| built[*pos].take()).collect()
}

fn report(diagnostics: &[TreeDiagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic {
            TreeDiagnostic::CycleBroken { id, parent_id } => {
                warn!(menu_id = id, parent_id, "menu parent cycle broken, menu promoted to root");
            }
            TreeDiagnostic::DuplicateId { id } => {
                warn!(menu_id = id, "duplicate menu id, later copy promoted to root");
            }
            TreeDiagnostic::DanglingParent { id, parent_id } => {
                debug!(menu_id = id, parent_id, "menu parent missing, menu promoted to root");
            }
        }
    }
}
