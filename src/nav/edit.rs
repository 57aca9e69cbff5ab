//! Node lifecycle: adding items and deleting subtrees.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Rejection, Result};
use crate::nav::index::NavIndex;
use crate::nav::types::{NavEdit, NavNode, NavUpdate, NewNavNode, MAX_DEPTH};

/// Append a node to its parent's sibling list.
/// The new node gets `order = number of current siblings`, or one past the
/// highest sibling order if earlier moves left gaps.
pub fn add_node(nodes: &[NavNode], new: NewNavNode) -> Result<NavEdit> {
    let index = NavIndex::build(nodes);
    if index.position(&new.id).is_ok() {
        return Err(Rejection::DuplicateId(new.id));
    }

    let parent = match new.parent_id.as_deref() {
        Some(pid) => Some(index.position(pid)?),
        None => None,
    };
    if let Some(p) = parent {
        if index.depth(p)? >= MAX_DEPTH {
            return Err(Rejection::DepthExceeded { dragged: new.id, max_depth: MAX_DEPTH });
        }
    }

    let order = index.append_order(parent, None);
    let node = NavNode {
        id: new.id,
        name: new.name,
        parent_id: new.parent_id,
        order,
        is_visible: new.is_visible,
    };
    let update = NavUpdate {
        id: node.id.clone(),
        parent_id: Some(node.parent_id.clone()),
        order: Some(order),
    };
    debug!(id = %node.id, order, "nav node added");

    let mut out = nodes.to_vec();
    out.push(node);
    Ok(NavEdit { nodes: out, updates: vec![update], removed: Vec::new() })
}

/// Delete a node together with its subtree, then close the gap it left
/// among its former siblings.
pub fn remove_node(nodes: &[NavNode], id: &str) -> Result<NavEdit> {
    let index = NavIndex::build(nodes);
    let pos = index.position(id)?;

    let doomed: HashSet<usize> = index.subtree(pos).into_iter().collect();
    let survivors: Vec<usize> = index
        .siblings(pos)
        .iter()
        .copied()
        .filter(|p| !doomed.contains(p))
        .collect();

    let mut out = nodes.to_vec();
    let mut updates = Vec::new();
    renumber(&mut out, &survivors, &mut updates);

    let removed: Vec<String> = index
        .subtree(pos)
        .into_iter()
        .map(|p| index.node(p).id.clone())
        .collect();
    let out: Vec<NavNode> = out
        .into_iter()
        .enumerate()
        .filter(|(p, _)| !doomed.contains(p))
        .map(|(_, n)| n)
        .collect();

    debug!(id, removed = removed.len(), renumbered = updates.len(), "nav subtree removed");
    Ok(NavEdit { nodes: out, updates, removed })
}

/// Assign `order = index` along `seq`, recording an update for every node
/// whose order actually changed.
pub(crate) fn renumber(nodes: &mut [NavNode], seq: &[usize], updates: &mut Vec<NavUpdate>) {
    for (i, &pos) in seq.iter().enumerate() {
        let order = i as i64;
        if nodes[pos].order != order {
            nodes[pos].order = order;
            updates.push(NavUpdate { id: nodes[pos].id.clone(), parent_id: None, order: Some(order) });
        }
    }
}
