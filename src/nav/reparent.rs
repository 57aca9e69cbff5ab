//! Moving a navigation item into another folder.
//!
//! A move is legal when it creates no cycle and every node of the moved
//! subtree stays within [`MAX_DEPTH`].

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{Rejection, Result};
use crate::nav::index::NavIndex;
use crate::nav::types::{NavEdit, NavNode, NavUpdate, MAX_DEPTH};

/// Check whether `dragged_id` may be moved under `target_id`.
/// `None` as the target means the root level.
pub fn check_reparent(nodes: &[NavNode], dragged_id: &str, target_id: Option<&str>) -> Result<()> {
    let index = NavIndex::build(nodes);
    let dragged = index.position(dragged_id)?;
    let target = target_id.map(|t| index.position(t)).transpose()?;
    check(&index, dragged, target)
}

/// Boolean form of [`check_reparent`] for a folder target.
pub fn can_reparent(nodes: &[NavNode], dragged_id: &str, target_id: &str) -> bool {
    check_reparent(nodes, dragged_id, Some(target_id)).is_ok()
}

/// Move `dragged_id` under `target_id` (or to the root level), appending it
/// after the target's existing children. Former siblings keep their orders.
/// Dropping a node on the parent it already has changes nothing.
pub fn reparent(nodes: &[NavNode], dragged_id: &str, target_id: Option<&str>) -> Result<NavEdit> {
    let index = NavIndex::build(nodes);
    let dragged = index.position(dragged_id)?;
    let target = target_id.map(|t| index.position(t)).transpose()?;

    check(&index, dragged, target).inspect_err(|r| {
        warn!(dragged = dragged_id, target = ?target_id, code = r.code(), "reparent rejected");
    })?;

    if index.parent(dragged) == target {
        debug!(dragged = dragged_id, target = ?target_id, "reparent onto current parent ignored");
        return Ok(NavEdit { nodes: nodes.to_vec(), updates: Vec::new(), removed: Vec::new() });
    }

    let order = index.append_order(target, Some(dragged));
    let parent_id = target.map(|t| index.node(t).id.clone());

    let mut out = nodes.to_vec();
    out[dragged].parent_id = parent_id.clone();
    out[dragged].order = order;

    debug!(dragged = dragged_id, target = ?target_id, order, "nav node reparented");
    Ok(NavEdit {
        nodes: out,
        updates: vec![NavUpdate { id: dragged_id.to_string(), parent_id: Some(parent_id), order: Some(order) }],
        removed: Vec::new(),
    })
}

/// All nodes that `node_id` could legally be moved under, in display order.
pub fn parent_options<'a>(nodes: &'a [NavNode], node_id: &str) -> Result<Vec<&'a NavNode>> {
    let index = NavIndex::build(nodes);
    let pos = index.position(node_id)?;
    Ok(index
        .preorder(&HashSet::new())
        .into_iter()
        .filter(|&(candidate, _)| check(&index, pos, Some(candidate)).is_ok())
        .map(|(candidate, _)| index.node(candidate))
        .collect())
}

fn check(index: &NavIndex<'_>, dragged: usize, target: Option<usize>) -> Result<()> {
    let too_deep = || Rejection::DepthExceeded {
        dragged: index.node(dragged).id.clone(),
        max_depth: MAX_DEPTH,
    };

    let Some(target) = target else {
        return if index.max_descendant_depth(dragged)? > MAX_DEPTH { Err(too_deep()) } else { Ok(()) };
    };

    if dragged == target || index.is_descendant(target, dragged)? {
        return Err(Rejection::CycleDetected { id: index.node(dragged).id.clone() });
    }

    let target_depth = index.depth(target)?;
    if target_depth >= MAX_DEPTH {
        return Err(too_deep());
    }
    if target_depth + 1 + index.max_descendant_depth(dragged)? > MAX_DEPTH {
        return Err(too_deep());
    }
    Ok(())
}
