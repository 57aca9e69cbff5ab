//! Drag-and-drop reordering among siblings.
//!
//! The tree view hands us an index into the flattened display list. A drop is
//! only accepted when the row under the cursor has the same parent as the
//! dragged row; moving between levels is an explicit re-parent instead.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{Rejection, Result};
use crate::nav::edit::renumber;
use crate::nav::index::NavIndex;
use crate::nav::types::{NavEdit, NavNode};

/// Move `dragged_id` to the display row `destination_index`.
///
/// `collapsed` must be the same set the view used to draw the list, since it
/// determines which row sits at each index.
pub fn reorder_siblings(
    nodes: &[NavNode],
    dragged_id: &str,
    destination_index: usize,
    collapsed: &HashSet<String>,
) -> Result<NavEdit> {
    let index = NavIndex::build(nodes);
    let dragged = index.position(dragged_id)?;

    let display = index.preorder(collapsed);
    let &(target, _) = display.get(destination_index).ok_or(Rejection::IndexOutOfRange {
        index: destination_index,
        len: display.len(),
    })?;

    if index.parent(target) != index.parent(dragged) {
        warn!(
            dragged = dragged_id,
            target = %index.node(target).id,
            "reorder across levels rejected"
        );
        return Err(Rejection::CrossLevelReorder { dragged: dragged_id.to_string() });
    }

    let sibling_index = index
        .siblings(dragged)
        .iter()
        .position(|&p| p == target)
        .ok_or_else(|| Rejection::NodeNotFound(index.node(target).id.clone()))?;

    Ok(splice(&index, dragged, sibling_index))
}

/// Same as [`reorder_siblings`] but addressed by position inside the
/// sibling list, e.g. for keyboard "move up / move down".
pub fn reorder_within_parent(nodes: &[NavNode], dragged_id: &str, sibling_index: usize) -> Result<NavEdit> {
    let index = NavIndex::build(nodes);
    let dragged = index.position(dragged_id)?;
    let len = index.siblings(dragged).len();
    if sibling_index >= len {
        return Err(Rejection::IndexOutOfRange { index: sibling_index, len });
    }
    Ok(splice(&index, dragged, sibling_index))
}

/// Remove `dragged` from its sibling list, reinsert it at `to` and renumber
/// the whole list to `0..k-1`.
fn splice(index: &NavIndex<'_>, dragged: usize, to: usize) -> NavEdit {
    let mut seq: Vec<usize> = index.siblings(dragged).to_vec();
    seq.retain(|&p| p != dragged);
    seq.insert(to.min(seq.len()), dragged);

    let mut nodes = index.nodes().to_vec();
    let mut updates = Vec::new();
    renumber(&mut nodes, &seq, &mut updates);

    debug!(dragged = %index.node(dragged).id, to, changed = updates.len(), "siblings reordered");
    NavEdit { nodes, updates, removed: Vec::new() }
}
