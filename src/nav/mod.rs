// Navigation tree engine.
//
// Works on the flat list of navigation records a tenant owns. Every operation
// builds a `NavIndex` once, validates against it, and returns the whole
// updated collection plus the per-record changes the caller has to persist.
//
// Submodules:
// - index: parent/child adjacency, depth and height queries, display order
// - reorder: drag-and-drop among siblings
// - reparent: moving items between folders under the depth budget
// - edit: adding and deleting items

use std::collections::HashSet;

use crate::error::Result;

mod edit;
mod index;
mod reorder;
mod reparent;
mod types;

pub use edit::{add_node, remove_node};
pub use index::NavIndex;
pub use reorder::{reorder_siblings, reorder_within_parent};
pub use reparent::{can_reparent, check_reparent, parent_options, reparent};
pub use types::{FlatNode, NavEdit, NavNode, NavUpdate, NewNavNode, MAX_DEPTH};

/// Number of ancestor hops from `node_id` to the root level.
pub fn depth(node_id: &str, nodes: &[NavNode]) -> Result<usize> {
    let index = NavIndex::build(nodes);
    index.depth(index.position(node_id)?)
}

/// Height of the subtree under `node_id`; 0 for a leaf.
pub fn max_descendant_depth(node_id: &str, nodes: &[NavNode]) -> Result<usize> {
    let index = NavIndex::build(nodes);
    index.max_descendant_depth(index.position(node_id)?)
}

/// Display list of the tree: pre-order, siblings by `order`, children of
/// collapsed ids hidden. Recompute after every edit.
pub fn flatten<'a>(nodes: &'a [NavNode], collapsed: &HashSet<String>) -> Vec<FlatNode<'a>> {
    NavIndex::build(nodes).flatten(collapsed)
}
