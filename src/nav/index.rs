// Adjacency index over a flat navigation collection.
//
// Built once per operation so that depth, height and descendant queries walk
// prepared parent/child lists instead of rescanning the whole collection.
// Parent references that do not resolve to a node are treated as root level.

use std::collections::{HashMap, HashSet};

use crate::error::{Rejection, Result};
use crate::nav::types::{FlatNode, NavNode};

/// Positions are indices into the slice the index was built from.
#[derive(Debug, Clone)]
pub struct NavIndex<'a> {
    nodes: &'a [NavNode],
    by_id: HashMap<&'a str, usize>,
    /// Resolved parent position for every node.
    parents: Vec<Option<usize>>,
    /// Children per parent (None = roots), sorted by (order, input position).
    children: HashMap<Option<usize>, Vec<usize>>,
}

impl<'a> NavIndex<'a> {
    pub fn build(nodes: &'a [NavNode]) -> Self {
        let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
        for (pos, n) in nodes.iter().enumerate() {
            by_id.entry(n.id.as_str()).or_insert(pos);
        }

        let parents: Vec<Option<usize>> = nodes
            .iter()
            .map(|n| n.parent_id.as_deref().and_then(|p| by_id.get(p).copied()))
            .collect();

        let mut children: HashMap<Option<usize>, Vec<usize>> = HashMap::new();
        for (pos, parent) in parents.iter().enumerate() {
            children.entry(*parent).or_default().push(pos);
        }
        // Stable sort keeps input order for equal `order` values
        for list in children.values_mut() {
            list.sort_by_key(|&pos| nodes[pos].order);
        }

        Self { nodes, by_id, parents, children }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &'a [NavNode] {
        self.nodes
    }

    pub fn node(&self, pos: usize) -> &'a NavNode {
        &self.nodes[pos]
    }

    pub fn position(&self, id: &str) -> Result<usize> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| Rejection::NodeNotFound(id.to_string()))
    }

    pub fn parent(&self, pos: usize) -> Option<usize> {
        self.parents[pos]
    }

    /// Children of `parent` in display order. `None` yields the roots.
    pub fn children(&self, parent: Option<usize>) -> &[usize] {
        self.children.get(&parent).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Order for a node appended under `parent`, ignoring `except`.
    /// Equals the child count for densely numbered siblings and never
    /// collides with an existing order otherwise.
    pub fn append_order(&self, parent: Option<usize>, except: Option<usize>) -> i64 {
        self.children(parent)
            .iter()
            .filter(|&&p| Some(p) != except)
            .map(|&p| self.nodes[p].order + 1)
            .max()
            .unwrap_or(0)
    }

    /// The sibling list a node belongs to, itself included.
    pub fn siblings(&self, pos: usize) -> &[usize] {
        self.children(self.parents[pos])
    }

    /// Number of hops from `pos` to a root.
    pub fn depth(&self, pos: usize) -> Result<usize> {
        let mut visited = HashSet::from([pos]);
        let mut depth = 0;
        let mut cur = pos;
        while let Some(parent) = self.parents[cur] {
            if !visited.insert(parent) {
                return Err(self.cycle_at(pos));
            }
            depth += 1;
            cur = parent;
        }
        Ok(depth)
    }

    /// Height of the subtree below `pos`: 0 for a leaf.
    pub fn max_descendant_depth(&self, pos: usize) -> Result<usize> {
        let mut on_path = HashSet::new();
        self.height_inner(pos, &mut on_path)
    }

    fn height_inner(&self, pos: usize, on_path: &mut HashSet<usize>) -> Result<usize> {
        if !on_path.insert(pos) {
            return Err(self.cycle_at(pos));
        }
        let mut height = 0;
        for &child in self.children(Some(pos)) {
            height = height.max(1 + self.height_inner(child, on_path)?);
        }
        on_path.remove(&pos);
        Ok(height)
    }

    /// True if `ancestor` appears in the parent chain of `pos`.
    pub fn is_descendant(&self, pos: usize, ancestor: usize) -> Result<bool> {
        let mut visited = HashSet::from([pos]);
        let mut cur = pos;
        while let Some(parent) = self.parents[cur] {
            if parent == ancestor {
                return Ok(true);
            }
            if !visited.insert(parent) {
                return Err(self.cycle_at(pos));
            }
            cur = parent;
        }
        Ok(false)
    }

    /// All positions in the subtree rooted at `pos`, root first.
    pub fn subtree(&self, pos: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![pos];
        while let Some(cur) = stack.pop() {
            if !seen.insert(cur) {
                continue;
            }
            out.push(cur);
            for &child in self.children(Some(cur)).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Depth-first pre-order `(position, depth)` pairs, skipping the children
    /// of collapsed ids.
    pub fn preorder(&self, collapsed: &HashSet<String>) -> Vec<(usize, usize)> {
        fn dfs(
            index: &NavIndex<'_>,
            pos: usize,
            depth: usize,
            collapsed: &HashSet<String>,
            out: &mut Vec<(usize, usize)>,
        ) {
            out.push((pos, depth));
            if collapsed.contains(&index.nodes[pos].id) {
                return;
            }
            for &child in index.children(Some(pos)) {
                dfs(index, child, depth + 1, collapsed, out);
            }
        }

        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in self.children(None) {
            dfs(self, root, 0, collapsed, &mut out);
        }
        out
    }

    /// Display list for the tree view.
    pub fn flatten(&self, collapsed: &HashSet<String>) -> Vec<FlatNode<'a>> {
        self.preorder(collapsed)
            .into_iter()
            .map(|(pos, depth)| FlatNode { node: self.node(pos), depth })
            .collect()
    }

    fn cycle_at(&self, pos: usize) -> Rejection {
        Rejection::CycleDetected { id: self.nodes[pos].id.clone() }
    }
}
