use serde::{Deserialize, Serialize};

/// Deepest allowed level: roots are 0, so three levels in total.
pub const MAX_DEPTH: usize = 2;

/// A navigation record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// None => root level
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Sibling sequence. Only the relative order within one parent matters.
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl NavNode {
    pub fn new(id: &str, parent_id: Option<&str>, order: i64) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            parent_id: parent_id.map(str::to_string),
            order,
            is_visible: true,
        }
    }
}

/// Input for [`add_node`](crate::nav::add_node). The order is assigned by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNavNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

/// Fields of one node that the caller has to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavUpdate {
    pub id: String,
    /// `Some(None)` moves the node to the root level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Result of an accepted navigation edit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavEdit {
    /// The full collection after the edit.
    pub nodes: Vec<NavNode>,
    pub updates: Vec<NavUpdate>,
    /// Ids deleted by the edit (subtree removal).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
}

impl NavEdit {
    pub fn update_for(&self, id: &str) -> Option<&NavUpdate> {
        self.updates.iter().find(|u| u.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&NavNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// One row of the display list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatNode<'a> {
    pub node: &'a NavNode,
    pub depth: usize,
}
