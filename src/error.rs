//! Rejected-operation signals shared by the navigation and grid engines.
//!
//! None of these are fatal. The caller shows a message and keeps its state.

use std::result::Result as StdResult;

use thiserror::Error;

/// Why an edit was refused. No data is changed when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Drag-reorder dropped onto a row with a different parent.
    #[error("cannot reorder '{dragged}' across levels; move it into a folder instead")]
    CrossLevelReorder { dragged: String },
    /// The edit would put some node deeper than the maximum nesting level.
    #[error("moving '{dragged}' would exceed the maximum depth of {max_depth}")]
    DepthExceeded { dragged: String, max_depth: usize },
    /// The edit would make a node its own ancestor, or a cycle already exists.
    #[error("'{id}' would become its own ancestor")]
    CycleDetected { id: String },
    /// A placement references a widget definition that was not supplied.
    #[error("widget definition '{widget_id}' is missing")]
    DanglingWidgetReference { widget_id: String },
    #[error("navigation item '{0}' not found")]
    NodeNotFound(String),
    #[error("widget '{0}' is not placed on this dashboard")]
    WidgetNotFound(String),
    #[error("group '{0}' not found")]
    GroupNotFound(String),
    #[error("id '{0}' is already in use")]
    DuplicateId(String),
    #[error("index {index} is out of range for a list of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl Rejection {
    /// Stable reason code sent to the front-end.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::CrossLevelReorder { .. } => "cross_level_reorder",
            Rejection::DepthExceeded { .. } => "depth_exceeded",
            Rejection::CycleDetected { .. } => "cycle_detected",
            Rejection::DanglingWidgetReference { .. } => "dangling_widget_reference",
            Rejection::NodeNotFound(_) => "node_not_found",
            Rejection::WidgetNotFound(_) => "widget_not_found",
            Rejection::GroupNotFound(_) => "group_not_found",
            Rejection::DuplicateId(_) => "duplicate_id",
            Rejection::IndexOutOfRange { .. } => "index_out_of_range",
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = StdResult<T, Rejection>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_wire_names() {
        let r = Rejection::CrossLevelReorder { dragged: "a".to_string() };
        assert_eq!(r.code(), "cross_level_reorder");
        let r = Rejection::DepthExceeded { dragged: "a".to_string(), max_depth: 2 };
        assert_eq!(r.code(), "depth_exceeded");
        assert_eq!(Rejection::CycleDetected { id: "a".to_string() }.code(), "cycle_detected");
    }

    #[test]
    fn test_messages_name_the_item() {
        let r = Rejection::DepthExceeded { dragged: "Reports".to_string(), max_depth: 2 };
        assert_eq!(r.to_string(), "moving 'Reports' would exceed the maximum depth of 2");
    }
}
