//! Output types for the front-end.
//!
//! These structs are serialized to JSON and handed back across the wasm
//! boundary. Every response carries either a result, a `rejection` (an
//! expected, user-triggered refusal) or an `error` (malformed input).

use serde::Serialize;

use crate::error::Rejection;
use crate::layout::{DashboardLayout, GroupGrid, LayoutEdit};
use crate::nav::{NavEdit, NavNode, NavUpdate};

/// Why an operation was refused, for toasts in the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionInfo {
    /// e.g. "cross_level_reorder", "depth_exceeded", "cycle_detected"
    pub code: &'static str,
    pub message: String,
}

impl From<&Rejection> for RejectionInfo {
    fn from(r: &Rejection) -> Self {
        Self { code: r.code(), message: r.to_string() }
    }
}

/// Input that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NavOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NavNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updates: Vec<NavUpdate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
    /// Legal parents, for the "move to folder" picker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<NavNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl NavOutput {
    pub fn from_result(result: Result<NavEdit, Rejection>) -> Self {
        match result {
            Ok(edit) => Self {
                nodes: edit.nodes,
                updates: edit.updates,
                removed: edit.removed,
                ..Self::default()
            },
            Err(r) => Self { rejection: Some(RejectionInfo::from(&r)), ..Self::default() },
        }
    }

    pub fn invalid(message: String) -> Self {
        Self { error: Some(ErrorInfo { message }), ..Self::default() }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GridOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<DashboardLayout>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub grids: Vec<GroupGrid>,
    /// Non-fatal problems such as dangling widget references
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RejectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl GridOutput {
    pub fn from_result(result: Result<LayoutEdit, Rejection>) -> Self {
        match result {
            Ok(edit) => Self {
                warnings: edit.warnings.iter().map(RejectionInfo::from).collect(),
                layout: Some(edit.layout),
                grids: edit.grids,
                ..Self::default()
            },
            Err(r) => Self { rejection: Some(RejectionInfo::from(&r)), ..Self::default() },
        }
    }

    pub fn invalid(message: String) -> Self {
        Self { error: Some(ErrorInfo { message }), ..Self::default() }
    }
}
