// Dashboard grid layout engine.
//
// A dashboard is a set of widget placements, optionally sorted into named
// groups. Each group is packed independently onto a fixed-width column grid:
// left-to-right, top-to-bottom, one pass, with two small gap-filling rules.
//
// Submodules:
// - pack: single-group row packing and the auto-span rules
// - moves: drag-end handling (move a placement, renumber, repack)
//
// Output:
// - LayoutEdit with the updated layout plus per-group grid slots.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Rejection;

mod moves;
mod pack;

pub use moves::{apply_move, DropSlot, MoveEvent};
pub use pack::{pack_group, pack_layout, GroupPacking, PackedGroup};

/// Grid width used when the caller does not configure one.
pub const DEFAULT_COLUMNS: u32 = 4;

/// Reusable widget description; supplies the span limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub min_col_span: Option<u32>,
    #[serde(default)]
    pub max_col_span: Option<u32>,
    #[serde(default)]
    pub default_col_span: Option<u32>,
}

impl WidgetDefinition {
    pub fn new(id: &str, min: Option<u32>, max: Option<u32>, default: Option<u32>) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            min_col_span: min,
            max_col_span: max,
            default_col_span: default,
        }
    }
}

/// One widget instance on a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPlacement {
    pub widget_id: String,
    /// None => ungrouped
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub order: i64,
    /// Unset until the first packing pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
}

impl WidgetPlacement {
    pub fn new(widget_id: &str, group_id: Option<&str>, order: i64) -> Self {
        Self {
            widget_id: widget_id.to_string(),
            group_id: group_id.map(str::to_string),
            order,
            col_span: None,
        }
    }
}

/// Named, orderable container of placements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: i64,
    /// Page columns the group itself occupies.
    #[serde(default = "default_group_span")]
    pub col_span: u32,
    #[serde(default)]
    pub collapsed_default: bool,
}

fn default_group_span() -> u32 {
    DEFAULT_COLUMNS
}

impl Group {
    pub fn new(id: &str, order: i64) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            order,
            col_span: DEFAULT_COLUMNS,
            collapsed_default: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardLayout {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub widgets: Vec<WidgetPlacement>,
}

impl DashboardLayout {
    pub fn placement(&self, widget_id: &str) -> Option<&WidgetPlacement> {
        self.widgets.iter().find(|w| w.widget_id == widget_id)
    }

    pub fn has_group(&self, group_id: &str) -> bool {
        self.groups.iter().any(|g| g.id == group_id)
    }
}

/// Resolved span limits for one widget on a grid of a given width.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpanBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl SpanBounds {
    /// Missing limits fall back to `1..=columns` with a default of 1.
    /// Everything is clamped into the grid and `max >= min`.
    pub fn resolve(def: &WidgetDefinition, columns: u32) -> Self {
        let columns = columns.max(1);
        let min = def.min_col_span.unwrap_or(1).clamp(1, columns);
        let max = def.max_col_span.unwrap_or(columns).clamp(min, columns);
        let default = def.default_col_span.unwrap_or(1).clamp(min, max);
        Self { min, max, default }
    }

    pub fn clamp(&self, span: u32) -> u32 {
        span.clamp(self.min, self.max)
    }
}

/// Where one placement landed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSlot {
    pub widget_id: String,
    pub row: u32,
    pub col: u32,
    pub col_span: u32,
}

/// Rendered grid of one group (or the ungrouped area when `group_id` is None).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupGrid {
    pub group_id: Option<String>,
    pub slots: Vec<GridSlot>,
}

/// Result of a packing pass or a move.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdit {
    pub layout: DashboardLayout,
    /// Grids that were (re)packed by this edit.
    pub grids: Vec<GroupGrid>,
    /// Non-fatal problems, e.g. placements whose definition is missing.
    pub warnings: Vec<Rejection>,
}

pub(crate) type DefinitionMap<'a> = HashMap<&'a str, &'a WidgetDefinition>;

pub(crate) fn definition_map(defs: &[WidgetDefinition]) -> DefinitionMap<'_> {
    defs.iter().map(|d| (d.id.as_str(), d)).collect()
}
