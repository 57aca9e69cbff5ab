//! Drag-end handling for dashboard widgets.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Rejection, Result};
use crate::layout::pack::pack_bucket;
use crate::layout::{definition_map, DashboardLayout, GroupGrid, LayoutEdit, WidgetDefinition};

/// A list position as reported by the drag-and-drop layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropSlot {
    /// None => the ungrouped area
    #[serde(default)]
    pub group_id: Option<String>,
    pub index: usize,
}

/// A finished drag. `destination` is None when the widget was dropped
/// outside every list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub widget_id: String,
    pub source: DropSlot,
    #[serde(default)]
    pub destination: Option<DropSlot>,
}

/// Apply a drag-end event.
///
/// The placement is found by `widget_id`, inserted at `destination.index`
/// in the destination group, the destination group is renumbered `0..n-1`
/// and repacked. The source group keeps its orders and spans.
pub fn apply_move(
    layout: &DashboardLayout,
    event: &MoveEvent,
    defs: &[WidgetDefinition],
    columns: u32,
) -> Result<LayoutEdit> {
    let Some(dest) = &event.destination else {
        return Ok(LayoutEdit { layout: layout.clone(), grids: Vec::new(), warnings: Vec::new() });
    };

    let moved = layout
        .widgets
        .iter()
        .position(|w| w.widget_id == event.widget_id)
        .ok_or_else(|| Rejection::WidgetNotFound(event.widget_id.clone()))?;
    if let Some(gid) = dest.group_id.as_deref() {
        if !layout.has_group(gid) {
            return Err(Rejection::GroupNotFound(gid.to_string()));
        }
    }

    let mut out = layout.clone();

    let mut seq: Vec<usize> = (0..out.widgets.len())
        .filter(|&i| i != moved && out.widgets[i].group_id == dest.group_id)
        .collect();
    seq.sort_by_key(|&i| out.widgets[i].order);
    seq.insert(dest.index.min(seq.len()), moved);

    out.widgets[moved].group_id = dest.group_id.clone();
    for (n, &i) in seq.iter().enumerate() {
        out.widgets[i].order = n as i64;
    }

    let map = definition_map(defs);
    let packing = pack_bucket(&mut out, &dest.group_id, &map, columns);
    let warnings = packing
        .skipped
        .into_iter()
        .map(|widget_id| Rejection::DanglingWidgetReference { widget_id })
        .collect();

    debug!(
        widget = %event.widget_id,
        from = ?event.source.group_id,
        from_index = event.source.index,
        to = ?dest.group_id,
        to_index = dest.index,
        "widget moved"
    );
    Ok(LayoutEdit {
        layout: out,
        grids: vec![GroupGrid { group_id: dest.group_id.clone(), slots: packing.slots }],
        warnings,
    })
}
