//! Single-pass row packing for one group.
//!
//! Placements are laid out in `order`, left-to-right, wrapping when a row is
//! full. Two rules avoid visible holes:
//!
//! - backfill: when the next widget does not fit, the widget placed just
//!   before it grows to close the row, if its `max_col_span` allows;
//! - forward gap-fill: a widget that would leave a trailing gap narrower than
//!   its own `min_col_span` absorbs that gap, up to its `max_col_span`.
//!
//! This is a heuristic, not a bin packer. It never reorders placements and
//! never looks further back than one widget.

use tracing::{debug, warn};

use crate::error::Rejection;
use crate::layout::{
    definition_map, DashboardLayout, DefinitionMap, GridSlot, GroupGrid, LayoutEdit, SpanBounds,
    WidgetDefinition, WidgetPlacement,
};

/// Slots produced for one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPacking {
    pub slots: Vec<GridSlot>,
    /// Placements left out because their definition is missing.
    pub skipped: Vec<String>,
}

/// A packed copy of one group's placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedGroup {
    pub placements: Vec<WidgetPlacement>,
    pub slots: Vec<GridSlot>,
    pub skipped: Vec<String>,
}

/// Pack the placements of one group and return them with `col_span` assigned.
///
/// Placements whose definition is missing are returned unchanged and listed
/// in `skipped`.
pub fn pack_group(placements: &[WidgetPlacement], defs: &[WidgetDefinition], columns: u32) -> PackedGroup {
    let map = definition_map(defs);
    let mut out = placements.to_vec();
    let packing = {
        let mut refs: Vec<&mut WidgetPlacement> = out.iter_mut().collect();
        pack_refs(&mut refs, &map, columns)
    };
    PackedGroup { placements: out, slots: packing.slots, skipped: packing.skipped }
}

/// Pack every group of a layout: the ungrouped area first, then the groups
/// by their `order`. Placements pointing at an unknown group are left alone.
pub fn pack_layout(layout: &DashboardLayout, defs: &[WidgetDefinition], columns: u32) -> LayoutEdit {
    let map = definition_map(defs);
    let mut out = layout.clone();

    let mut group_ids: Vec<(i64, &str)> = layout.groups.iter().map(|g| (g.order, g.id.as_str())).collect();
    group_ids.sort_by_key(|&(order, _)| order);

    let mut buckets: Vec<Option<String>> = vec![None];
    buckets.extend(group_ids.into_iter().map(|(_, id)| Some(id.to_string())));

    let mut grids = Vec::with_capacity(buckets.len());
    let mut warnings = Vec::new();
    for group_id in buckets {
        let packing = pack_bucket(&mut out, &group_id, &map, columns);
        warnings.extend(
            packing
                .skipped
                .into_iter()
                .map(|widget_id| Rejection::DanglingWidgetReference { widget_id }),
        );
        grids.push(GroupGrid { group_id, slots: packing.slots });
    }

    let mut missing: Vec<&str> = Vec::new();
    for w in &layout.widgets {
        if let Some(gid) = w.group_id.as_deref() {
            if !layout.has_group(gid) {
                warn!(widget = %w.widget_id, group = gid, "placement in unknown group left unpacked");
                if !missing.contains(&gid) {
                    missing.push(gid);
                }
            }
        }
    }
    warnings.extend(missing.into_iter().map(|gid| Rejection::GroupNotFound(gid.to_string())));

    LayoutEdit { layout: out, grids, warnings }
}

/// Pack the placements of `layout` that belong to `group_id`, in place.
pub(crate) fn pack_bucket(
    layout: &mut DashboardLayout,
    group_id: &Option<String>,
    defs: &DefinitionMap<'_>,
    columns: u32,
) -> GroupPacking {
    let mut refs: Vec<&mut WidgetPlacement> =
        layout.widgets.iter_mut().filter(|w| &w.group_id == group_id).collect();
    pack_refs(&mut refs, defs, columns)
}

fn pack_refs(group: &mut [&mut WidgetPlacement], defs: &DefinitionMap<'_>, columns: u32) -> GroupPacking {
    let columns = columns.max(1);
    let mut skipped = Vec::new();
    let mut live: Vec<(&mut WidgetPlacement, SpanBounds)> = Vec::with_capacity(group.len());
    for p in group.iter_mut() {
        match defs.get(p.widget_id.as_str()) {
            Some(def) => {
                let bounds = SpanBounds::resolve(def, columns);
                live.push((&mut **p, bounds));
            }
            None => {
                warn!(widget = %p.widget_id, "placement references a missing widget definition");
                skipped.push(p.widget_id.clone());
            }
        }
    }
    // Stable: equal orders keep their input sequence
    live.sort_by_key(|(p, _)| p.order);

    let mut slots: Vec<GridSlot> = Vec::with_capacity(live.len());
    let mut col = 0;
    let mut row = 0;

    for i in 0..live.len() {
        let bounds = live[i].1;
        let mut span = bounds.clamp(live[i].0.col_span.unwrap_or(bounds.default));

        if col + span > columns {
            // Close the row by growing the widget just before this one
            let gap = columns - col;
            if gap > 0 && i > 0 {
                let prev_max = live[i - 1].1.max;
                let prev = &mut slots[i - 1];
                if prev.col_span + gap <= prev_max {
                    prev.col_span += gap;
                    live[i - 1].0.col_span = Some(prev.col_span);
                }
            }
            row += 1;
            col = 0;
        }

        let rest = columns - col - span;
        if rest > 0 && rest < bounds.min {
            span = (span + rest).min(bounds.max);
        }

        slots.push(GridSlot { widget_id: live[i].0.widget_id.clone(), row, col, col_span: span });
        live[i].0.col_span = Some(span);

        col += span;
        if col >= columns {
            row += 1;
            col = 0;
        }
    }

    debug!(placed = slots.len(), skipped = skipped.len(), columns, "group packed");
    GroupPacking { slots, skipped }
}
