//! Layout core for the business-app builder.
//!
//! Two pure engines back the drag-and-drop editors of the admin console:
//!
//! - [`nav`]: the navigation tree (at most three levels), sibling reorder,
//!   moving items between folders, display flattening.
//! - [`layout`]: the dashboard widget grid, packing groups of placements
//!   onto a fixed column count and handling drag-end moves.
//!
//! Both take collections by reference and return the updated collection plus
//! what changed; persisting those changes is up to the caller. The
//! `wasm` module exposes everything to the browser as JSON in / JSON out.
//!
//! The engines emit `tracing` events but never install a subscriber; a
//! native host that wants them sets one up itself.

pub mod error;
pub mod layout;
pub mod nav;
pub mod output;
pub mod settings;
mod wasm;

pub use error::{Rejection, Result};
pub use layout::{
    apply_move, pack_group, pack_layout, DashboardLayout, DropSlot, Group, GridSlot, GroupGrid, LayoutEdit,
    MoveEvent, PackedGroup, SpanBounds, WidgetDefinition, WidgetPlacement, DEFAULT_COLUMNS,
};
pub use nav::{
    add_node, can_reparent, check_reparent, depth, flatten, max_descendant_depth, parent_options, remove_node,
    reorder_siblings, reorder_within_parent, reparent, FlatNode, NavEdit, NavNode, NavUpdate, NewNavNode,
    MAX_DEPTH,
};
pub use settings::{EnginePreferences, SettingsStore, SettingsTopic, SubscriptionId};
