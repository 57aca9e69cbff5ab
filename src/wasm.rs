//! WASM bindings for the builder core.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Collections travel as JSON strings; responses are JSON strings built from
//! the types in [`crate::output`].
//!
//! Nothing here installs a `tracing` subscriber, so in the browser the engine
//! events are dropped. What the user should see in the console (malformed
//! input, refused edits, settings changes) is written with the console
//! externs below.

use std::cell::RefCell;
use std::collections::HashSet;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::layout::{apply_move, pack_layout, DashboardLayout, MoveEvent, WidgetDefinition};
use crate::nav::{self, NavNode, NewNavNode};
use crate::output::{GridOutput, NavOutput, RejectionInfo};
use crate::settings::{EnginePreferences, SettingsStore, SettingsTopic};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    pub fn console_warn(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = debug)]
    pub fn console_debug(s: &str);
}

thread_local! {
    static PREFERENCES: RefCell<SettingsStore<EnginePreferences>> = RefCell::new(preferences_store());
}

fn preferences_store() -> SettingsStore<EnginePreferences> {
    let mut store = SettingsStore::default();
    store.subscribe(SettingsTopic::SiteSettings, |p: &EnginePreferences| {
        console_debug(&format!("site settings changed: {} grid columns", p.grid_columns));
    });
    store.subscribe(SettingsTopic::UiPreferences, |p: &EnginePreferences| {
        console_debug(&format!("ui preferences changed: {} collapsed folders", p.collapsed_nav.len()));
    });
    store
}

fn preferences() -> EnginePreferences {
    PREFERENCES.with(|store| store.borrow().get().clone())
}

/// Set the dashboard grid width used by the grid functions.
#[wasm_bindgen]
pub fn set_grid_columns(columns: u32) {
    PREFERENCES.with(|store| {
        store.borrow_mut().update(SettingsTopic::SiteSettings, |p| p.grid_columns = columns.max(1));
    });
}

/// Set which navigation folders are collapsed in the tree view.
/// Takes a JSON array of ids. Returns false if the input is not one.
#[wasm_bindgen]
pub fn set_collapsed_nav(ids_json: &str) -> bool {
    match serde_json::from_str::<Vec<String>>(ids_json) {
        Ok(ids) => {
            PREFERENCES.with(|store| {
                store.borrow_mut().update(SettingsTopic::UiPreferences, |p| p.collapsed_nav = ids);
            });
            true
        }
        Err(e) => {
            console_error(&format!("Invalid collapsed list: {}", e));
            false
        }
    }
}

/// Display list of the navigation tree: `[{node, depth}]`.
#[wasm_bindgen]
pub fn nav_flatten(nodes_json: &str) -> String {
    let collapsed = preferences().collapsed();
    flatten_json(nodes_json, &collapsed).unwrap_or_else(|e| {
        console_error(&format!("Error reading navigation items: {}", e));
        to_json(&NavOutput::invalid(e.to_string()))
    })
}

/// Drag-reorder; `destination_index` is a row of the current display list.
#[wasm_bindgen]
pub fn nav_reorder(nodes_json: &str, dragged_id: &str, destination_index: usize) -> String {
    let collapsed = preferences().collapsed();
    report_nav(nav_json(nodes_json, |nodes| {
        nav::reorder_siblings(nodes, dragged_id, destination_index, &collapsed)
    }))
}

/// Move an item into a folder. An empty `target_id` moves it to the root level.
#[wasm_bindgen]
pub fn nav_reparent(nodes_json: &str, dragged_id: &str, target_id: &str) -> String {
    let target = if target_id.is_empty() { None } else { Some(target_id) };
    report_nav(nav_json(nodes_json, |nodes| nav::reparent(nodes, dragged_id, target)))
}

/// Legal "move to folder" targets for an item.
#[wasm_bindgen]
pub fn nav_parent_options(nodes_json: &str, node_id: &str) -> String {
    report_nav(parent_options_json(nodes_json, node_id))
}

#[wasm_bindgen]
pub fn nav_add_node(nodes_json: &str, new_node_json: &str) -> String {
    let result = serde_json::from_str::<NewNavNode>(new_node_json)
        .and_then(|new| nav_json(nodes_json, move |nodes| nav::add_node(nodes, new)));
    report_nav(result)
}

#[wasm_bindgen]
pub fn nav_remove_node(nodes_json: &str, node_id: &str) -> String {
    report_nav(nav_json(nodes_json, |nodes| nav::remove_node(nodes, node_id)))
}

/// Pack every group of a dashboard, e.g. on first load.
#[wasm_bindgen]
pub fn grid_pack_layout(layout_json: &str, defs_json: &str) -> String {
    let columns = preferences().columns();
    report_grid(pack_layout_json(layout_json, defs_json, columns))
}

/// Apply a drag-end event to a dashboard and repack the destination group.
#[wasm_bindgen]
pub fn grid_apply_move(layout_json: &str, move_json: &str, defs_json: &str) -> String {
    let columns = preferences().columns();
    report_grid(apply_move_json(layout_json, move_json, defs_json, columns))
}

fn flatten_json(nodes_json: &str, collapsed: &HashSet<String>) -> serde_json::Result<String> {
    let nodes: Vec<NavNode> = serde_json::from_str(nodes_json)?;
    Ok(to_json(&nav::flatten(&nodes, collapsed)))
}

fn nav_json(
    nodes_json: &str,
    op: impl FnOnce(&[NavNode]) -> crate::error::Result<nav::NavEdit>,
) -> serde_json::Result<NavOutput> {
    let nodes: Vec<NavNode> = serde_json::from_str(nodes_json)?;
    Ok(NavOutput::from_result(op(&nodes)))
}

fn parent_options_json(nodes_json: &str, node_id: &str) -> serde_json::Result<NavOutput> {
    let nodes: Vec<NavNode> = serde_json::from_str(nodes_json)?;
    Ok(match nav::parent_options(&nodes, node_id) {
        Ok(options) => NavOutput { options: Some(options.into_iter().cloned().collect()), ..NavOutput::default() },
        Err(r) => NavOutput::from_result(Err(r)),
    })
}

fn pack_layout_json(layout_json: &str, defs_json: &str, columns: u32) -> serde_json::Result<GridOutput> {
    let layout: DashboardLayout = serde_json::from_str(layout_json)?;
    let defs: Vec<WidgetDefinition> = serde_json::from_str(defs_json)?;
    Ok(GridOutput::from_result(Ok(pack_layout(&layout, &defs, columns))))
}

fn apply_move_json(layout_json: &str, move_json: &str, defs_json: &str, columns: u32) -> serde_json::Result<GridOutput> {
    let layout: DashboardLayout = serde_json::from_str(layout_json)?;
    let event: MoveEvent = serde_json::from_str(move_json)?;
    let defs: Vec<WidgetDefinition> = serde_json::from_str(defs_json)?;
    Ok(GridOutput::from_result(apply_move(&layout, &event, &defs, columns)))
}

fn report_nav(result: serde_json::Result<NavOutput>) -> String {
    match result {
        Ok(out) => {
            if let Some(msg) = rejection_notice("Navigation edit", out.rejection.as_ref()) {
                console_warn(&msg);
            }
            to_json(&out)
        }
        Err(e) => {
            console_error(&format!("Error reading navigation input: {}", e));
            to_json(&NavOutput::invalid(e.to_string()))
        }
    }
}

fn report_grid(result: serde_json::Result<GridOutput>) -> String {
    match result {
        Ok(out) => {
            if let Some(msg) = rejection_notice("Dashboard edit", out.rejection.as_ref()) {
                console_warn(&msg);
            }
            for w in &out.warnings {
                console_warn(&format!("Dashboard layout: {} ({})", w.message, w.code));
            }
            to_json(&out)
        }
        Err(e) => {
            console_error(&format!("Error reading dashboard input: {}", e));
            to_json(&GridOutput::invalid(e.to_string()))
        }
    }
}

fn rejection_notice(what: &str, rejection: Option<&RejectionInfo>) -> Option<String> {
    rejection.map(|r| format!("{} refused: {} ({})", what, r.message, r.code))
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{\"error\": {\"message\": \"serialization failed\"}}".to_string())
}
