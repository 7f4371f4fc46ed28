/*!
 * Window menu of the BPMN editor
 */

use super::MenuEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowMenuState {
    pub zoom: bool,
    pub properties_panel: bool,
}

pub fn bpmn_window_menu(state: &WindowMenuState) -> Vec<MenuEntry> {
    let mut entries = zoom_entries(state);
    entries.extend(properties_panel_entries(state));
    entries
}

fn zoom_entries(state: &WindowMenuState) -> Vec<MenuEntry> {
    if !state.zoom {
        return Vec::new();
    }

    vec![
        // shown as Ctrl + = since Ctrl + + renders incorrectly
        MenuEntry::action("Zoom In", "zoomIn").with_accelerator("CommandOrControl+="),
        MenuEntry::action("Zoom Out", "zoomOut").with_accelerator("CommandOrControl+-"),
        MenuEntry::action("Zoom to Actual Size", "resetZoom").with_accelerator("CommandOrControl+0"),
        MenuEntry::action("Zoom to Fit Diagram", "zoomFit").with_accelerator("CommandOrControl+1"),
        MenuEntry::separator(),
    ]
}

fn properties_panel_entries(state: &WindowMenuState) -> Vec<MenuEntry> {
    if !state.properties_panel {
        return Vec::new();
    }

    vec![
        MenuEntry::action("Toggle Properties Panel", "toggleProperties")
            .with_accelerator("CommandOrControl+P"),
        MenuEntry::action("Reset Properties Panel", "resetProperties")
            .with_accelerator("CommandOrControl+Shift+P"),
    ]
}
