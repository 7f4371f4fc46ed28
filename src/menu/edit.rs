/*!
 * Edit menu sections
 */

use super::{CustomKeyBinding, MenuEntry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const SPACE_KEY: &str = " ";

/// Colors offered by "Set Color": title, fill, stroke
const COLORS: &[(&str, Option<&str>, Option<&str>)] = &[
    ("Default", None, None),
    ("Blue", Some("rgb(187, 222, 251)"), Some("rgb(30, 136, 229)")),
    ("Orange", Some("rgb(255, 224, 178)"), Some("rgb(251, 140, 0)")),
    ("Green", Some("rgb(200, 230, 201)"), Some("rgb(67, 160, 71)")),
    ("Red", Some("rgb(255, 205, 210)"), Some("rgb(229, 57, 53)")),
    ("Purple", Some("rgb(225, 190, 231)"), Some("rgb(142, 36, 170)")),
];

const DIRECTIONS: [&str; 4] = ["Up", "Left", "Down", "Right"];

const ALIGNMENTS: [&str; 6] = ["Left", "Right", "Center", "Top", "Bottom", "Middle"];

/// Editor capabilities reported by the active tab.
///
/// `None` means the editor does not support the action at all; entries that
/// are only shown for supported actions are omitted in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditState {
    pub align: Option<bool>,
    pub distribute: Option<bool>,
    pub set_color: Option<bool>,
    pub move_canvas: Option<bool>,
    pub move_to_origin: Option<bool>,
    pub move_selection: Option<bool>,
    pub copy: Option<bool>,
    pub cut: Option<bool>,
    pub paste: Option<bool>,
    pub find: Option<bool>,
    pub input_active: Option<bool>,
    pub remove_selected: Option<bool>,
    pub select_all: Option<bool>,
    pub replace_element: Option<bool>,
    pub create_element: Option<bool>,
    pub append_element: Option<bool>,
    pub bpmn: Option<bool>,
    pub edit_label: Option<bool>,
    pub global_connect_tool: Option<bool>,
    pub hand_tool: Option<bool>,
    pub lasso_tool: Option<bool>,
    pub space_tool: Option<bool>,
    pub undo: Option<bool>,
    pub redo: Option<bool>,
}

pub fn align_distribute_entries(state: &EditState) -> Vec<MenuEntry> {
    let align = ALIGNMENTS
        .iter()
        .map(|direction| {
            MenuEntry::action(format!("Align {}", direction), "alignElements")
                .with_enabled(state.align)
                .with_options(json!({ "type": direction.to_lowercase() }))
        })
        .collect();

    let distribute = [("Distribute Horizontally", "horizontal"), ("Distribute Vertically", "vertical")]
        .into_iter()
        .map(|(label, kind)| {
            MenuEntry::action(label, "distributeElements")
                .with_enabled(state.distribute)
                .with_options(json!({ "type": kind }))
        })
        .collect();

    vec![
        MenuEntry::submenu("Align Elements", align).with_enabled(state.align),
        MenuEntry::submenu("Distribute Elements", distribute).with_enabled(state.distribute),
    ]
}

pub fn color_entries(state: &EditState) -> Vec<MenuEntry> {
    let colors = COLORS
        .iter()
        .map(|(title, fill, stroke)| {
            let mut options = Map::new();
            if let Some(fill) = fill {
                options.insert("fill".to_string(), Value::from(*fill));
            }
            if let Some(stroke) = stroke {
                options.insert("stroke".to_string(), Value::from(*stroke));
            }

            MenuEntry::action(*title, "setColor")
                .with_enabled(state.set_color)
                .with_options(Value::Object(options))
                .with_icon(format!("resources/icons/{}-circle.png", title.to_lowercase()))
        })
        .collect();

    vec![MenuEntry::submenu("Set Color", colors).with_enabled(state.set_color)]
}

/// Canvas movement entries.
///
/// "Move Canvas to Origin" is only offered when the editor supports it and
/// automatic origin adjustment is switched off.
pub fn canvas_entries(state: &EditState, disable_adjust_origin: bool) -> Vec<MenuEntry> {
    let mut entries = Vec::new();

    if state.move_to_origin.is_some() && disable_adjust_origin {
        entries.push(
            MenuEntry::action("Move Canvas to Origin", "moveToOrigin")
                .with_accelerator("CommandOrControl+Shift+O")
                .with_enabled(state.move_to_origin),
        );
    }

    let move_canvas = DIRECTIONS
        .iter()
        .flat_map(|direction| {
            let options = |speed: u32| json!({ "direction": direction.to_lowercase(), "speed": speed });
            [
                MenuEntry::action(*direction, "moveCanvas")
                    .with_accelerator(format!("CommandOrControl + {}", direction))
                    .with_enabled(state.move_canvas)
                    .with_options(options(50)),
                MenuEntry::action(format!("{} (Accelerated)", direction), "moveCanvas")
                    .with_accelerator(format!("CommandOrControl + Shift + {}", direction))
                    .with_enabled(state.move_canvas)
                    .with_options(options(200)),
            ]
        })
        .collect();

    let move_selection = DIRECTIONS
        .iter()
        .flat_map(|direction| {
            [
                MenuEntry::action(*direction, "moveSelection")
                    .with_accelerator(*direction)
                    .with_enabled(state.move_selection)
                    .with_options(json!({ "direction": direction.to_lowercase() })),
                MenuEntry::action(format!("{} (Accelerated)", direction), "moveSelection")
                    .with_accelerator(format!("Shift + {}", direction))
                    .with_enabled(state.move_selection)
                    .with_options(json!({
                        "direction": direction.to_lowercase(),
                        "accelerated": true
                    })),
            ]
        })
        .collect();

    entries.push(MenuEntry::submenu("Move Canvas", move_canvas).with_enabled(state.move_canvas));
    entries.push(
        MenuEntry::submenu("Move Selection", move_selection).with_enabled(state.move_selection),
    );

    entries
}

pub fn copy_cut_paste_entries(state: &EditState) -> Vec<MenuEntry> {
    vec![
        MenuEntry::action("Copy", "copy")
            .with_accelerator("CommandOrControl + C")
            .with_enabled(state.copy),
        MenuEntry::action("Cut", "cut")
            .with_accelerator("CommandOrControl + X")
            .with_enabled(state.cut),
        MenuEntry::action("Paste", "paste")
            .with_accelerator("CommandOrControl + V")
            .with_enabled(state.paste),
    ]
}

/// Copy/cut/paste handled natively, for text inputs
pub fn default_copy_cut_paste_entries(input_active: bool) -> Vec<MenuEntry> {
    ["Copy", "Cut", "Paste"]
        .into_iter()
        .map(|label| MenuEntry::role(label, label.to_lowercase()).with_enabled(Some(input_active)))
        .collect()
}

pub fn find_entries(state: &EditState) -> Vec<MenuEntry> {
    vec![MenuEntry::action("Find", "find")
        .with_accelerator("CommandOrControl+F")
        .with_enabled(state.find)]
}

pub fn selection_entries(state: &EditState) -> Vec<MenuEntry> {
    let input_active = state.input_active == Some(true);
    let mut entries = Vec::new();

    if state.select_all.is_some() {
        entries.push(
            MenuEntry::action("Select All", "selectElements")
                .with_accelerator("CommandOrControl + A")
                .with_enabled(state.select_all)
                .with_role(input_active.then_some("selectAll")),
        );
    }

    if state.remove_selected.is_some() {
        entries.push(
            MenuEntry::action("Remove Selected", "removeSelection")
                .with_accelerator("Delete")
                .with_enabled(state.remove_selected)
                .with_role(input_active.then_some("delete")),
        );
    }

    if state.append_element.is_some() {
        entries.push(
            MenuEntry::action("Append Element", "appendElement")
                .with_accelerator("A")
                .with_enabled(state.append_element),
        );
    }

    if state.create_element.is_some() {
        entries.push(
            MenuEntry::action("Create Element", "createElement")
                .with_accelerator("N")
                .with_enabled(state.create_element)
                .with_options(json!({ "opt": "bpmn:Task" })),
        );
    }

    if state.replace_element.is_some() {
        entries.push(
            MenuEntry::action("Replace Element", "replaceElement")
                .with_accelerator("R")
                .with_enabled(state.replace_element),
        );
    }

    entries
}

pub fn tool_entries(state: &EditState) -> Vec<MenuEntry> {
    let mut entries = Vec::new();

    if state.hand_tool.is_some() {
        entries.push(
            MenuEntry::action("Hand Tool", "handTool")
                .with_accelerator("H")
                .with_enabled(state.hand_tool),
        );

        // hold space to pan in BPMN editors
        if state.bpmn == Some(true) && state.hand_tool == Some(true) {
            entries.push(MenuEntry {
                label: Some("I'm invisible!".to_string()),
                visible: Some(false),
                custom: Some(CustomKeyBinding {
                    key: SPACE_KEY.to_string(),
                    keypress: "activateHandtool".to_string(),
                    keyup: "deactivateHandtool".to_string(),
                }),
                ..Default::default()
            });
        }
    }

    let optional = [
        (state.lasso_tool, "Lasso Tool", "L", "lassoTool"),
        (state.space_tool, "Space Tool", "S", "spaceTool"),
        (
            state.global_connect_tool,
            "Global Connect Tool",
            "C",
            "globalConnectTool",
        ),
        (state.edit_label, "Edit Label", "E", "directEditing"),
    ];

    for (enabled, label, accelerator, action) in optional {
        if enabled.is_some() {
            entries.push(
                MenuEntry::action(label, action)
                    .with_accelerator(accelerator)
                    .with_enabled(enabled),
            );
        }
    }

    entries
}

/// Undo/redo dispatched to the editor rather than handled natively
pub fn undo_redo_entries(state: &EditState) -> Vec<MenuEntry> {
    vec![
        MenuEntry::action("Undo", "undo")
            .with_accelerator("CommandOrControl+Z")
            .with_enabled(state.undo),
        MenuEntry::action("Redo", "redo")
            .with_accelerator("CommandOrControl+Y")
            .with_enabled(state.redo),
    ]
}

pub fn default_undo_redo_entries(input_active: bool) -> Vec<MenuEntry> {
    vec![
        MenuEntry::role("Undo", "undo").with_enabled(Some(input_active)),
        MenuEntry::role("Redo", "redo").with_enabled(Some(input_active)),
    ]
}

/// Full edit menu of a BPMN editor tab.
///
/// While a text input has focus, undo/redo and the clipboard entries fall back
/// to their native roles.
pub fn bpmn_edit_menu(state: &EditState, disable_adjust_origin: bool) -> Vec<MenuEntry> {
    let input_active = state.input_active == Some(true);

    let (undo_redo, clipboard) = if input_active {
        (
            default_undo_redo_entries(true),
            default_copy_cut_paste_entries(true),
        )
    } else {
        (undo_redo_entries(state), copy_cut_paste_entries(state))
    };

    let sections = [
        undo_redo,
        clipboard,
        tool_entries(state),
        align_distribute_entries(state),
        color_entries(state),
        canvas_entries(state, disable_adjust_origin),
        selection_entries(state),
        find_entries(state),
    ];

    let mut menu = Vec::new();
    for section in sections.into_iter().filter(|section| !section.is_empty()) {
        if !menu.is_empty() {
            menu.push(MenuEntry::separator());
        }
        menu.extend(section);
    }

    menu
}
