/*!
 * Application menu entries
 *
 * Entries are plain data handed to the desktop shell, which renders them and
 * dispatches `action` back to the active editor. Fields that are not set are
 * left out of the serialized form.
 */

pub mod bpmn;
pub mod edit;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use bpmn::{bpmn_window_menu, WindowMenuState};
pub use edit::{bpmn_edit_menu, EditState};

/// A single menu item, submenu or separator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// `separator` for separators, unset otherwise
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Native role handled by the shell instead of the editor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submenu: Option<Vec<MenuEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomKeyBinding>,
}

/// Key binding the shell wires up without showing an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomKeyBinding {
    pub key: String,
    pub keypress: String,
    pub keyup: String,
}

impl MenuEntry {
    /// Item dispatching `action` to the editor
    pub fn action(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            action: Some(action.into()),
            ..Default::default()
        }
    }

    /// Item handled natively through `role`
    pub fn role(label: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            role: Some(role.into()),
            ..Default::default()
        }
    }

    pub fn submenu(label: impl Into<String>, entries: Vec<MenuEntry>) -> Self {
        Self {
            label: Some(label.into()),
            submenu: Some(entries),
            ..Default::default()
        }
    }

    pub fn separator() -> Self {
        Self {
            kind: Some("separator".to_string()),
            ..Default::default()
        }
    }

    pub fn with_accelerator(mut self, accelerator: impl Into<String>) -> Self {
        self.accelerator = Some(accelerator.into());
        self
    }

    pub fn with_enabled(mut self, enabled: Option<bool>) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_role(mut self, role: Option<&str>) -> Self {
        self.role = role.map(str::to_string);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn is_separator(&self) -> bool {
        self.kind.as_deref() == Some("separator")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_omitted() {
        let entry = MenuEntry::action("Find", "find")
            .with_accelerator("CommandOrControl+F")
            .with_enabled(Some(true));

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "label": "Find",
                "accelerator": "CommandOrControl+F",
                "enabled": true,
                "action": "find"
            })
        );
    }

    #[test]
    fn test_separator() {
        let separator = MenuEntry::separator();

        assert!(separator.is_separator());
        assert_eq!(
            serde_json::to_value(&separator).unwrap(),
            json!({ "type": "separator" })
        );
    }
}
