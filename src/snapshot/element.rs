use serde::{Deserialize, Serialize};

use crate::geometry::position::Position;

/// Opaque, session-stable handle of an on-screen control.
pub type ElementId = String;

/// Identifier of the active window a snapshot was taken from.
pub type WindowId = String;

pub const TEXT_FIELD: &str = "GuiTextField";
pub const C_TEXT_FIELD: &str = "GuiCTextField";
pub const PASSWORD_FIELD: &str = "GuiPasswordField";
pub const COMBO_BOX: &str = "GuiComboBox";
pub const CHECK_BOX: &str = "GuiCheckBox";
pub const RADIO_BUTTON: &str = "GuiRadioButton";
pub const BUTTON: &str = "GuiButton";
pub const TAB: &str = "GuiTab";
pub const LABEL: &str = "GuiLabel";
pub const MENU: &str = "GuiMenu";

/// Recorded when the node's type could not be read.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// One indexed control from the active window.
///
/// Identity is the `id`; two infos with equal fields but different ids
/// describe different controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementInfo {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub element_type: String,
    pub text: Option<String>,
    pub tooltip: Option<String>,
    pub name: Option<String>,
    pub editable: Option<bool>,
    pub position: Position,
}

impl PartialEq for ElementInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ElementInfo {}

impl ElementInfo {
    pub fn has_text(&self, value: &str) -> bool {
        self.text.as_deref() == Some(value)
    }

    pub fn has_tooltip(&self, value: &str) -> bool {
        self.tooltip.as_deref() == Some(value)
    }

    /// Text fields only read as labels when nothing says they accept input.
    pub fn can_act_as_label(&self) -> bool {
        match self.element_type.as_str() {
            LABEL => true,
            TEXT_FIELD | C_TEXT_FIELD => self.editable != Some(true),
            _ => true,
        }
    }
}
