use std::str::FromStr;

use crate::snapshot::element::{
    BUTTON, C_TEXT_FIELD, CHECK_BOX, COMBO_BOX, LABEL, MENU, PASSWORD_FIELD, RADIO_BUTTON, TAB,
    TEXT_FIELD,
};

/// Controls a locator normally points at, in candidate enumeration order.
pub const DEFAULT_TARGET_TYPES: &[&str] = &[
    TEXT_FIELD,
    C_TEXT_FIELD,
    PASSWORD_FIELD,
    COMBO_BOX,
    CHECK_BOX,
    RADIO_BUTTON,
    BUTTON,
    TAB,
];

/// Types that may serve as label anchors. Read-only text fields are
/// sometimes used as captions.
pub const LABEL_ELEMENT_TYPES: &[&str] = &[LABEL, TEXT_FIELD, C_TEXT_FIELD];

const PRESS_TYPES: &[&str] = &[BUTTON, TAB];
const WRITE_TYPES: &[&str] = &[TEXT_FIELD, C_TEXT_FIELD, PASSWORD_FIELD, COMBO_BOX];
const READ_TYPES: &[&str] = &[TEXT_FIELD, C_TEXT_FIELD, PASSWORD_FIELD, COMBO_BOX, LABEL];
const SELECT_TYPES: &[&str] = &[CHECK_BOX, RADIO_BUTTON, TAB, MENU];
const SELECTED_TYPES: &[&str] = &[CHECK_BOX, RADIO_BUTTON];
const CHECKBOX_TYPES: &[&str] = &[CHECK_BOX];

/// What the caller intends to do with the resolved control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPurpose {
    Press,
    Write,
    Read,
    Select,
    /// Query whether a check box or radio button is selected.
    Selected,
    Checkbox,
    Any,
}

impl TargetPurpose {
    pub fn types(self) -> &'static [&'static str] {
        match self {
            TargetPurpose::Press => PRESS_TYPES,
            TargetPurpose::Write => WRITE_TYPES,
            TargetPurpose::Read => READ_TYPES,
            TargetPurpose::Select => SELECT_TYPES,
            TargetPurpose::Selected => SELECTED_TYPES,
            TargetPurpose::Checkbox => CHECKBOX_TYPES,
            TargetPurpose::Any => DEFAULT_TARGET_TYPES,
        }
    }
}

impl FromStr for TargetPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "press" => Ok(TargetPurpose::Press),
            "write" => Ok(TargetPurpose::Write),
            "read" => Ok(TargetPurpose::Read),
            "select" => Ok(TargetPurpose::Select),
            "selected" => Ok(TargetPurpose::Selected),
            "checkbox" => Ok(TargetPurpose::Checkbox),
            "any" => Ok(TargetPurpose::Any),
            other => Err(format!(
                "unknown purpose '{}' (expected press, write, read, select, selected, checkbox or any)",
                other
            )),
        }
    }
}
