use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The closed set of locator forms.
///
/// Adding a variant means extending both the parser and the resolver; the
/// resolver matches on this exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocatorStrategy {
    /// `=value`: an element whose text (or, failing that, tooltip) is `value`.
    Content { value: String },
    /// `label`: nearest control to the right of a label.
    HLabel { label: String },
    /// `@ label`: nearest control below a label.
    VLabel { label: String },
    /// `row @ column`: the control at the crossing of a row label and a column label.
    HLabelVLabel { h_label: String, v_label: String },
    /// `left >> right`: a control labelled `right` to the right of `left`.
    HLabelHLabel { left_label: String, right_label: String },
}

impl fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorStrategy::Content { value } => write!(f, "Content({:?})", value),
            LocatorStrategy::HLabel { label } => write!(f, "HLabel({:?})", label),
            LocatorStrategy::VLabel { label } => write!(f, "VLabel({:?})", label),
            LocatorStrategy::HLabelVLabel { h_label, v_label } => {
                write!(f, "HLabelVLabel({:?}, {:?})", h_label, v_label)
            }
            LocatorStrategy::HLabelHLabel {
                left_label,
                right_label,
            } => write!(f, "HLabelHLabel({:?}, {:?})", left_label, right_label),
        }
    }
}

/// Index-based forms that are recognised but have no matching rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnsupportedKind {
    /// `index @ label`
    HIndexVLabel,
    /// `label @ index`
    HLabelVIndex,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedKind::HIndexVLabel => write!(f, "index @ label"),
            UnsupportedKind::HLabelVIndex => write!(f, "label @ index"),
        }
    }
}

/// Why a locator string did not produce a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("invalid locator '{locator}': {reason}")]
    Parse { locator: String, reason: String },

    #[error("unsupported locator '{locator}': {kind} locators are not implemented")]
    Unsupported { locator: String, kind: UnsupportedKind },
}

impl LocatorError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, LocatorError::Unsupported { .. })
    }
}
