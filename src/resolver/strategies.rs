use tracing::debug;

use crate::geometry::position::{Position, Tolerances};
use crate::locator::strategy::LocatorStrategy;
use crate::resolver::resolver::NotFoundReason;
use crate::snapshot::cache::Snapshot;
use crate::snapshot::element::ElementInfo;

// ============================================================================
// Matcher: one resolve call's view of the snapshot
// ============================================================================

/// Runs a strategy over one snapshot.
///
/// `candidates` is already filtered to the allowed types and is in
/// enumeration order; every "nearest" selection keeps the first of equally
/// near candidates.
pub struct Matcher<'a> {
    snapshot: &'a Snapshot,
    candidates: Vec<&'a ElementInfo>,
    label_types: &'a [String],
    tolerances: Tolerances,
}

impl<'a> Matcher<'a> {
    pub fn new<T: AsRef<str>>(
        snapshot: &'a Snapshot,
        allowed_types: &'a [T],
        label_types: &'a [String],
        tolerances: Tolerances,
    ) -> Self {
        Self {
            snapshot,
            candidates: snapshot.of_types(allowed_types).collect(),
            label_types,
            tolerances,
        }
    }

    pub fn candidates(&self) -> &[&'a ElementInfo] {
        &self.candidates
    }

    pub fn run(&self, strategy: &LocatorStrategy) -> Result<&'a ElementInfo, NotFoundReason> {
        match strategy {
            LocatorStrategy::Content { value } => self.content(value),
            LocatorStrategy::HLabel { label } => self.h_label(label),
            LocatorStrategy::VLabel { label } => self.v_label(label),
            LocatorStrategy::HLabelVLabel { h_label, v_label } => {
                self.h_label_v_label(h_label, v_label)
            }
            LocatorStrategy::HLabelHLabel {
                left_label,
                right_label,
            } => self.h_label_h_label(left_label, right_label),
        }
    }

    // ========================================================================
    // Strategies
    // ========================================================================

    /// Text match anywhere in the snapshot beats any tooltip match.
    fn content(&self, value: &str) -> Result<&'a ElementInfo, NotFoundReason> {
        let all = self.snapshot.elements();
        all.iter()
            .find(|el| el.has_text(value))
            .or_else(|| all.iter().find(|el| el.has_tooltip(value)))
            .ok_or(NotFoundReason::NoMatch)
    }

    fn h_label(&self, label: &str) -> Result<&'a ElementInfo, NotFoundReason> {
        let anchor = self.require_label(label)?.position;
        nearest(
            self.candidates.iter().copied().filter(|c| {
                self.same_row(&c.position, &anchor) && self.right_of(&c.position, &anchor)
            }),
            |c| c.position.gap_right_of(&anchor),
        )
    }

    fn v_label(&self, label: &str) -> Result<&'a ElementInfo, NotFoundReason> {
        let anchor = self.require_label(label)?.position;
        nearest(
            self.candidates.iter().copied().filter(|c| {
                self.same_column(&c.position, &anchor) && self.below(&c.position, &anchor)
            }),
            |c| c.position.gap_below(&anchor),
        )
    }

    fn h_label_v_label(&self, h_label: &str, v_label: &str) -> Result<&'a ElementInfo, NotFoundReason> {
        let row = self.require_label(h_label)?.position;
        let column = self.require_label(v_label)?.position;

        nearest(
            self.candidates.iter().copied().filter(|c| {
                let p = &c.position;
                self.same_row(p, &row)
                    && self.same_column(p, &column)
                    && p.left() >= row.right()
                    && p.top() >= column.bottom()
            }),
            |c| c.position.distance_squared_to_point(row.right(), column.bottom()),
        )
    }

    fn h_label_h_label(&self, left: &str, right: &str) -> Result<&'a ElementInfo, NotFoundReason> {
        let anchor = match self
            .find_label(left)
            .or_else(|| self.candidates.iter().copied().find(|c| c.has_text(left)))
        {
            Some(el) => el.position,
            None => {
                debug!(label = left, "Left element not found for HLabelHLabel search");
                return Err(NotFoundReason::LabelMissing(left.to_string()));
            }
        };

        nearest(
            self.candidates.iter().copied().filter(|c| {
                (c.has_text(right) || c.has_tooltip(right))
                    && self.same_row(&c.position, &anchor)
                    && self.right_of(&c.position, &anchor)
            }),
            |c| c.position.gap_right_of(&anchor),
        )
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// First label-type element with exactly this text.
    pub fn find_label(&self, text: &str) -> Option<&'a ElementInfo> {
        self.snapshot
            .of_types(self.label_types)
            .find(|el| el.can_act_as_label() && el.has_text(text))
    }

    fn require_label(&self, text: &str) -> Result<&'a ElementInfo, NotFoundReason> {
        self.find_label(text).ok_or_else(|| {
            debug!(label = text, "Label not found");
            NotFoundReason::LabelMissing(text.to_string())
        })
    }

    fn same_row(&self, a: &Position, b: &Position) -> bool {
        a.is_horizontally_aligned_within(b, self.tolerances.horizontal)
    }

    fn same_column(&self, a: &Position, b: &Position) -> bool {
        a.is_vertically_aligned_within(b, self.tolerances.vertical)
    }

    fn right_of(&self, a: &Position, b: &Position) -> bool {
        a.is_right_of_within(b, self.tolerances.gap)
    }

    fn below(&self, a: &Position, b: &Position) -> bool {
        a.is_below_within(b, self.tolerances.gap)
    }
}

/// The element with the smallest key; the first one wins ties.
fn nearest<'a, K: Ord>(
    candidates: impl Iterator<Item = &'a ElementInfo>,
    key: impl Fn(&ElementInfo) -> K,
) -> Result<&'a ElementInfo, NotFoundReason> {
    candidates
        .min_by_key(|c| key(c))
        .ok_or(NotFoundReason::NoMatch)
}
