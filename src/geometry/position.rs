use serde::{Deserialize, Serialize};

/// Same-row tolerance: maximum distance between vertical centers.
pub const HORIZONTAL_ALIGN_TOLERANCE: i32 = 5;
/// Same-column tolerance: maximum distance between horizontal centers.
pub const VERTICAL_ALIGN_TOLERANCE: i32 = 8;
/// Maximum gap between two adjacent boxes.
pub const ADJACENCY_GAP: i32 = 25;

/// Screen-space bounding box of an element, in pixels.
///
/// The derived edges and centers are computed once on construction and the
/// fields are read-only, so they always agree with the raw box. Differences
/// between boxes are taken in `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBox", into = "RawBox")]
pub struct Position {
    left: i32,
    top: i32,
    width: i32,
    height: i32,

    right: i32,
    bottom: i32,
    center_x: i32,
    center_y: i32,
}

#[derive(Serialize, Deserialize)]
struct RawBox {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl TryFrom<RawBox> for Position {
    type Error = String;

    fn try_from(raw: RawBox) -> Result<Self, Self::Error> {
        Position::try_new(raw.left, raw.top, raw.width, raw.height).ok_or_else(|| {
            format!(
                "box ({}, {}, {}, {}) overflows screen coordinates",
                raw.left, raw.top, raw.width, raw.height
            )
        })
    }
}

impl From<Position> for RawBox {
    fn from(pos: Position) -> Self {
        RawBox {
            left: pos.left,
            top: pos.top,
            width: pos.width,
            height: pos.height,
        }
    }
}

impl Position {
    /// Box from its raw edges, or `None` if the right or bottom edge does not
    /// fit in `i32`.
    pub fn try_new(left: i32, top: i32, width: i32, height: i32) -> Option<Self> {
        let right = left.checked_add(width)?;
        let bottom = top.checked_add(height)?;
        Some(Position {
            left,
            top,
            width,
            height,
            right,
            bottom,
            center_x: midpoint(left, right),
            center_y: midpoint(top, bottom),
        })
    }

    /// Like [`try_new`](Self::try_new), with out-of-range edges clamped to
    /// the `i32` range.
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        let right = left.saturating_add(width);
        let bottom = top.saturating_add(height);
        Position {
            left,
            top,
            width,
            height,
            right,
            bottom,
            center_x: midpoint(left, right),
            center_y: midpoint(top, bottom),
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn center_x(&self) -> i32 {
        self.center_x
    }

    pub fn center_y(&self) -> i32 {
        self.center_y
    }

    // ========================================================================
    // Alignment
    // ========================================================================

    /// Same row: vertical centers within the default tolerance.
    pub fn is_horizontally_aligned_with(&self, other: &Position) -> bool {
        self.is_horizontally_aligned_within(other, HORIZONTAL_ALIGN_TOLERANCE)
    }

    pub fn is_horizontally_aligned_within(&self, other: &Position, tolerance: i32) -> bool {
        diff(self.center_y, other.center_y).abs() <= i64::from(tolerance)
    }

    /// Same column: horizontal centers within the default tolerance.
    pub fn is_vertically_aligned_with(&self, other: &Position) -> bool {
        self.is_vertically_aligned_within(other, VERTICAL_ALIGN_TOLERANCE)
    }

    pub fn is_vertically_aligned_within(&self, other: &Position, tolerance: i32) -> bool {
        diff(self.center_x, other.center_x).abs() <= i64::from(tolerance)
    }

    // ========================================================================
    // Adjacency
    // ========================================================================

    /// Horizontal distance from `other`'s right edge to this box's left edge.
    /// Negative when the boxes overlap or `self` starts first.
    pub fn gap_right_of(&self, other: &Position) -> i64 {
        diff(self.left, other.right)
    }

    /// Vertical distance from `other`'s bottom edge to this box's top edge.
    pub fn gap_below(&self, other: &Position) -> i64 {
        diff(self.top, other.bottom)
    }

    /// `self` starts at most `ADJACENCY_GAP` pixels after `other` ends, horizontally.
    pub fn is_right_of(&self, other: &Position) -> bool {
        self.is_right_of_within(other, ADJACENCY_GAP)
    }

    pub fn is_right_of_within(&self, other: &Position, gap: i32) -> bool {
        within_gap(self.gap_right_of(other), gap)
    }

    pub fn is_left_of(&self, other: &Position) -> bool {
        self.is_left_of_within(other, ADJACENCY_GAP)
    }

    pub fn is_left_of_within(&self, other: &Position, gap: i32) -> bool {
        within_gap(other.gap_right_of(self), gap)
    }

    pub fn is_below(&self, other: &Position) -> bool {
        self.is_below_within(other, ADJACENCY_GAP)
    }

    pub fn is_below_within(&self, other: &Position, gap: i32) -> bool {
        within_gap(self.gap_below(other), gap)
    }

    pub fn is_above(&self, other: &Position) -> bool {
        self.is_above_within(other, ADJACENCY_GAP)
    }

    pub fn is_above_within(&self, other: &Position, gap: i32) -> bool {
        within_gap(other.gap_below(self), gap)
    }

    // ========================================================================
    // Distance
    // ========================================================================

    /// Squared Euclidean distance between the two centers.
    pub fn distance_squared_to(&self, other: &Position) -> i64 {
        self.distance_squared_to_point(other.center_x, other.center_y)
    }

    /// Squared Euclidean distance from this box's center to `(x, y)`.
    pub fn distance_squared_to_point(&self, x: i32, y: i32) -> i64 {
        let dx = diff(self.center_x, x);
        let dy = diff(self.center_y, y);
        dx * dx + dy * dy
    }
}

/// Floor of the midpoint; never leaves the `[a, b]` range.
fn midpoint(a: i32, b: i32) -> i32 {
    ((i64::from(a) + i64::from(b)).div_euclid(2)) as i32
}

fn diff(a: i32, b: i32) -> i64 {
    i64::from(a) - i64::from(b)
}

fn within_gap(distance: i64, gap: i32) -> bool {
    distance >= 0 && distance <= i64::from(gap)
}

/// Tolerances the resolver feeds into the predicates above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tolerances {
    #[serde(default = "default_horizontal")]
    pub horizontal: i32,
    #[serde(default = "default_vertical")]
    pub vertical: i32,
    #[serde(default = "default_gap")]
    pub gap: i32,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            horizontal: HORIZONTAL_ALIGN_TOLERANCE,
            vertical: VERTICAL_ALIGN_TOLERANCE,
            gap: ADJACENCY_GAP,
        }
    }
}

fn default_horizontal() -> i32 { HORIZONTAL_ALIGN_TOLERANCE }
fn default_vertical() -> i32 { VERTICAL_ALIGN_TOLERANCE }
fn default_gap() -> i32 { ADJACENCY_GAP }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_fields_floor_odd_sizes() {
        let p = Position::new(10, 20, 5, 7);
        assert_eq!(p.right(), 15);
        assert_eq!(p.bottom(), 27);
        assert_eq!(p.center_x(), 12);
        assert_eq!(p.center_y(), 23);
    }

    #[test]
    fn overflowing_box_is_rejected() {
        assert_eq!(Position::try_new(2_000_000_000, 0, 500_000_000, 20), None);
        assert_eq!(Position::try_new(0, i32::MAX, 10, 1), None);
        assert!(Position::try_new(i32::MAX - 10, 0, 10, 20).is_some());

        let clamped = Position::new(2_000_000_000, 0, 500_000_000, 20);
        assert_eq!(clamped.right(), i32::MAX);
    }

    #[test]
    fn predicates_hold_at_the_coordinate_limits() {
        let far_left = Position::new(i32::MIN, 0, 10, 20);
        let far_right = Position::new(i32::MAX - 10, 0, 10, 20);
        assert!(!far_right.is_right_of(&far_left));
        assert!(!far_left.is_right_of(&far_right));
        assert!(far_left.is_horizontally_aligned_with(&far_right));
        assert!(far_left.distance_squared_to(&far_right) > 0);
    }

    #[test]
    fn serde_only_carries_the_raw_box() {
        let json = serde_json::to_value(Position::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, serde_json::json!({"left": 1, "top": 2, "width": 3, "height": 4}));

        let back: Position = serde_json::from_value(json).unwrap();
        assert_eq!(back.right(), 4);

        let overflow = serde_json::json!({"left": i32::MAX, "top": 0, "width": 1, "height": 1});
        assert!(serde_json::from_value::<Position>(overflow).is_err());
    }
}
