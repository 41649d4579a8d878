use thiserror::Error;

use crate::geometry::position::Position;
use crate::snapshot::element::WindowId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// No session or window is reachable.
    #[error("no active window is reachable")]
    NoActiveWindow,

    /// The active window id is known but its root cannot be opened.
    #[error("window '{id}' is not reachable")]
    WindowNotFound { id: WindowId },

    /// A single property read failed on one node.
    #[error("property '{property}' unavailable on '{node}'")]
    PropertyUnavailable { property: String, node: String },

    /// Any other failure reported by the automation transport.
    #[error("transport failure: {0}")]
    Transport(String),
}

// ============================================================================
// Node access
// ============================================================================

/// One node of the externally supplied UI tree.
///
/// Every read is fallible on its own: a failing tooltip must not hide the
/// text or the bounding box of the same node.
pub trait UiNode: Sized {
    fn id(&self) -> Result<String, SourceError>;
    fn element_type(&self) -> Result<String, SourceError>;
    fn text(&self) -> Result<String, SourceError>;
    fn tooltip(&self) -> Result<String, SourceError>;
    fn name(&self) -> Result<String, SourceError>;
    fn changeable(&self) -> Result<bool, SourceError>;

    /// Fails unless all four of left, top, width and height are readable.
    fn bounds(&self) -> Result<Position, SourceError>;

    fn is_container(&self) -> Result<bool, SourceError>;

    /// Child access can fail as a whole or per child.
    fn children(&self) -> Result<Vec<Result<Self, SourceError>>, SourceError>;
}

/// The automation transport, seen from the locator engine.
pub trait SnapshotSource {
    type Node<'a>: UiNode
    where
        Self: 'a;

    fn active_window_id(&self) -> Result<WindowId, SourceError>;

    /// Root node of the currently active window.
    fn active_window(&self) -> Result<Self::Node<'_>, SourceError>;
}
