//! Semantic locator resolution for desktop UI automation.
//!
//! A locator such as `"User"`, `"@ Password"`, `"=Save"` or `"A >> B"` is
//! parsed into a [`LocatorStrategy`] and matched against a cached
//! [`Snapshot`] of the active window, using label/field geometry to pick the
//! target control.

pub mod cli;
pub mod geometry;
pub mod locator;
pub mod resolver;
pub mod snapshot;
pub mod trace;

pub use geometry::position::{Position, Tolerances};
pub use locator::parser::parse_locator;
pub use locator::strategy::{LocatorError, LocatorStrategy, UnsupportedKind};
pub use resolver::error::ResolveError;
pub use resolver::resolver::{NotFoundReason, Resolution, Resolver, ResolverConfig};
pub use resolver::targets::{DEFAULT_TARGET_TYPES, LABEL_ELEMENT_TYPES, TargetPurpose};
pub use snapshot::cache::Snapshot;
pub use snapshot::element::{ElementId, ElementInfo, WindowId};
pub use snapshot::source::{SnapshotSource, SourceError, UiNode};
pub use snapshot::tree::TreeSource;
