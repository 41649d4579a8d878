use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::geometry::position::Tolerances;
use crate::locator::parser::parse_locator;
use crate::locator::strategy::{LocatorError, LocatorStrategy};
use crate::resolver::error::ResolveError;
use crate::resolver::strategies::Matcher;
use crate::resolver::targets::{DEFAULT_TARGET_TYPES, LABEL_ELEMENT_TYPES, TargetPurpose};
use crate::snapshot::cache::Snapshot;
use crate::snapshot::element::{ElementId, ElementInfo};
use crate::snapshot::source::SnapshotSource;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::ResolveEvent;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub tolerances: Tolerances,

    /// Candidate types used when the caller passes none.
    #[serde(default = "default_target_types")]
    pub target_types: Vec<String>,

    /// Types searched, in order, for label anchors.
    #[serde(default = "default_label_types")]
    pub label_types: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            target_types: default_target_types(),
            label_types: default_label_types(),
        }
    }
}

fn default_target_types() -> Vec<String> {
    DEFAULT_TARGET_TYPES.iter().map(|t| t.to_string()).collect()
}

fn default_label_types() -> Vec<String> {
    LABEL_ELEMENT_TYPES.iter().map(|t| t.to_string()).collect()
}

// ============================================================================
// Outcomes
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(ElementInfo),
    NotFound(NotFoundReason),
}

impl Resolution {
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Resolution::Found(el) => Some(&el.id),
            Resolution::NotFound(_) => None,
        }
    }

    pub fn into_element_id(self) -> Option<ElementId> {
        match self {
            Resolution::Found(el) => Some(el.id),
            Resolution::NotFound(_) => None,
        }
    }
}

/// Why a resolve came back empty. Not an error: callers decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The locator did not parse, or uses a form with no matching rules.
    InvalidLocator(LocatorError),
    /// The active window has no indexed elements.
    EmptySnapshot,
    /// An anchor label is not on screen.
    LabelMissing(String),
    /// Anchors exist but no candidate satisfies the strategy.
    NoMatch,
}

impl NotFoundReason {
    /// Short tag used in traces and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            NotFoundReason::InvalidLocator(LocatorError::Parse { .. }) => "parse_error",
            NotFoundReason::InvalidLocator(LocatorError::Unsupported { .. }) => "unsupported",
            NotFoundReason::EmptySnapshot => "empty_snapshot",
            NotFoundReason::LabelMissing(_) => "label_missing",
            NotFoundReason::NoMatch => "no_match",
        }
    }
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::InvalidLocator(e) => write!(f, "{}", e),
            NotFoundReason::EmptySnapshot => write!(f, "element cache is empty"),
            NotFoundReason::LabelMissing(label) => write!(f, "label '{}' not found", label),
            NotFoundReason::NoMatch => write!(f, "no candidate matches"),
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Semantic locator engine for one automation session.
///
/// Owns its snapshot; separate sessions use separate resolvers and never
/// share cached state.
pub struct Resolver<S: SnapshotSource> {
    source: S,
    snapshot: Snapshot,
    config: ResolverConfig,
    tracer: TraceLogger,
}

impl<S: SnapshotSource> Resolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ResolverConfig::default())
    }

    pub fn with_config(source: S, config: ResolverConfig) -> Self {
        Self {
            source,
            snapshot: Snapshot::new(),
            config,
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn with_trace(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Force the next resolve to rescan even if the window id is unchanged.
    pub fn invalidate(&mut self) {
        info!("Element cache invalidated");
        self.snapshot.clear();
    }

    /// Resolve against the configured default target types.
    pub fn resolve(&mut self, locator: &str) -> Result<Option<ElementId>, ResolveError> {
        let types = self.config.target_types.clone();
        self.resolve_with_types(locator, &types)
    }

    pub fn resolve_for(
        &mut self,
        locator: &str,
        purpose: TargetPurpose,
    ) -> Result<Option<ElementId>, ResolveError> {
        self.resolve_with_types(locator, purpose.types())
    }

    pub fn resolve_with_types<T: AsRef<str>>(
        &mut self,
        locator: &str,
        types: &[T],
    ) -> Result<Option<ElementId>, ResolveError> {
        Ok(self.resolve_detailed(locator, types)?.into_element_id())
    }

    pub fn exists<T: AsRef<str>>(&mut self, locator: &str, types: &[T]) -> Result<bool, ResolveError> {
        Ok(self.resolve_with_types(locator, types)?.is_some())
    }

    /// Like [`resolve_with_types`](Self::resolve_with_types), but a miss is an error.
    pub fn require<T: AsRef<str>>(&mut self, locator: &str, types: &[T]) -> Result<ElementId, ResolveError> {
        match self.resolve_detailed(locator, types)? {
            Resolution::Found(el) => Ok(el.id),
            Resolution::NotFound(reason) => Err(ResolveError::ElementNotFound {
                locator: locator.to_string(),
                types: types.iter().map(|t| t.as_ref().to_string()).collect(),
                reason,
            }),
        }
    }

    /// Full resolve: refresh, parse, match.
    ///
    /// Only transport failures are errors. Bad locators and misses come back
    /// as [`Resolution::NotFound`] with the reason attached.
    pub fn resolve_detailed<T: AsRef<str>>(
        &mut self,
        locator: &str,
        types: &[T],
    ) -> Result<Resolution, ResolveError> {
        if let Err(e) = self.snapshot.refresh(&self.source) {
            self.trace(ResolveEvent::now(locator).with_transport_error(&e));
            return Err(ResolveError::Transport(e));
        }

        let strategy = match parse_locator(locator) {
            Ok(strategy) => {
                debug!(locator, %strategy, "Parsed locator");
                strategy
            }
            Err(e) => {
                error!(locator, error = %e, unsupported = e.is_unsupported(), "Error parsing locator");
                return Ok(self.finish(locator, None, Resolution::NotFound(NotFoundReason::InvalidLocator(e))));
            }
        };

        if self.snapshot.is_empty() {
            warn!(locator, "Element cache is empty. Cannot find element");
            return Ok(self.finish(locator, Some(&strategy), Resolution::NotFound(NotFoundReason::EmptySnapshot)));
        }

        let matcher = Matcher::new(
            &self.snapshot,
            types,
            &self.config.label_types,
            self.config.tolerances,
        );

        if matcher.candidates().is_empty() && !matches!(strategy, LocatorStrategy::Content { .. }) {
            let wanted: Vec<&str> = types.iter().map(|t| t.as_ref()).collect();
            warn!(types = ?wanted, "No candidate elements found for types");
        }

        let resolution = match matcher.run(&strategy) {
            Ok(el) => Resolution::Found(el.clone()),
            Err(reason) => Resolution::NotFound(reason),
        };

        Ok(self.finish(locator, Some(&strategy), resolution))
    }

    fn finish(&self, locator: &str, strategy: Option<&LocatorStrategy>, resolution: Resolution) -> Resolution {
        match &resolution {
            Resolution::Found(el) => info!(
                locator,
                id = %el.id,
                element_type = %el.element_type,
                "Locator resolved"
            ),
            Resolution::NotFound(reason) => warn!(
                locator,
                reason = %reason,
                "Could not find element using locator"
            ),
        }

        if self.tracer.is_enabled() {
            let mut event = ResolveEvent::now(locator)
                .with_resolution(&resolution)
                .with_snapshot(self.snapshot.generation(), self.snapshot.fingerprint());
            if let Some(strategy) = strategy {
                event = event.with_strategy(strategy);
            }
            self.trace(event);
        }

        resolution
    }

    fn trace(&self, event: ResolveEvent) {
        self.tracer.log(&event);
    }
}
