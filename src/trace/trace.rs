use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    locator::strategy::LocatorStrategy,
    resolver::resolver::Resolution,
    snapshot::source::SourceError,
};

/// One resolve call, as written to the JSONL trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveEvent {
    pub timestamp_ms: u128,
    pub locator: String,

    pub strategy: Option<String>,

    /// `found`, `not_found` or `transport_error`.
    pub outcome: String,
    pub element_id: Option<String>,
    pub reason: Option<String>,

    pub generation: Option<String>,
    pub fingerprint: Option<String>,
}

impl ResolveEvent {
    pub fn now(locator: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            locator: locator.to_string(),
            strategy: None,
            outcome: String::new(),
            element_id: None,
            reason: None,
            generation: None,
            fingerprint: None,
        }
    }

    pub fn with_strategy(mut self, strategy: &LocatorStrategy) -> Self {
        self.strategy = Some(strategy.to_string());
        self
    }

    pub fn with_resolution(mut self, resolution: &Resolution) -> Self {
        match resolution {
            Resolution::Found(el) => {
                self.outcome = "found".into();
                self.element_id = Some(el.id.clone());
            }
            Resolution::NotFound(reason) => {
                self.outcome = "not_found".into();
                self.reason = Some(format!("{}: {}", reason.kind(), reason));
            }
        }
        self
    }

    pub fn with_transport_error(mut self, error: &SourceError) -> Self {
        self.outcome = "transport_error".into();
        self.reason = Some(error.to_string());
        self
    }

    pub fn with_snapshot(mut self, generation: Option<&str>, fingerprint: impl ToString) -> Self {
        self.generation = generation.map(str::to_string);
        self.fingerprint = Some(fingerprint.to_string());
        self
    }
}
