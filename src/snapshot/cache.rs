use std::collections::{HashMap, HashSet, VecDeque};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::snapshot::element::{ElementInfo, UNKNOWN_TYPE, WindowId};
use crate::snapshot::fingerprint::layout_fingerprint;
use crate::snapshot::source::{SnapshotSource, SourceError, UiNode};

/// Type-partitioned index of the visible controls of one window.
///
/// The index is only meaningful while `generation` equals the live active
/// window id. It is rebuilt wholesale on every scan and never patched.
#[derive(Debug, Default)]
pub struct Snapshot {
    /// `None` never equals a real window id.
    generation: Option<WindowId>,
    /// Every indexed element, in scan order.
    elements: Vec<ElementInfo>,
    /// Type tag -> positions in `elements`, scan order preserved.
    by_type: HashMap<String, Vec<usize>>,
    /// Type tags in the order they were first seen.
    type_order: Vec<String>,
    scans: u64,
}

/// Outcome of [`Snapshot::refresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// The index already reflects the active window.
    Current,
    Rescanned(ScanSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub window: WindowId,
    pub indexed: usize,
    /// Nodes that could not be read at all (no id).
    pub skipped: usize,
    pub elapsed: Duration,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Bring the index in line with the source's active window.
    ///
    /// Rescans only when the active window id differs from the current
    /// generation. If the active window (or its root) is unreachable the
    /// index is cleared and the transport error is returned.
    pub fn refresh<S: SnapshotSource>(&mut self, source: &S) -> Result<Refresh, SourceError> {
        let window_id = match source.active_window_id() {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Failed to read active window; clearing element cache");
                self.clear();
                return Err(e);
            }
        };

        if self.generation.as_deref() == Some(window_id.as_str()) {
            debug!(window = %window_id, "Element cache is up to date");
            return Ok(Refresh::Current);
        }

        info!(
            from = ?self.generation,
            to = %window_id,
            "Window changed; refreshing element cache"
        );

        let root = match source.active_window() {
            Ok(root) => root,
            Err(e) => {
                error!(error = %e, window = %window_id, "Failed to open window root; clearing element cache");
                self.clear();
                return Err(e);
            }
        };

        let summary = self.scan(root, &window_id);
        self.generation = Some(window_id);
        Ok(Refresh::Rescanned(summary))
    }

    /// Drop every element and forget the generation.
    pub fn clear(&mut self) {
        self.generation = None;
        self.elements.clear();
        self.by_type.clear();
        self.type_order.clear();
        debug!("Element cache cleared");
    }

    /// Breadth-first walk from `root`, guarded against cycles by element id.
    fn scan<N: UiNode>(&mut self, root: N, window: &str) -> ScanSummary {
        self.clear();
        self.scans += 1;

        let start = Instant::now();
        let mut queue = VecDeque::from([root]);
        let mut visited: HashSet<String> = HashSet::new();
        let mut skipped = 0;

        while let Some(node) = queue.pop_front() {
            let id = match node.id() {
                Ok(id) => id,
                Err(e) => {
                    warn!(error = %e, "Error processing component during scan");
                    skipped += 1;
                    continue;
                }
            };

            if !visited.insert(id.clone()) {
                continue;
            }

            match read_element(&node, &id) {
                Some(info) => self.insert(info),
                None => debug!(id = %id, "No complete bounding box; not indexed"),
            }

            match node.is_container() {
                Ok(true) => match node.children() {
                    Ok(children) => {
                        for (index, child) in children.into_iter().enumerate() {
                            match child {
                                Ok(child) => queue.push_back(child),
                                Err(e) => {
                                    warn!(parent = %id, index, error = %e, "Could not access child")
                                }
                            }
                        }
                    }
                    Err(e) => warn!(parent = %id, error = %e, "Could not access children"),
                },
                Ok(false) => {}
                Err(e) => debug!(id = %id, error = %e, "Container flag unreadable; children skipped"),
            }
        }

        let summary = ScanSummary {
            window: window.to_string(),
            indexed: self.elements.len(),
            skipped,
            elapsed: start.elapsed(),
        };

        info!(
            window = %summary.window,
            indexed = summary.indexed,
            skipped = summary.skipped,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Element scan complete"
        );

        summary
    }

    fn insert(&mut self, info: ElementInfo) {
        let index = self.elements.len();
        match self.by_type.get_mut(&info.element_type) {
            Some(slots) => slots.push(index),
            None => {
                self.type_order.push(info.element_type.clone());
                self.by_type.insert(info.element_type.clone(), vec![index]);
            }
        }
        self.elements.push(info);
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn generation(&self) -> Option<&str> {
        self.generation.as_deref()
    }

    /// Number of scans performed over this snapshot's lifetime.
    pub fn scan_count(&self) -> u64 {
        self.scans
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in scan order.
    pub fn elements(&self) -> &[ElementInfo] {
        &self.elements
    }

    /// Elements of one type, in scan order.
    pub fn of_type<'a>(&'a self, element_type: &str) -> impl Iterator<Item = &'a ElementInfo> + use<'a> {
        let slots: &'a [usize] = self
            .by_type
            .get(element_type)
            .map(Vec::as_slice)
            .unwrap_or_default();
        slots.iter().map(move |&i| &self.elements[i])
    }

    /// Elements of the given types: type order first, then scan order.
    pub fn of_types<'a, T: AsRef<str>>(
        &'a self,
        types: &'a [T],
    ) -> impl Iterator<Item = &'a ElementInfo> + use<'a, T> {
        types.iter().flat_map(move |t| self.of_type(t.as_ref()))
    }

    /// Type tags in first-seen order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.type_order.iter().map(String::as_str)
    }

    pub fn fingerprint(&self) -> String {
        layout_fingerprint(&self.elements)
    }
}

/// Read one node's properties independently; only the bounding box is mandatory.
fn read_element<N: UiNode>(node: &N, id: &str) -> Option<ElementInfo> {
    let position = match node.bounds() {
        Ok(position) => position,
        Err(_) => return None,
    };

    let element_type = node.element_type().unwrap_or_else(|e| {
        debug!(id, error = %e, "Type unreadable");
        UNKNOWN_TYPE.to_string()
    });

    Some(ElementInfo {
        id: id.to_string(),
        element_type,
        text: read_text(node.text(), id, "text"),
        tooltip: read_text(node.tooltip(), id, "tooltip"),
        name: read_text(node.name(), id, "name"),
        editable: node
            .changeable()
            .inspect_err(|e| debug!(id, error = %e, "Changeable flag unreadable"))
            .ok(),
        position,
    })
}

/// Trimmed value, or `None` for failed reads and blank strings.
fn read_text(value: Result<String, SourceError>, id: &str, property: &str) -> Option<String> {
    match value {
        Ok(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Err(e) => {
            debug!(id, property, error = %e, "Property unreadable");
            None
        }
    }
}
