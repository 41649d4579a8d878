use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::position::Position;
use crate::snapshot::element::WindowId;
use crate::snapshot::source::{SnapshotSource, SourceError, UiNode};

// ============================================================================
// Dump model (JSON)
// ============================================================================

/// A recorded window tree, as written by an external dump tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeDump {
    /// Id of the window that was active when the dump was taken.
    #[serde(default)]
    pub active: Option<WindowId>,
    #[serde(default)]
    pub windows: Vec<WindowDump>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowDump {
    pub id: WindowId,
    pub root: NodeDump,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeDump {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub changeable: Option<bool>,
    #[serde(default)]
    pub bounds: Option<BoundsDump>,
    #[serde(default)]
    pub container: bool,
    #[serde(default)]
    pub children: Vec<NodeDump>,

    /// Properties whose reads failed when the dump was recorded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unreadable: Vec<String>,
}

/// Possibly partial bounding box; any missing edge makes it unusable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BoundsDump {
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl BoundsDump {
    pub fn complete(left: i32, top: i32, width: i32, height: i32) -> Self {
        BoundsDump {
            left: Some(left),
            top: Some(top),
            width: Some(width),
            height: Some(height),
        }
    }
}

// ============================================================================
// TreeSource
// ============================================================================

/// In-memory snapshot source backed by a [`TreeDump`].
#[derive(Debug, Clone, Default)]
pub struct TreeSource {
    dump: TreeDump,
}

impl TreeSource {
    pub fn new(dump: TreeDump) -> Self {
        Self { dump }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    pub fn dump(&self) -> &TreeDump {
        &self.dump
    }

    /// Switch the active window, or drop the session with `None`.
    pub fn set_active(&mut self, id: Option<&str>) {
        self.dump.active = id.map(str::to_string);
    }

    /// Add or replace a window.
    pub fn put_window(&mut self, id: &str, root: NodeDump) {
        match self.dump.windows.iter_mut().find(|w| w.id == id) {
            Some(window) => window.root = root,
            None => self.dump.windows.push(WindowDump {
                id: id.to_string(),
                root,
            }),
        }
    }
}

impl SnapshotSource for TreeSource {
    type Node<'a> = DumpNode<'a>;

    fn active_window_id(&self) -> Result<WindowId, SourceError> {
        self.dump.active.clone().ok_or(SourceError::NoActiveWindow)
    }

    fn active_window(&self) -> Result<DumpNode<'_>, SourceError> {
        let id = self.active_window_id()?;
        self.dump
            .windows
            .iter()
            .find(|w| w.id == id)
            .map(|w| DumpNode(&w.root))
            .ok_or(SourceError::WindowNotFound { id })
    }
}

/// Borrowed view of one dumped node.
#[derive(Debug, Clone, Copy)]
pub struct DumpNode<'a>(&'a NodeDump);

impl DumpNode<'_> {
    fn check(&self, property: &str) -> Result<(), SourceError> {
        if self.0.unreadable.iter().any(|p| p == property) {
            Err(SourceError::PropertyUnavailable {
                property: property.to_string(),
                node: self.0.id.clone(),
            })
        } else {
            Ok(())
        }
    }

    fn string(&self, property: &str, value: &Option<String>) -> Result<String, SourceError> {
        self.check(property)?;
        Ok(value.clone().unwrap_or_default())
    }
}

impl<'a> UiNode for DumpNode<'a> {
    fn id(&self) -> Result<String, SourceError> {
        self.check("id")?;
        Ok(self.0.id.clone())
    }

    fn element_type(&self) -> Result<String, SourceError> {
        self.check("type")?;
        self.0
            .element_type
            .clone()
            .ok_or_else(|| SourceError::PropertyUnavailable {
                property: "type".into(),
                node: self.0.id.clone(),
            })
    }

    fn text(&self) -> Result<String, SourceError> {
        self.string("text", &self.0.text)
    }

    fn tooltip(&self) -> Result<String, SourceError> {
        self.string("tooltip", &self.0.tooltip)
    }

    fn name(&self) -> Result<String, SourceError> {
        self.string("name", &self.0.name)
    }

    fn changeable(&self) -> Result<bool, SourceError> {
        self.check("changeable")?;
        self.0
            .changeable
            .ok_or_else(|| SourceError::PropertyUnavailable {
                property: "changeable".into(),
                node: self.0.id.clone(),
            })
    }

    fn bounds(&self) -> Result<Position, SourceError> {
        self.check("bounds")?;
        let missing = || SourceError::PropertyUnavailable {
            property: "bounds".into(),
            node: self.0.id.clone(),
        };
        let b = self.0.bounds.ok_or_else(missing)?;
        match (b.left, b.top, b.width, b.height) {
            (Some(left), Some(top), Some(width), Some(height)) => {
                Position::try_new(left, top, width, height).ok_or_else(missing)
            }
            _ => Err(missing()),
        }
    }

    fn is_container(&self) -> Result<bool, SourceError> {
        self.check("container")?;
        Ok(self.0.container)
    }

    fn children(&self) -> Result<Vec<Result<Self, SourceError>>, SourceError> {
        self.check("children")?;
        let node: &'a NodeDump = self.0;
        Ok(node.children.iter().map(|c| Ok(DumpNode(c))).collect())
    }
}
