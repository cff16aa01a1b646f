//! Scene-host collaborator: the read side of the 3D scene graph
//!
//! Every operation in this crate talks to the host application through the
//! [`Scene`] trait so that a real DCC binding and the in-memory
//! [`MemoryScene`] are interchangeable.

use crate::error::{LookError, Result};
use crate::types::NodePath;
use hashbrown::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Read access to the host scene graph, plus the single mutating call
/// (applying a selection).
pub trait Scene: Send + Sync {
    /// Path of the current scene file, `None` when the scene is unsaved
    fn scene_path(&self) -> Option<PathBuf>;

    /// Currently selected nodes, as full paths
    fn selection(&self) -> Vec<NodePath>;

    /// Replace the current selection
    fn select(&self, nodes: &[NodePath]) -> Result<()>;

    /// Immediate children of the given nodes, as full paths.
    ///
    /// Returns one entry per child *path*: an instanced shape under two
    /// parents shows up twice, once per instance path.
    fn children(&self, nodes: &[NodePath]) -> Vec<NodePath>;

    /// Namespace of a node; `:` for the root namespace
    fn namespace(&self, node: &str) -> Result<String>;

    /// Embedded asset identifier of a node, `None` for untracked geometry
    fn asset_id(&self, node: &str) -> Option<String>;

    /// Members of an object set; empty when the set is empty or unknown
    fn set_members(&self, set: &str) -> Vec<NodePath>;

    /// Filter a node list down to the object sets in it
    fn object_sets(&self, nodes: &[NodePath]) -> Vec<NodePath>;
}

/// Full descendant hierarchy of the given nodes.
///
/// Expands by repeatedly querying immediate children of the current frontier
/// until a query comes back empty. A single all-descendants query is not an
/// acceptable replacement: on instanced geometry it under-reports instance
/// paths, and assignments on instanced shapes then miss nodes.
pub fn list_descendents(scene: &dyn Scene, nodes: &[NodePath]) -> Vec<NodePath> {
    let mut result = Vec::new();
    let mut frontier = nodes.to_vec();
    loop {
        frontier = scene.children(&frontier);
        if frontier.is_empty() {
            return result;
        }
        result.extend(frontier.iter().cloned());
    }
}

/// Basename of the current scene file, `"untitled"` when unsaved
pub fn workfile(scene: &dyn Scene) -> String {
    scene
        .scene_path()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "untitled".to_string())
}

/// Directory of the current scene file
pub fn workfolder(scene: &dyn Scene) -> Option<PathBuf> {
    scene
        .scene_path()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
}

#[derive(Debug, Default)]
struct NodeRecord {
    children: Vec<NodePath>,
    asset_id: Option<String>,
}

/// Path minus its last `|`-separated segment; `None` for root-level nodes
fn parent_path(path: &str) -> Option<&str> {
    match path.rfind('|') {
        Some(idx) if idx > 0 => Some(&path[..idx]),
        _ => None,
    }
}

/// In-memory scene graph
///
/// A small DAG of node paths with per-node attributes and object sets.
/// Instanced geometry is modeled by adding the same leaf under two parents,
/// which yields two distinct instance paths.
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: HashMap<NodePath, NodeRecord>,
    sets: HashMap<String, Vec<NodePath>>,
    selection: RwLock<Vec<NodePath>>,
    scene_path: Option<PathBuf>,
}

impl MemoryScene {
    /// Create an empty, unsaved scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scene file path
    pub fn with_scene_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scene_path = Some(path.into());
        self
    }

    /// Add a node by full path; the parent is the path minus its last
    /// `|`-separated segment. Registration order does not matter: a child
    /// added before its parent is linked up once the parent appears.
    pub fn add_node(&mut self, path: &str) {
        if let Some(parent) = parent_path(path) {
            if let Some(record) = self.nodes.get_mut(parent) {
                if !record.children.contains(&path.to_string()) {
                    record.children.push(path.to_string());
                }
            }
        }
        self.nodes.entry(path.to_string()).or_default();

        // Adopt any children that were registered before this node
        let mut orphans: Vec<NodePath> = self
            .nodes
            .keys()
            .filter(|existing| parent_path(existing.as_str()) == Some(path))
            .cloned()
            .collect();
        orphans.sort();
        if let Some(record) = self.nodes.get_mut(path) {
            for child in orphans {
                if !record.children.contains(&child) {
                    record.children.push(child);
                }
            }
        }
    }

    /// Set the embedded asset identifier attribute of a node
    pub fn set_asset_id(&mut self, path: &str, value: &str) {
        if let Some(record) = self.nodes.get_mut(path) {
            record.asset_id = Some(value.to_string());
        }
    }

    /// Create an object set with the given members
    pub fn add_object_set(&mut self, name: &str, members: Vec<NodePath>) {
        self.sets.insert(name.to_string(), members);
    }

    fn has_node(&self, node: &str) -> bool {
        self.nodes.contains_key(node) || self.sets.contains_key(node)
    }
}

impl Scene for MemoryScene {
    fn scene_path(&self) -> Option<PathBuf> {
        self.scene_path.clone()
    }

    fn selection(&self) -> Vec<NodePath> {
        self.selection.read().unwrap().clone()
    }

    fn select(&self, nodes: &[NodePath]) -> Result<()> {
        for node in nodes {
            if !self.has_node(node) {
                return Err(LookError::SceneError(format!("unknown node: {node}")));
            }
        }
        *self.selection.write().unwrap() = nodes.to_vec();
        Ok(())
    }

    fn children(&self, nodes: &[NodePath]) -> Vec<NodePath> {
        let mut result = Vec::new();
        for node in nodes {
            if let Some(record) = self.nodes.get(node) {
                result.extend(record.children.iter().cloned());
            }
        }
        result
    }

    fn namespace(&self, node: &str) -> Result<String> {
        if !self.has_node(node) {
            return Err(LookError::SceneError(format!("unknown node: {node}")));
        }
        // Namespace is embedded in the leaf name: `|grp|ns:body_GEO`
        let leaf = node.rsplit('|').next().unwrap_or(node);
        match leaf.rsplit_once(':') {
            Some((ns, _)) => Ok(ns.to_string()),
            None => Ok(":".to_string()),
        }
    }

    fn asset_id(&self, node: &str) -> Option<String> {
        self.nodes.get(node).and_then(|r| r.asset_id.clone())
    }

    fn set_members(&self, set: &str) -> Vec<NodePath> {
        self.sets.get(set).cloned().unwrap_or_default()
    }

    fn object_sets(&self, nodes: &[NodePath]) -> Vec<NodePath> {
        nodes
            .iter()
            .filter(|n| self.sets.contains_key(n.as_str()))
            .cloned()
            .collect()
    }
}
