//! Applying published looks to scene nodes

use crate::error::{LookError, Result};
use crate::host::ContainerRegistry;
use crate::queue::QueueItem;
use crate::scene::Scene;
use crate::types::{NodePath, ObjectId};
use std::sync::RwLock;

/// The external look-assignment operation: hook up a published look version
/// to a list of nodes. Success and failure semantics are owned entirely by
/// the implementation; failures surface as
/// [`LookError::AssignError`](crate::error::LookError).
pub trait LookAssigner: Send + Sync {
    fn assign_look_by_version(&self, nodes: &[NodePath], version_id: &ObjectId) -> Result<()>;
}

/// Assigner that records every call instead of touching a scene
#[derive(Debug, Default)]
pub struct RecordingAssigner {
    calls: RwLock<Vec<(Vec<NodePath>, ObjectId)>>,
}

impl RecordingAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// All assignments made so far, in call order
    pub fn calls(&self) -> Vec<(Vec<NodePath>, ObjectId)> {
        self.calls.read().unwrap().clone()
    }
}

impl LookAssigner for RecordingAssigner {
    fn assign_look_by_version(&self, nodes: &[NodePath], version_id: &ObjectId) -> Result<()> {
        self.calls
            .write()
            .unwrap()
            .push((nodes.to_vec(), version_id.clone()));
        Ok(())
    }
}

/// Apply one queued assignment.
///
/// An empty node list is a contract violation: upstream item construction
/// always attaches the source nodes, so the assigner is never invoked and
/// the call fails immediately.
pub fn process_queued_item(assigner: &dyn LookAssigner, entry: &QueueItem) -> Result<()> {
    if entry.nodes.is_empty() {
        return Err(LookError::EmptyNodeList);
    }
    assigner.assign_look_by_version(&entry.nodes, &entry.version.id)
}

/// Remove all loaded look containers whose shaders are no longer used.
///
/// A look is in use when at least one of its member object sets has any
/// contents, i.e. is still applied to geometry. Returns the object names of
/// the removed containers.
pub fn remove_unused_looks(
    scene: &dyn Scene,
    registry: &dyn ContainerRegistry,
) -> Result<Vec<String>> {
    let mut unused = Vec::new();
    for container in registry.ls() {
        if !container.is_look() {
            continue;
        }
        let members = scene.set_members(&container.object_name);
        let look_sets = scene.object_sets(&members);
        let in_use = look_sets.iter().any(|s| !scene.set_members(s).is_empty());
        if !in_use {
            unused.push(container);
        }
    }

    let mut removed = Vec::with_capacity(unused.len());
    for container in unused {
        log::warn!(
            "Removing unused look container: {}",
            container.object_name
        );
        registry.remove(&container)?;
        removed.push(container.object_name);
    }

    Ok(removed)
}
