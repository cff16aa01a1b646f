//! Container registry collaborator
//!
//! The host application tracks loaded publishes as containers; this crate
//! only needs to enumerate them and remove the ones it garbage-collects.

use crate::error::{LookError, Result};
use std::sync::RwLock;

/// Loader name used for look containers in the host registry
pub const LOOK_LOADER: &str = "LookLoader";

/// A loaded publish as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Name of the set node that groups the container's members
    pub object_name: String,
    /// Loader that brought the container into the scene
    pub loader: String,
    /// Namespace the members live in
    pub namespace: String,
}

impl Container {
    /// True when this container holds a loaded look rather than an asset
    pub fn is_look(&self) -> bool {
        self.loader == LOOK_LOADER
    }
}

/// Enumerate and remove loaded containers
pub trait ContainerRegistry: Send + Sync {
    /// All containers currently loaded in the scene
    fn ls(&self) -> Vec<Container>;

    /// Remove one container from the scene
    fn remove(&self, container: &Container) -> Result<()>;
}

/// In-memory container registry
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    containers: RwLock<Vec<Container>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loaded container
    pub fn add(&mut self, container: Container) {
        self.containers.write().unwrap().push(container);
    }
}

impl ContainerRegistry for MemoryRegistry {
    fn ls(&self) -> Vec<Container> {
        self.containers.read().unwrap().clone()
    }

    fn remove(&self, container: &Container) -> Result<()> {
        let mut containers = self.containers.write().unwrap();
        let before = containers.len();
        containers.retain(|c| c != container);
        if containers.len() == before {
            return Err(LookError::SceneError(format!(
                "container not loaded: {}",
                container.object_name
            )));
        }
        Ok(())
    }
}
