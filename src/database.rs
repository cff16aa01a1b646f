//! Project database collaborator
//!
//! The project database holds asset, subset and version documents. The
//! queries this crate needs are narrow: one asset by id, the look subsets of
//! an asset, and the latest published version under a subset.

use crate::error::Result;
use crate::types::{AssetDocument, ObjectId, SubsetDocument, VersionDocument};

/// Query access to the project's document database.
///
/// Implementations backed by a real database report connection and query
/// failures as [`LookError::DatabaseError`](crate::error::LookError).
pub trait AssetDatabase: Send + Sync {
    /// Asset document by id, projected to name plus ids
    fn find_asset(&self, id: &ObjectId) -> Result<Option<AssetDocument>>;

    /// All look subsets published under an asset
    fn list_look_subsets(&self, asset_id: &ObjectId) -> Result<Vec<SubsetDocument>>;

    /// Latest version under a subset: highest version name under a
    /// descending sort, or `None` when nothing was published yet
    fn find_latest_version(&self, subset_id: &ObjectId) -> Result<Option<VersionDocument>>;
}

/// In-memory document database
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    assets: Vec<AssetDocument>,
    subsets: Vec<SubsetDocument>,
    versions: Vec<VersionDocument>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_asset(&mut self, asset: AssetDocument) {
        self.assets.push(asset);
    }

    pub fn insert_subset(&mut self, subset: SubsetDocument) {
        self.subsets.push(subset);
    }

    pub fn insert_version(&mut self, version: VersionDocument) {
        self.versions.push(version);
    }
}

impl AssetDatabase for MemoryDatabase {
    fn find_asset(&self, id: &ObjectId) -> Result<Option<AssetDocument>> {
        Ok(self.assets.iter().find(|a| &a.id == id).cloned())
    }

    fn list_look_subsets(&self, asset_id: &ObjectId) -> Result<Vec<SubsetDocument>> {
        Ok(self
            .subsets
            .iter()
            .filter(|s| &s.parent == asset_id)
            .cloned()
            .collect())
    }

    fn find_latest_version(&self, subset_id: &ObjectId) -> Result<Option<VersionDocument>> {
        // Descending sort on the version *name*, first match wins. Names
        // that are not zero-padded sort wrongly here ("v9" beats "v10");
        // kept as-is to match the production database query.
        Ok(self
            .versions
            .iter()
            .filter(|v| &v.parent == subset_id)
            .max_by(|a, b| a.name.cmp(&b.name))
            .cloned())
    }
}
