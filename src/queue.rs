//! Pending-assignment queue and its JSON file format
//!
//! A queue item is one "apply this look version to these nodes" entry. The
//! queue lives in memory; it round-trips through a plain JSON file with the
//! database ids flattened to strings.

use crate::assign::{process_queued_item, LookAssigner};
use crate::error::{LookError, Result};
use crate::items::{AssetItem, PublishedLook};
use crate::types::{AssetDocument, DocumentData, NodePath, VersionDocument};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// A pending look assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    /// Display label of the source asset item, `"namespace : asset name"`
    pub label: String,
    pub asset_name: String,
    pub subset: String,
    pub version_name: String,
    /// Version to assign
    pub version: VersionDocument,
    /// Asset document the looks were resolved for
    pub document: AssetDocument,
    /// Nodes to assign onto
    pub nodes: Vec<NodePath>,
}

/// JSON form of a [`QueueItem`]: same shape, ids as plain strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItemData {
    pub asset: String,
    pub asset_name: String,
    pub subset: String,
    pub version_name: String,
    pub version: DocumentData,
    pub document: DocumentData,
    pub nodes: Vec<NodePath>,
}

/// On-disk envelope of a queue file
#[derive(Debug, Serialize, Deserialize)]
struct QueueFile {
    queue: Vec<QueueItemData>,
}

/// Flatten queue items into their JSON-friendly form
pub fn create_queue_out_data(items: &[QueueItem]) -> Vec<QueueItemData> {
    items
        .iter()
        .map(|item| QueueItemData {
            asset: item.label.clone(),
            asset_name: item.asset_name.clone(),
            subset: item.subset.clone(),
            version_name: item.version_name.clone(),
            version: DocumentData::from_version(&item.version),
            document: DocumentData::from_asset(&item.document),
            nodes: item.nodes.clone(),
        })
        .collect()
}

/// Rebuild queue items from their JSON form, re-validating the ids
pub fn create_queue_in_data(items: &[QueueItemData]) -> Result<Vec<QueueItem>> {
    items
        .iter()
        .map(|item| {
            Ok(QueueItem {
                label: item.asset.clone(),
                asset_name: item.asset_name.clone(),
                subset: item.subset.clone(),
                version_name: item.version_name.clone(),
                version: item.version.to_version()?,
                document: item.document.to_asset()?,
                nodes: item.nodes.clone(),
            })
        })
        .collect()
}

/// Write the queue to a JSON file (compact, no pretty-printing)
pub fn save_queue(path: &Path, items: &[QueueItem]) -> Result<()> {
    log::info!("Writing queue file ...");
    let data = QueueFile {
        queue: create_queue_out_data(items),
    };
    let file = File::create(path)?;
    serde_json::to_writer(file, &data)?;
    log::info!("Successfully written file");
    Ok(())
}

/// Read a queue back from a JSON file written by [`save_queue`]
pub fn load_queue(path: &Path) -> Result<Vec<QueueItem>> {
    let file = File::open(path)?;
    let data: QueueFile = serde_json::from_reader(file)
        .map_err(|e| LookError::InvalidQueueFile(e.to_string()))?;
    create_queue_in_data(&data.queue)
}

/// One look subset across the currently listed assets: which assets it
/// matches and the version each of them would get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookSelection {
    pub subset: String,
    /// Number of listed assets this subset was published for
    pub match_count: usize,
    /// Version per asset name; `None` when nothing was published yet
    pub matches: HashMap<String, Option<VersionDocument>>,
}

/// Group published looks by subset name, sorted by subset
pub fn group_looks(looks: &[PublishedLook]) -> Vec<LookSelection> {
    let mut by_subset: BTreeMap<&str, Vec<&PublishedLook>> = BTreeMap::new();
    for look in looks {
        by_subset.entry(look.subset.as_str()).or_default().push(look);
    }

    by_subset
        .into_iter()
        .map(|(subset, group)| LookSelection {
            subset: subset.to_string(),
            match_count: group.len(),
            matches: group
                .iter()
                .map(|look| (look.asset_name.clone(), look.version.clone()))
                .collect(),
        })
        .collect()
}

/// Join selected looks against selected assets into queue items.
///
/// Every asset must be matched by one of the selected looks, and the match
/// must have a published version; anything else is an error, since queuing
/// an unassignable entry only defers the failure.
pub fn create_queue_items(
    looks: &[LookSelection],
    assets: &[AssetItem],
) -> Result<Vec<QueueItem>> {
    // Later selections win per asset, like picking twice in a row would
    let mut matches: HashMap<&str, (&str, &Option<VersionDocument>)> = HashMap::new();
    for look in looks {
        for (asset_name, version) in &look.matches {
            matches.insert(asset_name.as_str(), (look.subset.as_str(), version));
        }
    }

    let mut items = Vec::new();
    for asset in assets {
        let Some((subset, version)) = matches.get(asset.asset_name.as_str()).copied() else {
            return Err(LookError::NoLookMatch(asset.asset_name.clone()));
        };
        let version = version.clone().ok_or_else(|| LookError::MissingVersion {
            asset: asset.asset_name.clone(),
            subset: subset.to_string(),
        })?;
        items.push(QueueItem {
            label: asset.label.clone(),
            asset_name: asset.asset_name.clone(),
            subset: subset.to_string(),
            version_name: version.name.clone(),
            version,
            document: asset.document.clone(),
            nodes: asset.nodes.clone(),
        });
    }

    Ok(items)
}

/// In-memory assignment queue with duplicate rejection
#[derive(Debug, Default)]
pub struct Queue {
    items: Vec<QueueItem>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add items, skipping exact duplicates of entries already queued.
    /// Returns the number of items actually added.
    pub fn add_items(&mut self, items: Vec<QueueItem>) -> usize {
        let mut added = 0;
        for item in items {
            if self.items.contains(&item) {
                log::info!("Already in queue: {}", item.label);
                continue;
            }
            self.items.push(item);
            added += 1;
        }
        added
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove one entry by position
    pub fn remove(&mut self, index: usize) -> Option<QueueItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Apply every queued assignment, in queue order. Stops at the first
    /// failure; already-applied entries are not rolled back.
    pub fn process(&self, assigner: &dyn LookAssigner) -> Result<()> {
        for item in &self.items {
            process_queued_item(assigner, item)?;
        }
        Ok(())
    }

    /// Write the current queue to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        save_queue(path, &self.items)
    }

    /// Load a queue file, appending anything not already queued.
    /// Returns the number of new items.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let items = load_queue(path)?;
        let added = self.add_items(items);
        log::info!("Found {added} new item(s)");
        Ok(added)
    }
}
