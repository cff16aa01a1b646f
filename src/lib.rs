//! # look-manager
//!
//! Pipeline glue for assigning published looks (shading/material versions)
//! to the assets loaded in a 3D scene.
//!
//! The crate resolves which asset each scene node belongs to via an embedded
//! identifier, looks up the asset's published look versions in the project
//! database, and assigns or queues those versions onto the nodes. A queue of
//! pending assignments can round-trip through a JSON file, and look
//! containers whose shaders are no longer used can be garbage-collected.
//!
//! All host-application and database access goes through the collaborator
//! traits ([`scene::Scene`], [`host::ContainerRegistry`],
//! [`database::AssetDatabase`], [`assign::LookAssigner`]); in-memory
//! implementations of each ship with the crate.
//!
//! ## Example
//!
//! ```rust
//! use look_manager::prelude::*;
//!
//! let mut scene = MemoryScene::new();
//! scene.add_node("|hero_GEO");
//! scene.set_asset_id("|hero_GEO", "5d5c2f52bc9b3ac5c51a2b8e:f1a2");
//! scene.select(&["|hero_GEO".to_string()]).unwrap();
//!
//! let mut db = MemoryDatabase::new();
//! db.insert_asset(AssetDocument {
//!     id: ObjectId::new("5d5c2f52bc9b3ac5c51a2b8e").unwrap(),
//!     name: "hero".to_string(),
//!     parent: ObjectId::new("4c4b1e41ab8a2948c40a1a7d").unwrap(),
//! });
//!
//! let items = get_items_from_selection(&scene, &db).unwrap();
//! assert_eq!(items[0].asset_name, "hero");
//! ```

pub mod assign;
pub mod database;
pub mod error;
pub mod host;
pub mod items;
pub mod queue;
pub mod scene;
pub mod types;

pub mod prelude {
    //! Commonly used types and operations
    pub use crate::assign::{
        process_queued_item, remove_unused_looks, LookAssigner, RecordingAssigner,
    };
    pub use crate::database::{AssetDatabase, MemoryDatabase};
    pub use crate::error::{LookError, Result};
    pub use crate::host::{Container, ContainerRegistry, MemoryRegistry, LOOK_LOADER};
    pub use crate::items::{
        create_asset_id_hash, create_items_from_selection, fetch_looks, get_all_assets,
        get_items_from_selection, AssetGroup, AssetItem, PublishedLook,
    };
    pub use crate::queue::{
        create_queue_in_data, create_queue_items, create_queue_out_data, group_looks,
        load_queue, save_queue, LookSelection, Queue, QueueItem, QueueItemData,
    };
    pub use crate::scene::{
        list_descendents, workfile, workfolder, MemoryScene, Scene,
    };
    pub use crate::types::{
        AssetDocument, NodePath, ObjectId, SubsetDocument, VersionDocument,
    };
}
