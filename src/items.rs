//! Grouping nodes by asset id and building view items
//!
//! A view item joins one asset document with the looks published for it and
//! the scene nodes it was resolved from. Items are rebuilt from live scene
//! and database state on every call.

use crate::database::AssetDatabase;
use crate::error::Result;
use crate::host::ContainerRegistry;
use crate::scene::{list_descendents, Scene};
use crate::types::{AssetDocument, NodePath, ObjectId, VersionDocument};
use hashbrown::{HashMap, HashSet};

/// Nodes sharing one grouping key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetGroup {
    /// Text before the first `:` of the embedded identifier
    pub asset_id: String,
    /// Nodes carrying that identifier, in input order
    pub nodes: Vec<NodePath>,
}

/// Latest published version of one look subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedLook {
    pub asset_name: String,
    pub subset: String,
    /// `None` when the subset has no published version yet
    pub version: Option<VersionDocument>,
}

/// One asset as shown to the user: document, looks and source nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetItem {
    /// Display label, `"namespace : asset name"`
    pub label: String,
    pub asset_name: String,
    pub document: AssetDocument,
    pub looks: Vec<PublishedLook>,
    /// Grouping key the item was resolved from
    pub asset_id: String,
    pub nodes: Vec<NodePath>,
}

/// Group nodes by their embedded asset identifier.
///
/// Nodes without the identifier attribute are untracked geometry and are
/// skipped without comment. The grouping key is everything before the first
/// `:` of the attribute value. Groups come out in first-seen order.
pub fn create_asset_id_hash(scene: &dyn Scene, nodes: &[NodePath]) -> Vec<AssetGroup> {
    let mut groups: Vec<AssetGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for node in nodes {
        let Some(value) = scene.asset_id(node) else {
            continue;
        };
        let asset_id = match value.split_once(':') {
            Some((head, _)) => head.to_string(),
            None => value,
        };
        match index.get(&asset_id) {
            Some(&at) => groups[at].nodes.push(node.clone()),
            None => {
                index.insert(asset_id.clone(), groups.len());
                groups.push(AssetGroup {
                    asset_id,
                    nodes: vec![node.clone()],
                });
            }
        }
    }

    groups
}

/// One [`PublishedLook`] per look subset of the asset.
///
/// A subset without any published version still yields a record, with
/// `version` left as `None`; the caller decides what to do with it.
pub fn fetch_looks(db: &dyn AssetDatabase, asset: &AssetDocument) -> Result<Vec<PublishedLook>> {
    let mut looks = Vec::new();
    for subset in db.list_look_subsets(&asset.id)? {
        let version = db.find_latest_version(&subset.id)?;
        looks.push(PublishedLook {
            asset_name: asset.name.clone(),
            subset: subset.name,
            version,
        });
    }
    Ok(looks)
}

/// Build view items for the given content nodes.
///
/// Groups the content by asset id, resolves each group's asset document and
/// looks, and labels the item with the namespace of the group's first node.
/// A grouping key with no matching document is logged and dropped; one bad
/// id does not abort the batch.
pub fn create_items_from_selection(
    scene: &dyn Scene,
    db: &dyn AssetDatabase,
    content: &[NodePath],
) -> Result<Vec<AssetItem>> {
    let mut items = Vec::new();

    for group in create_asset_id_hash(scene, content) {
        let document = match ObjectId::new(group.asset_id.clone()) {
            Ok(id) => db.find_asset(&id)?,
            Err(_) => None,
        };
        let Some(document) = document else {
            log::warn!("Id not found in the database, skipping '{}'.", group.asset_id);
            log::warn!("Nodes: {:?}", group.nodes);
            continue;
        };

        let looks = fetch_looks(db, &document)?;
        let namespace = match group.nodes.first() {
            Some(node) => scene.namespace(node)?,
            None => continue,
        };
        let label = format!("{} : {}", namespace, document.name);
        items.push(AssetItem {
            label,
            asset_name: document.name.clone(),
            document,
            looks,
            asset_id: group.asset_id,
            nodes: group.nodes,
        });
    }

    Ok(items)
}

/// View items for the current selection and its full descendant hierarchy
pub fn get_items_from_selection(
    scene: &dyn Scene,
    db: &dyn AssetDatabase,
) -> Result<Vec<AssetItem>> {
    let selection = scene.selection();
    let hierarchy = list_descendents(scene, &selection);

    let mut seen: HashSet<NodePath> = HashSet::new();
    let mut nodes: Vec<NodePath> = Vec::new();
    for node in selection.into_iter().chain(hierarchy) {
        if seen.insert(node.clone()) {
            nodes.push(node);
        }
    }

    create_items_from_selection(scene, db, &nodes)
}

/// View items for every asset container loaded in the scene.
///
/// Look containers are skipped: already-assigned looks are not assignable
/// targets themselves.
pub fn get_all_assets(
    scene: &dyn Scene,
    registry: &dyn ContainerRegistry,
    db: &dyn AssetDatabase,
) -> Result<Vec<AssetItem>> {
    let mut items = Vec::new();

    for container in registry.ls() {
        if container.is_look() {
            continue;
        }
        let content = scene.set_members(&container.object_name);
        let view_items = create_items_from_selection(scene, db, &content)?;
        items.extend(view_items);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryDatabase;
    use crate::scene::MemoryScene;
    use crate::types::SubsetDocument;

    fn oid(tag: u32) -> ObjectId {
        ObjectId::new(format!("{tag:024x}")).unwrap()
    }

    fn scene_with_ids() -> MemoryScene {
        let mut scene = MemoryScene::new();
        scene.add_node("|n1");
        scene.add_node("|n2");
        scene.add_node("|n3");
        scene.set_asset_id("|n1", "A1B2:shaderX");
        scene.set_asset_id("|n2", "A1B2:shaderX");
        scene.set_asset_id("|n3", "C3D4:shaderY");
        scene
    }

    #[test]
    fn test_grouping_by_id_prefix() {
        let scene = scene_with_ids();
        let nodes: Vec<NodePath> =
            vec!["|n1".to_string(), "|n2".to_string(), "|n3".to_string()];
        let groups = create_asset_id_hash(&scene, &nodes);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].asset_id, "A1B2");
        assert_eq!(groups[0].nodes, vec!["|n1".to_string(), "|n2".to_string()]);
        assert_eq!(groups[1].asset_id, "C3D4");
        assert_eq!(groups[1].nodes, vec!["|n3".to_string()]);
    }

    #[test]
    fn test_grouping_skips_untracked_nodes() {
        let mut scene = MemoryScene::new();
        scene.add_node("|tracked");
        scene.add_node("|untracked");
        scene.set_asset_id("|tracked", "A1B2:x");

        let nodes = vec!["|tracked".to_string(), "|untracked".to_string()];
        let groups = create_asset_id_hash(&scene, &nodes);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].nodes, vec!["|tracked".to_string()]);
    }

    #[test]
    fn test_fetch_looks_one_record_per_subset() {
        let mut db = MemoryDatabase::new();
        let asset = AssetDocument {
            id: oid(1),
            name: "heroSword".to_string(),
            parent: oid(99),
        };
        db.insert_subset(SubsetDocument {
            id: oid(10),
            name: "lookDefault".to_string(),
            parent: oid(1),
        });
        db.insert_subset(SubsetDocument {
            id: oid(11),
            name: "lookDamaged".to_string(),
            parent: oid(1),
        });
        db.insert_version(VersionDocument {
            id: oid(20),
            name: "v001".to_string(),
            parent: oid(10),
        });
        db.insert_version(VersionDocument {
            id: oid(21),
            name: "v002".to_string(),
            parent: oid(10),
        });

        let looks = fetch_looks(&db, &asset).unwrap();
        assert_eq!(looks.len(), 2);
        assert_eq!(looks[0].subset, "lookDefault");
        assert_eq!(looks[0].version.as_ref().unwrap().name, "v002");
        // No version published for lookDamaged yet
        assert_eq!(looks[1].subset, "lookDamaged");
        assert!(looks[1].version.is_none());
    }

    #[test]
    fn test_unknown_id_is_dropped_not_fatal() {
        let id_a = oid(1).to_string();
        let id_b = oid(2).to_string();

        let mut scene = MemoryScene::new();
        scene.add_node("|known_a");
        scene.add_node("|known_b");
        scene.add_node("|ghost");
        scene.set_asset_id("|known_a", &format!("{id_a}:x"));
        scene.set_asset_id("|known_b", &format!("{id_b}:y"));
        scene.set_asset_id("|ghost", "ffffffffffffffffffffffff:z");

        let mut db = MemoryDatabase::new();
        db.insert_asset(AssetDocument {
            id: oid(1),
            name: "assetA".to_string(),
            parent: oid(99),
        });
        db.insert_asset(AssetDocument {
            id: oid(2),
            name: "assetB".to_string(),
            parent: oid(99),
        });

        let nodes = vec![
            "|known_a".to_string(),
            "|known_b".to_string(),
            "|ghost".to_string(),
        ];
        let items = create_items_from_selection(&scene, &db, &nodes).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].asset_name, "assetA");
        assert_eq!(items[1].asset_name, "assetB");
    }

    #[test]
    fn test_item_label_carries_namespace() {
        let id = oid(1).to_string();
        let mut scene = MemoryScene::new();
        scene.add_node("|grp");
        scene.add_node("|grp|hero_01:body_GEO");
        scene.set_asset_id("|grp|hero_01:body_GEO", &format!("{id}:node"));

        let mut db = MemoryDatabase::new();
        db.insert_asset(AssetDocument {
            id: oid(1),
            name: "hero".to_string(),
            parent: oid(99),
        });

        let nodes = vec!["|grp|hero_01:body_GEO".to_string()];
        let items = create_items_from_selection(&scene, &db, &nodes).unwrap();
        assert_eq!(items[0].label, "hero_01 : hero");
    }

    #[test]
    fn test_get_all_assets_skips_look_containers() {
        use crate::host::{Container, MemoryRegistry, LOOK_LOADER};

        let id = oid(1).to_string();
        let mut scene = MemoryScene::new();
        scene.add_node("|asset_GEO");
        scene.set_asset_id("|asset_GEO", &format!("{id}:node"));
        scene.add_object_set("assetModel_CON", vec!["|asset_GEO".to_string()]);
        scene.add_object_set("assetLook_CON", vec!["|asset_GEO".to_string()]);

        let mut registry = MemoryRegistry::new();
        registry.add(Container {
            object_name: "assetModel_CON".to_string(),
            loader: "ModelLoader".to_string(),
            namespace: "asset_01".to_string(),
        });
        registry.add(Container {
            object_name: "assetLook_CON".to_string(),
            loader: LOOK_LOADER.to_string(),
            namespace: "asset_01".to_string(),
        });

        let mut db = MemoryDatabase::new();
        db.insert_asset(AssetDocument {
            id: oid(1),
            name: "asset".to_string(),
            parent: oid(99),
        });

        let items = get_all_assets(&scene, &registry, &db).unwrap();
        // The look container's members resolve to the same asset, but the
        // container itself must not be walked
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].nodes, vec!["|asset_GEO".to_string()]);
    }
}
