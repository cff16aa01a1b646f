//! Grouping law, checked for arbitrary node sets: a node contributes a
//! group entry exactly when it carries an identifier, and the key is the
//! text before the first `:`.

use look_manager::prelude::*;
use proptest::prelude::*;

fn id_value() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-f0-9]{0,6}(:[a-f0-9]{0,6}){0,2}")
}

proptest! {
    #[test]
    fn grouping_matches_the_naive_model(values in prop::collection::vec(id_value(), 0..16)) {
        let mut scene = MemoryScene::new();
        let mut nodes: Vec<NodePath> = Vec::new();
        for (index, value) in values.iter().enumerate() {
            let path = format!("|node_{index}");
            scene.add_node(&path);
            if let Some(value) = value {
                scene.set_asset_id(&path, value);
            }
            nodes.push(path);
        }

        let groups = create_asset_id_hash(&scene, &nodes);

        // Naive model: walk the list, bucket by prefix, first-seen order
        let mut expected: Vec<AssetGroup> = Vec::new();
        for (node, value) in nodes.iter().zip(&values) {
            let Some(value) = value else { continue };
            let key = value.split(':').next().unwrap_or("").to_string();
            match expected.iter_mut().find(|g| g.asset_id == key) {
                Some(group) => group.nodes.push(node.clone()),
                None => expected.push(AssetGroup {
                    asset_id: key,
                    nodes: vec![node.clone()],
                }),
            }
        }

        prop_assert_eq!(groups, expected);
    }

    #[test]
    fn every_grouped_node_is_tracked(values in prop::collection::vec(id_value(), 0..16)) {
        let mut scene = MemoryScene::new();
        let mut nodes: Vec<NodePath> = Vec::new();
        for (index, value) in values.iter().enumerate() {
            let path = format!("|node_{index}");
            scene.add_node(&path);
            if let Some(value) = value {
                scene.set_asset_id(&path, value);
            }
            nodes.push(path);
        }

        let groups = create_asset_id_hash(&scene, &nodes);

        let tracked = values.iter().filter(|v| v.is_some()).count();
        let grouped: usize = groups.iter().map(|g| g.nodes.len()).sum();
        prop_assert_eq!(grouped, tracked);

        for group in &groups {
            prop_assert!(!group.nodes.is_empty());
            prop_assert!(!group.asset_id.contains(':'));
        }
    }
}
