// tests/scene_graph.rs
use glam::Vec3;
use robot_tilegrid::{MemoryScene, SceneContainer};

#[test]
fn test_children_follow_creation_order() {
    let mut scene = MemoryScene::new();
    let a = scene.instantiate("a");
    let b = scene.instantiate("b");
    let c = scene.instantiate("c");
    assert_eq!(scene.children(scene.root()), vec![a, b, c]);
}

#[test]
fn test_set_parent_moves_node_between_children() {
    let mut scene = MemoryScene::new();
    let root = scene.root();
    let parent = scene.instantiate("parent");
    let child = scene.instantiate("child");

    scene.set_parent(child, parent);
    assert_eq!(scene.parent(child), Some(parent));
    assert_eq!(scene.children(root), vec![parent]);
    assert_eq!(scene.children(parent), vec![child]);

    scene.set_parent(child, root);
    assert_eq!(scene.children(parent), Vec::<u32>::new());
    assert_eq!(scene.children(root), vec![parent, child]);
}

#[test]
fn test_set_parent_refuses_cycles() {
    let mut scene = MemoryScene::new();
    let parent = scene.instantiate("parent");
    let child = scene.instantiate("child");
    scene.set_parent(child, parent);

    scene.set_parent(parent, child);
    assert_eq!(scene.parent(parent), Some(scene.root()), "Cycle was created");
    scene.set_parent(parent, parent);
    assert_eq!(scene.parent(parent), Some(scene.root()));
}

#[test]
fn test_destroy_removes_subtree_and_unlinks() {
    let mut scene = MemoryScene::new();
    let keep = scene.instantiate("keep");
    let parent = scene.instantiate("parent");
    let child = scene.instantiate("child");
    let grandchild = scene.instantiate("grandchild");
    scene.set_parent(child, parent);
    scene.set_parent(grandchild, child);

    scene.destroy(parent);

    assert_eq!(scene.len(), 1);
    for node in [parent, child, grandchild] {
        assert!(!scene.contains(node), "Node {node} survived");
    }
    assert_eq!(scene.children(scene.root()), vec![keep]);
}

#[test]
fn test_destroy_children_keeps_parent() {
    let mut scene = MemoryScene::new();
    let parent = scene.instantiate("parent");
    let child = scene.instantiate("child");
    scene.set_parent(child, parent);
    scene.set_local_position(parent, Vec3::X);

    scene.destroy_children(parent);
    assert!(scene.contains(parent));
    assert!(!scene.contains(child));
    assert_eq!(scene.local_position(parent), Some(Vec3::X));

    scene.destroy_children(scene.root());
    assert!(scene.is_empty());
    assert_eq!(scene.children(scene.root()), Vec::<u32>::new());
}

#[test]
fn test_destroying_root_is_ignored() {
    let mut scene = MemoryScene::new();
    scene.instantiate("a");
    scene.destroy(scene.root());
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_wide_teardown_clears_every_node() {
    let mut scene = MemoryScene::new();
    for i in 0..20_000 {
        scene.instantiate(i);
    }
    scene.destroy_children(scene.root());
    assert!(scene.is_empty());

    // Nodes never outlive their parent.
    let parent = scene.instantiate(-1);
    for i in 0..20_000 {
        let node = scene.instantiate(i);
        scene.set_parent(node, parent);
    }
    scene.destroy(parent);
    assert!(scene.is_empty());
}
