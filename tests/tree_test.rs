//! Tests for node linking, tree construction and structural equality

use arbor::util::testing;
use arbor::{views, DomainError, NodeArena, NodeId, Tree};
use rstest::{fixture, rstest};

// ============================================================
// Fixtures
// ============================================================

//      A
//     / \
//    B   C
//        |
//        D
#[fixture]
fn sample() -> Tree<&'static str> {
    testing::init_test_setup();
    build_sample("D")
}

fn build_sample(deepest: &'static str) -> Tree<&'static str> {
    let mut arena = NodeArena::new();
    let a = arena.new_node("A");
    let b = arena.new_node("B");
    let c = arena.new_node("C");
    let d = arena.new_node(deepest);
    arena.append_children(a, [b, c]).unwrap();
    arena.append_children(c, [d]).unwrap();
    Tree::new(arena, a).unwrap()
}

//             r
//      /      |      \
//     a       b       c
//    / \     /|\      |
//   a1 a2  b1 b2 b3   c1
//                      |
//                     c11
fn wide() -> Tree<String> {
    let mut arena = NodeArena::new();
    let mut node = |name: &str| arena.new_node(name.to_string());
    let r = node("r");
    let (a, b, c) = (node("a"), node("b"), node("c"));
    let (a1, a2) = (node("a1"), node("a2"));
    let (b1, b2, b3) = (node("b1"), node("b2"), node("b3"));
    let (c1, c11) = (node("c1"), node("c11"));
    arena.append_children(r, [a, b, c]).unwrap();
    arena.append_children(a, [a1, a2]).unwrap();
    arena.append_children(b, [b1, b2, b3]).unwrap();
    arena.append_children(c, [c1]).unwrap();
    arena.append_children(c1, [c11]).unwrap();
    Tree::new(arena, r).unwrap()
}

fn names<I: Clone>(tree: &Tree<I>, ids: impl IntoIterator<Item = NodeId>) -> Vec<I> {
    ids.into_iter()
        .map(|id| tree.get(id).unwrap().clone())
        .collect()
}

// ============================================================
// Construction
// ============================================================

#[rstest]
fn given_sample_when_built_then_caches_size_and_leaves(sample: Tree<&'static str>) {
    assert_eq!(sample.size(), 4);
    assert_eq!(names(&sample, sample.leaves().iter().copied()), vec!["B", "D"]);
    assert_eq!(sample.get(sample.root()), Ok(&"A"));
    assert_eq!(sample.depth(), 3);
}

#[test]
fn given_wide_tree_when_built_then_size_counts_every_reachable_node() {
    let tree = wide();
    // Every node of the fixture is linked below the root
    assert_eq!(tree.size(), tree.arena().len());
    assert_eq!(tree.size(), 11);
    assert_eq!(tree.size(), tree.iter_preorder().count());
}

#[test]
fn given_wide_tree_when_built_then_leaves_are_childless_nodes_left_to_right() {
    let tree = wide();
    let expected: Vec<NodeId> = tree
        .iter_preorder()
        .filter(|(_, node)| node.is_leaf())
        .map(|(id, _)| id)
        .collect();
    assert_eq!(tree.leaves(), expected.as_slice());
    assert_eq!(
        names(&tree, tree.leaves().iter().copied()),
        vec!["a1", "a2", "b1", "b2", "b3", "c11"]
    );
}

#[test]
fn given_absent_root_when_building_then_no_tree() {
    let arena: NodeArena<&str> = NodeArena::new();
    assert!(Tree::new(arena, None::<NodeId>).is_none());
}

// ============================================================
// Linking
// ============================================================

#[test]
fn given_existing_children_when_appending_and_prepending_then_order_is_prepended_existing_appended() {
    let mut arena = NodeArena::new();
    let root = arena.new_node("root");
    let o1 = arena.new_node("o1");
    let o2 = arena.new_node("o2");
    arena.append_children(root, [o1, o2]).unwrap();

    let a1 = arena.new_node("a1");
    let a2 = arena.new_node("a2");
    arena.append_children(root, [a1, a2]).unwrap();
    let p1 = arena.new_node("p1");
    let p2 = arena.new_node("p2");
    arena.prepend_children(root, [p1, p2]).unwrap();

    let tree = Tree::new(arena, root).unwrap();
    assert_eq!(
        names(&tree, tree.children(root)),
        vec!["p1", "p2", "o1", "o2", "a1", "a2"]
    );
    assert_eq!(
        names(&tree, tree.arena().children_rev(root)),
        vec!["a2", "a1", "o2", "o1", "p2", "p1"]
    );
    let root_node = tree.node(root).unwrap();
    assert_eq!(root_node.first_child(), Some(p1));
    assert_eq!(root_node.last_child(), Some(a2));
}

#[test]
fn given_every_node_when_linked_then_parent_chain_contains_it_once() {
    let tree = wide();
    for (id, node) in tree.iter_preorder() {
        if let Some(parent) = node.parent() {
            let occurrences = tree.children(parent).filter(|&c| c == id).count();
            assert_eq!(occurrences, 1);
        } else {
            assert_eq!(id, tree.root());
        }
        if node.is_leaf() {
            assert_eq!(node.last_child(), None);
        }
    }
}

#[rstest]
#[case::appending(true)]
#[case::prepending(false)]
fn given_only_absent_candidates_when_linking_then_no_op_success(#[case] append: bool) {
    let mut arena = NodeArena::new();
    let root = arena.new_node("root");
    let candidates: Vec<Option<NodeId>> = vec![None, None];

    let result = if append {
        arena.append_children(root, candidates)
    } else {
        arena.prepend_children(root, candidates)
    };

    assert_eq!(result, Ok(()));
    assert!(arena.node(root).unwrap().is_leaf());
}

#[test]
fn given_absent_receiver_when_linking_then_nil_receiver_and_nothing_changes() {
    let mut arena = NodeArena::new();
    let child = arena.new_node("child");
    assert_eq!(
        arena.append_children(None::<NodeId>, [child]),
        Err(DomainError::NilReceiver)
    );
    assert_eq!(arena.node(child).unwrap().parent(), None);
}

#[test]
fn given_handles_from_another_arena_when_linking_or_building_then_treated_as_absent() {
    let mut arena = NodeArena::new();
    let a = arena.new_node("a");
    let b = arena.new_node("b");

    // First nodes of two fresh arenas occupy the same slot
    let mut other = NodeArena::new();
    let foreign = other.new_node("x");

    assert_eq!(
        arena.append_children(foreign, [b]),
        Err(DomainError::NilReceiver)
    );
    assert_eq!(arena.prepend_children(a, [foreign]), Ok(()));
    assert!(arena.node(a).unwrap().is_leaf());
    assert_eq!(arena.node(b).unwrap().parent(), None);
    assert_eq!(arena.get(foreign), Err(DomainError::InvalidNode(foreign)));
    assert!(Tree::new(arena, foreign).is_none());
}

// ============================================================
// Snapshot caches
// ============================================================

#[rstest]
fn given_built_tree_when_linking_more_nodes_then_caches_stay_stale_until_refresh(
    mut sample: Tree<&'static str>,
) {
    let root = sample.root();
    let e = sample.new_node("E");
    sample.append_children(root, [e]).unwrap();

    // Snapshot semantics: linking does not touch the caches
    assert_eq!(sample.size(), 4);
    assert_eq!(sample.leaves().len(), 2);
    assert_eq!(sample.iter_preorder().count(), 5);

    sample.refresh();
    assert_eq!(sample.size(), 5);
    assert_eq!(names(&sample, sample.leaves().iter().copied()), vec!["B", "D", "E"]);
}

#[rstest]
fn given_payload_replaced_when_comparing_then_not_equal(mut sample: Tree<&'static str>) {
    let other = build_sample("D");
    assert_eq!(sample, other);

    let leaf = sample.leaves()[1];
    *sample.get_mut(leaf).unwrap() = "X";
    assert_ne!(sample, other);
}

// ============================================================
// Equality
// ============================================================

#[rstest]
fn given_any_tree_when_compared_with_itself_then_equal(sample: Tree<&'static str>) {
    assert!(views::equals(Some(&sample), Some(&sample)));
    let tree = wide();
    assert!(views::equals(Some(&tree), Some(&tree)));
}

#[test]
fn given_identical_shapes_with_distinct_nodes_when_compared_then_equal() {
    let left = build_sample("D");
    let right = build_sample("D");
    assert!(views::equals(Some(&left), Some(&right)));
}

#[test]
fn given_different_leaf_payload_when_compared_then_not_equal() {
    let left = build_sample("D");
    let right = build_sample("Z");
    assert!(!views::equals(Some(&left), Some(&right)));
}

#[test]
fn given_same_size_but_different_shape_when_compared_then_not_equal() {
    // A -> [B, C -> D]  vs  A -> [B -> D, C]
    let left = build_sample("D");

    let mut arena = NodeArena::new();
    let a = arena.new_node("A");
    let b = arena.new_node("B");
    let c = arena.new_node("C");
    let d = arena.new_node("D");
    arena.append_children(a, [b, c]).unwrap();
    arena.append_children(b, [d]).unwrap();
    let right = Tree::new(arena, a).unwrap();

    assert_eq!(left.size(), right.size());
    assert!(!views::equals(Some(&left), Some(&right)));
}

#[test]
fn given_different_sizes_when_compared_then_not_equal() {
    let left = build_sample("D");
    let mut arena = NodeArena::new();
    let a = arena.new_node("A");
    let right = Tree::new(arena, a).unwrap();
    assert!(!views::equals(Some(&left), Some(&right)));
}
