use std::collections::BTreeSet;

use arena_rbtree::{Color, Error, NodeId, RbTree};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

// ─── Independent invariant checker ───────────────────────────────────────────

/// Walks the tree through the public accessors only and checks the
/// red-black rules. Returns the number of nodes reached.
fn check_red_black(tree: &RbTree<i64>) -> Result<usize, String> {
    let Some(root) = tree.root() else {
        return if tree.is_empty() && tree.height() == 0 {
            Ok(0)
        } else {
            Err("no root but the tree is not empty".into())
        };
    };
    if tree.color(root) != Ok(Color::Black) {
        return Err("root is not black".into());
    }
    if tree.parent(root) != Ok(None) {
        return Err("root has a parent".into());
    }

    let mut count = 0;
    black_height(tree, Some(root), None, None, &mut count)?;
    if count != tree.len() {
        return Err(format!("reached {count} nodes, len() is {}", tree.len()));
    }
    Ok(count)
}

fn black_height(
    tree: &RbTree<i64>,
    node: Option<NodeId>,
    lower: Option<i64>,
    upper: Option<i64>,
    count: &mut usize,
) -> Result<usize, String> {
    let Some(node) = node else { return Ok(0) };
    *count += 1;

    let key = *tree.key(node).map_err(|error| error.to_string())?;
    if lower.is_some_and(|lower| key <= lower) || upper.is_some_and(|upper| key >= upper) {
        return Err(format!("{key} is out of order"));
    }

    let color = tree.color(node).map_err(|error| error.to_string())?;
    let left = tree.left(node).map_err(|error| error.to_string())?;
    let right = tree.right(node).map_err(|error| error.to_string())?;
    for child in [left, right].into_iter().flatten() {
        if tree.parent(child) != Ok(Some(node)) {
            return Err(format!("a child of {key} does not point back at it"));
        }
        if color == Color::Red && tree.color(child) == Ok(Color::Red) {
            return Err(format!("red {key} has a red child"));
        }
    }

    let left_height = black_height(tree, left, lower, Some(key), count)?;
    let right_height = black_height(tree, right, Some(key), upper, count)?;
    if left_height != right_height {
        return Err(format!("black-heights under {key} differ: {left_height} vs {right_height}"));
    }
    Ok(left_height + usize::from(color == Color::Black))
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Remove(i64),
    Search(i64),
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => value_strategy().prop_map(TreeOp::Insert),
        4 => value_strategy().prop_map(TreeOp::Remove),
        2 => value_strategy().prop_map(TreeOp::Search),
    ]
}

fn tree_from(keys: &[i64]) -> RbTree<i64> {
    let mut tree = RbTree::new();
    for &key in keys {
        let _ = tree.insert(key);
    }
    tree
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations on both RbTree and BTreeSet, checking results
    /// and the red-black rules after every step.
    #[test]
    fn ops_match_btreeset(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: RbTree<i64> = RbTree::new();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match *op {
                TreeOp::Insert(key) => {
                    let result = tree.insert(key);
                    if model.insert(key) {
                        prop_assert!(result.is_ok(), "insert({}) failed: {:?}", key, result);
                    } else {
                        prop_assert_eq!(result, Err(Error::DuplicateKey), "insert({})", key);
                    }
                }
                TreeOp::Remove(key) => {
                    let expected = if model.remove(&key) { Ok(key) } else { Err(Error::NotFound) };
                    prop_assert_eq!(tree.remove_key(&key), expected, "remove({})", key);
                }
                TreeOp::Search(key) => {
                    let found = tree.search(&key).and_then(|node| tree.key(node).copied());
                    let expected = if model.contains(&key) { Ok(key) } else { Err(Error::NotFound) };
                    prop_assert_eq!(found, expected, "search({})", key);
                }
            }
            prop_assert_eq!(tree.len(), model.len(), "len mismatch after {:?}", op);
            if let Err(violation) = check_red_black(&tree) {
                prop_assert!(false, "after {:?}: {}", op, violation);
            }
        }

        let keys: Vec<i64> = tree.iter().copied().collect();
        let expected: Vec<i64> = model.iter().copied().collect();
        prop_assert_eq!(keys, expected);
    }

    /// minimum/maximum of the root are the true extremes; iteration is strictly ascending.
    #[test]
    fn order_statistics(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let tree = tree_from(&values);
        let model: BTreeSet<i64> = values.iter().copied().collect();

        let root = tree.root().expect("tree is not empty");
        let minimum = tree.minimum(root).and_then(|node| tree.key(node).copied());
        let maximum = tree.maximum(root).and_then(|node| tree.key(node).copied());
        prop_assert_eq!(minimum.ok(), model.first().copied());
        prop_assert_eq!(maximum.ok(), model.last().copied());
        prop_assert_eq!(tree.first(), model.first());
        prop_assert_eq!(tree.last(), model.last());

        let keys: Vec<i64> = tree.iter().copied().collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(keys.len(), model.len());

        let reversed: Vec<i64> = tree.iter().rev().copied().collect();
        prop_assert!(reversed.iter().eq(model.iter().rev()));
    }

    /// successor(a) == b and predecessor(b) == a for adjacent keys; the ends have no neighbor.
    #[test]
    fn neighbors_of_adjacent_keys(values in proptest::collection::vec(value_strategy(), 1..500)) {
        let tree = tree_from(&values);
        let keys: Vec<i64> = tree.iter().copied().collect();

        for pair in keys.windows(2) {
            let a = tree.search(&pair[0]).expect("key is present");
            let b = tree.search(&pair[1]).expect("key is present");
            prop_assert_eq!(tree.successor(a), Ok(Some(b)));
            prop_assert_eq!(tree.predecessor(b), Ok(Some(a)));
        }

        let first = tree.search(&keys[0]).expect("key is present");
        let last = tree.search(&keys[keys.len() - 1]).expect("key is present");
        prop_assert_eq!(tree.predecessor(first), Ok(None));
        prop_assert_eq!(tree.successor(last), Ok(None));
    }

    /// height <= 2 * log2(n + 1)
    #[test]
    fn height_bound(values in proptest::collection::vec(any::<i64>(), 0..TEST_SIZE)) {
        let tree = tree_from(&values);
        let bound = 2.0 * ((tree.len() + 1) as f64).log2();
        prop_assert!(tree.height() as f64 <= bound, "height {} for {} keys", tree.height(), tree.len());
    }

    /// Removing through node ids (rather than keys) keeps the tree valid and
    /// invalidates exactly the removed ids.
    #[test]
    fn remove_by_id(values in proptest::collection::vec(value_strategy(), 1..300), picks in proptest::collection::vec(any::<usize>(), 1..100)) {
        let mut tree = tree_from(&values);
        let mut removed: Vec<NodeId> = Vec::new();

        for pick in picks {
            let live: Vec<NodeId> = tree.in_order().collect();
            if live.is_empty() {
                break;
            }
            let node = live[pick % live.len()];
            let key = *tree.key(node).expect("id from in_order is live");
            prop_assert_eq!(tree.remove(node), Ok(key));
            prop_assert!(!tree.contains(&key));
            removed.push(node);

            if let Err(violation) = check_red_black(&tree) {
                prop_assert!(false, "after removing {}: {}", key, violation);
            }
        }

        for node in removed {
            prop_assert_eq!(tree.key(node), Err(Error::InvalidArgument));
        }
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn ascending_three_rotate_to_middle_root() {
    let tree = tree_from(&[10, 20, 30]);
    let root = tree.root().expect("tree is not empty");

    assert_eq!(tree.key(root), Ok(&20));
    assert_eq!(tree.color(root), Ok(Color::Black));
    let left = tree.left(root).expect("live").expect("root has a left child");
    let right = tree.right(root).expect("live").expect("root has a right child");
    assert_eq!((tree.key(left), tree.color(left)), (Ok(&10), Ok(Color::Red)));
    assert_eq!((tree.key(right), tree.color(right)), (Ok(&30), Ok(Color::Red)));
    assert_eq!(tree.height(), 2);
    assert_eq!(check_red_black(&tree), Ok(3));
}

#[test]
fn insert_then_delete_single_key() {
    let mut tree = RbTree::new();
    let node = tree.insert(1).expect("fresh tree");
    assert_eq!(tree.remove(node), Ok(1));

    assert_eq!(tree.root(), None);
    assert_eq!(tree.height(), 0);
    assert!(tree.is_empty());
}

#[test]
fn delete_root_of_single_node_tree() {
    let mut tree = tree_from(&[42]);
    let root = tree.root().expect("tree is not empty");
    assert_eq!(tree.remove(root), Ok(42));

    assert_eq!(tree.height(), 0);
    assert_eq!(tree.search(&42), Err(Error::NotFound));
}

#[test]
fn duplicate_insert_leaves_tree_unchanged() {
    let mut tree = tree_from(&[5, 2, 8, 1, 9]);
    let shape_before: Vec<(i64, Color)> = tree
        .level_order()
        .map(|node| (*tree.key(node).expect("live"), tree.color(node).expect("live")))
        .collect();

    assert_eq!(tree.insert(8), Err(Error::DuplicateKey));

    let shape_after: Vec<(i64, Color)> = tree
        .level_order()
        .map(|node| (*tree.key(node).expect("live"), tree.color(node).expect("live")))
        .collect();
    assert_eq!(shape_after, shape_before);
    assert_eq!(tree.len(), 5);
}

#[test]
fn descending_and_ascending_bulk_stay_balanced() {
    let mut tree = RbTree::new();
    for key in (0..1_000).rev() {
        tree.insert(key).expect("keys are distinct");
    }
    assert_eq!(check_red_black(&tree), Ok(1_000));
    assert!(tree.height() <= 19);

    for key in 0..1_000 {
        assert_eq!(tree.remove_key(&key), Ok(key));
        if key % 97 == 0 {
            assert_eq!(check_red_black(&tree), Ok(999 - key as usize));
        }
    }
    assert!(tree.is_empty());
}

#[test]
fn subtree_min_max_from_inner_node() {
    let tree = tree_from(&[50, 30, 70, 20, 40, 60, 80, 35, 45]);
    let thirty = tree.search(&30).expect("key is present");

    let mut subtree = Vec::new();
    let mut pending = vec![thirty];
    while let Some(node) = pending.pop() {
        subtree.push(*tree.key(node).expect("live"));
        pending.extend(tree.left(node).expect("live"));
        pending.extend(tree.right(node).expect("live"));
    }

    let low = tree.minimum(thirty).and_then(|node| tree.key(node).copied());
    let high = tree.maximum(thirty).and_then(|node| tree.key(node).copied());
    assert_eq!(low.ok(), subtree.iter().min().copied());
    assert_eq!(high.ok(), subtree.iter().max().copied());
}

#[test]
fn ids_do_not_cross_trees() {
    let mut a = tree_from(&[1]);
    let mut b = tree_from(&[2]);
    let id_a = a.root().expect("tree is not empty");

    assert_eq!(b.remove(id_a), Err(Error::InvalidArgument));
    assert_eq!(b.iter().copied().collect::<Vec<_>>(), [2]);

    // A clone accepts the ids of the tree it was cloned from.
    let copy = a.clone();
    assert_eq!(copy.key(id_a), Ok(&1));
    assert_eq!(a.remove(id_a), Ok(1));
}
