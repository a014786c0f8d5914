use kdthree::KdTree;
use rand::prelude::*;
use rand::rngs::StdRng;

fn tree_of(count: usize) -> KdTree<3> {
    // Sequential inserts produce a fully right-leaning chain, the worst case
    // for an unbalanced tree.
    let mut tree = KdTree::new();
    for i in 0..count {
        tree.insert([i as f64, i as f64, i as f64]);
    }
    tree
}

fn minimal_height(count: usize) -> usize {
    ((count + 1) as f64).log2().ceil() as usize
}

#[test]
fn test_balance_reaches_minimal_height() {
    for count in [1usize, 2, 3, 4, 7, 8, 15, 16, 100, 1023] {
        let mut tree = tree_of(count);
        tree.balance();
        assert_eq!(
            tree.height(),
            minimal_height(count),
            "height after balancing {} points",
            count
        );
        assert_eq!(tree.len(), count);
    }
}

#[test]
fn test_balance_factor_approaches_one() {
    let mut tree = tree_of(1023);
    assert_eq!(tree.balance_factor(), 1023.0 / (1023.0f64).log2());

    tree.balance();
    let factor = tree.balance_factor();
    assert!(factor >= 1.0);
    assert!(
        (factor - 1.0).abs() < 0.01,
        "balanced factor should be near 1.0, got {}",
        factor
    );
}

#[test]
fn test_balance_never_increases_factor() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..5 {
        let mut tree = KdTree::<3>::new();
        for _ in 0..rng.gen_range(10..500) {
            tree.insert([
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
            ]);
        }
        let before = tree.balance_factor();
        tree.balance();
        assert!(tree.balance_factor() <= before);
    }
}

#[test]
fn test_balance_preserves_point_multiset() {
    let mut tree = KdTree::<3>::new();
    let points = vec![
        [5.0, 1.0, 9.0],
        [5.0, 1.0, 9.0], // duplicate survives the rebuild
        [2.0, 2.0, 2.0],
        [8.0, 0.0, 4.0],
        [3.0, 7.0, 6.0],
    ];
    for &point in &points {
        tree.insert(point);
    }
    tree.balance();

    let mut before = points;
    let mut after = tree.points();
    before.sort_by(|a, b| a.partial_cmp(b).unwrap());
    after.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(before, after);
}

#[test]
fn test_balance_empty_and_trivial_trees() {
    let mut tree = KdTree::<3>::new();
    tree.balance();
    assert!(tree.is_empty());
    assert_eq!(tree.balance_factor(), 1.0);

    tree.insert([1.0, 2.0, 3.0]);
    tree.balance();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.balance_factor(), 1.0);
}

#[test]
fn test_clear_then_reuse() {
    let mut tree = tree_of(32);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);

    tree.insert([1.0, 2.0, 3.0]);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.nearest(&[1.0, 2.0, 3.0], 1)[0], [1.0, 2.0, 3.0]);
}

#[test]
fn test_repeated_balance_is_stable() {
    let mut tree = tree_of(100);
    tree.balance();
    let height = tree.height();
    let points_before = tree.points().len();

    tree.balance();
    assert_eq!(tree.height(), height);
    assert_eq!(tree.points().len(), points_before);
}
