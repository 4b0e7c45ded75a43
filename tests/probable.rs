use osrb_tree::{Probable, RedBlackTree};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn dice() -> RedBlackTree<u8, ()> {
    let mut tree = RedBlackTree::new(false);
    for face in [1, 2, 3, 3] {
        tree.insert(face, ());
    }
    tree
}

#[test]
fn counts_and_probabilities() {
    let tree = dice();

    assert_eq!(tree.sample_size(), 4);
    assert_eq!(tree.count_of(&[3]), 2);
    assert_eq!(tree.count_of(&[2, 3]), 3);
    assert_eq!(tree.count_of(&[4]), 0);
    assert_eq!(tree.probability_of(&[2, 3]), 0.75);
    assert_eq!(tree.expected_value(16, &[2, 3]), 12.0);
}

#[test]
fn repeated_elements_count_twice() {
    let tree = dice();
    assert_eq!(tree.count_of(&[3, 3]), 4);
}

#[test]
fn empty_tree_has_zero_probability() {
    let tree: RedBlackTree<u8, ()> = RedBlackTree::new(true);

    assert_eq!(tree.count_of(&[1]), 0);
    assert_eq!(tree.probability_of(&[1]), 0.0);
    assert_eq!(tree.expected_value(100, &[1]), 0.0);
    assert_eq!(tree.probability_where(|_, _| true), 0.0);
}

#[test]
fn probability_where_counts_matching_entries() {
    let tree = RedBlackTree::from([(1, "low"), (5, "high"), (6, "high"), (2, "low")]);
    assert_eq!(tree.probability_where(|_, v| *v == "high"), 0.5);
    assert_eq!(tree.probability_where(|k, _| *k > 1), 0.75);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Tests `count_of` against a linear scan of the inserted keys.
    #[test]
    fn count_of_matches_scan(
        keys in proptest::collection::vec(0u8..32, 0..1_000),
        probes in proptest::collection::vec(0u8..40, 0..8),
    ) {
        let tree: RedBlackTree<u8, ()> = keys.iter().map(|&k| (k, ())).collect();
        let expected: usize = probes.iter().map(|p| keys.iter().filter(|&k| k == p).count()).sum();

        prop_assert_eq!(tree.count_of(&probes), expected);
        let probability = tree.probability_of(&probes);
        if keys.is_empty() {
            prop_assert_eq!(probability, 0.0);
        } else {
            prop_assert!((probability - expected as f64 / keys.len() as f64).abs() < 1e-12);
        }
    }
}
