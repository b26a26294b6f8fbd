// tests/hierarchy_tests.rs

use btriev::hierarchy::{Edge, TagHierarchy, TagRecord};

fn edge(from: u64, to: u64) -> Edge {
    Edge { from, to }
}

/// 1:a -> {2:b, 3:b}, 2:b -> 4:c, 3:b -> 5:c
fn diamond() -> TagHierarchy {
    TagHierarchy::from_edge_list(
        &[edge(1, 2), edge(1, 3), edge(2, 4), edge(3, 5)],
        &[
            TagRecord::new(1, "a"),
            TagRecord::new(2, "b"),
            TagRecord::new(3, "b"),
            TagRecord::new(4, "c"),
            TagRecord::new(5, "c"),
        ],
    )
}

// ============================================================================
// Construction and Name Lookup
// ============================================================================

#[test]
fn test_contains_tag() {
    let hierarchy = diamond();
    assert!(hierarchy.contains_tag("a"));
    assert!(hierarchy.contains_tag("b"));
    assert!(!hierarchy.contains_tag("A"));
    assert!(!hierarchy.contains_tag("missing"));
}

#[test]
fn test_get_ids_resolves_duplicate_names() {
    let hierarchy = diamond();
    assert_eq!(hierarchy.get_ids("a"), vec![1]);
    assert_eq!(hierarchy.get_ids("b"), vec![2, 3]);
    assert_eq!(hierarchy.get_ids("c"), vec![4, 5]);
}

#[test]
fn test_get_ids_for_unknown_name_is_empty() {
    let hierarchy = diamond();
    assert!(hierarchy.get_ids("missing").is_empty());
}

#[test]
#[should_panic(expected = "edge references unknown tag id")]
fn test_edge_with_unknown_id_panics() {
    TagHierarchy::from_edge_list(&[edge(1, 99)], &[TagRecord::new(1, "a")]);
}

#[test]
fn test_duplicate_edges_are_tolerated() {
    let hierarchy = TagHierarchy::from_edge_list(
        &[edge(1, 2), edge(1, 2)],
        &[TagRecord::new(1, "a"), TagRecord::new(2, "b")],
    );
    assert_eq!(hierarchy.explode(&[1]), vec![1, 2]);
}

// ============================================================================
// Path Resolution
// ============================================================================

#[test]
fn test_empty_path_resolves_to_nothing() {
    let hierarchy = diamond();
    assert!(hierarchy.get_ids_for_path(&[]).is_empty());
}

#[test]
fn test_single_segment_path_is_identity() {
    let hierarchy = diamond();
    assert_eq!(hierarchy.get_ids_for_path(&[vec![1]]), vec![1]);
    assert_eq!(hierarchy.get_ids_for_path(&[vec![2, 3]]), vec![2, 3]);
}

#[test]
fn test_path_follows_direct_edges_only() {
    let hierarchy = diamond();
    assert_eq!(hierarchy.get_ids_for_path(&[vec![1], vec![2]]), vec![2]);
    // 4 is reachable from 1 but not adjacent to it.
    assert!(hierarchy.get_ids_for_path(&[vec![1], vec![4]]).is_empty());
}

#[test]
fn test_ambiguous_segments_try_every_combination() {
    let hierarchy = diamond();
    // a > b resolves through both ids named 'b'.
    assert_eq!(hierarchy.get_ids_for_path(&[vec![1], vec![2, 3]]), vec![2, 3]);
    // a > b > c survives as 1->2->4 and 1->3->5.
    assert_eq!(
        hierarchy.get_ids_for_path(&[vec![1], vec![2, 3], vec![4, 5]]),
        vec![4, 5]
    );
}

#[test]
fn test_converging_combinations_deduplicate_terminals() {
    // Both ids named 'b' point at the same terminal.
    let hierarchy = TagHierarchy::from_edge_list(
        &[edge(1, 2), edge(1, 3), edge(2, 4), edge(3, 4)],
        &[
            TagRecord::new(1, "a"),
            TagRecord::new(2, "b"),
            TagRecord::new(3, "b"),
            TagRecord::new(4, "c"),
        ],
    );
    assert_eq!(
        hierarchy.get_ids_for_path(&[vec![1], vec![2, 3], vec![4]]),
        vec![4]
    );
}

#[test]
fn test_unknown_ids_invalidate_their_combination() {
    let hierarchy = diamond();
    assert!(hierarchy.get_ids_for_path(&[vec![99], vec![2]]).is_empty());
    assert_eq!(hierarchy.get_ids_for_path(&[vec![99, 1], vec![2]]), vec![2]);
}

#[test]
fn test_path_exists() {
    let hierarchy = diamond();
    assert!(hierarchy.path_exists(&["a", "b"]));
    assert!(hierarchy.path_exists(&["a", "b", "c"]));
    assert!(!hierarchy.path_exists(&["b", "a"]));
    assert!(!hierarchy.path_exists(&["a", "c"]));
    assert!(!hierarchy.path_exists(&["a", "missing"]));
}

// ============================================================================
// Explode
// ============================================================================

#[test]
fn test_explode_includes_the_starting_ids() {
    let hierarchy = diamond();
    let mut exploded = hierarchy.explode(&[1]);
    exploded.sort_unstable();
    assert_eq!(exploded, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_explode_of_a_leaf_is_itself() {
    let hierarchy = diamond();
    assert_eq!(hierarchy.explode(&[4]), vec![4]);
}

#[test]
fn test_explode_of_unknown_id_is_empty() {
    let hierarchy = diamond();
    assert!(hierarchy.explode(&[99]).is_empty());
}

#[test]
fn test_explode_visits_shared_subtrees_once() {
    let hierarchy = diamond();
    let mut exploded = hierarchy.explode(&[2, 3]);
    exploded.sort_unstable();
    assert_eq!(exploded, vec![2, 3, 4, 5]);

    // A start id already covered by an earlier start contributes no
    // duplicates.
    let mut exploded = hierarchy.explode(&[1, 4]);
    exploded.sort_unstable();
    assert_eq!(exploded, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_explode_terminates_on_cycles() {
    let hierarchy = TagHierarchy::from_edge_list(
        &[edge(1, 2), edge(2, 3), edge(3, 1)],
        &[
            TagRecord::new(1, "a"),
            TagRecord::new(2, "b"),
            TagRecord::new(3, "c"),
        ],
    );
    let mut exploded = hierarchy.explode(&[2]);
    exploded.sort_unstable();
    assert_eq!(exploded, vec![1, 2, 3]);
}

#[test]
fn test_explode_is_idempotent() {
    // Exploding a closure adds nothing: the result already contains
    // everything reachable from it.
    let hierarchy = diamond();
    for start in [vec![1], vec![2, 3], vec![4]] {
        let once = hierarchy.explode(&start);
        let mut twice = hierarchy.explode(&once);
        twice.sort_unstable();
        let mut once_sorted = once.clone();
        once_sorted.sort_unstable();
        assert_eq!(twice, once_sorted);
    }
}

#[test]
fn test_explode_is_idempotent_on_cycles() {
    let hierarchy = TagHierarchy::from_edge_list(
        &[edge(1, 2), edge(2, 3), edge(3, 1)],
        &[
            TagRecord::new(1, "a"),
            TagRecord::new(2, "b"),
            TagRecord::new(3, "c"),
        ],
    );
    let once = hierarchy.explode(&[3]);
    let mut twice = hierarchy.explode(&once);
    twice.sort_unstable();
    let mut once_sorted = once;
    once_sorted.sort_unstable();
    assert_eq!(twice, once_sorted);
}
