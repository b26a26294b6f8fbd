// tests/store_tests.rs

use std::collections::HashMap;

use btriev::store::DataStore;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_posting_lists_are_normalized() {
    let store = DataStore::from_unsorted_index(HashMap::from([(1, vec![5, 3, 5, 1])]), None);
    assert_eq!(store.data_ids_for_tags(&[1]), vec![1, 3, 5]);
}

#[test]
fn test_universe_is_inferred_from_the_index() {
    let store = DataStore::from_unsorted_index(
        HashMap::from([(1, vec![103, 101]), (2, vec![102]), (3, vec![101, 104])]),
        None,
    );
    assert_eq!(store.all_data_ids(), &[101, 102, 103, 104]);
}

#[test]
fn test_supplied_universe_is_normalized_and_kept() {
    let store = DataStore::from_unsorted_index(
        HashMap::from([(1, vec![3, 1])]),
        Some(vec![10, 1, 3, 5, 3]),
    );
    // The supplied universe may carry ids no tag indexes.
    assert_eq!(store.all_data_ids(), &[1, 3, 5, 10]);
}

#[test]
#[should_panic(expected = "missing from the supplied universe")]
fn test_universe_must_cover_the_index() {
    DataStore::from_unsorted_index(HashMap::from([(1, vec![1, 7])]), Some(vec![1, 2, 3]));
}

#[test]
fn test_empty_index() {
    let store = DataStore::from_unsorted_index(HashMap::new(), None);
    assert!(store.all_data_ids().is_empty());
    assert!(store.data_ids_for_tags(&[1]).is_empty());
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_lookup_unions_across_tags() {
    let store = DataStore::from_unsorted_index(
        HashMap::from([(1, vec![11, 12, 17]), (2, vec![12, 13]), (4, vec![15, 16, 17])]),
        None,
    );
    assert_eq!(store.data_ids_for_tags(&[2, 4]), vec![12, 13, 15, 16, 17]);
    assert_eq!(store.data_ids_for_tags(&[1, 2]), vec![11, 12, 13, 17]);
}

#[test]
fn test_lookup_of_no_tags_is_empty() {
    let store = DataStore::from_unsorted_index(HashMap::from([(1, vec![11])]), None);
    assert!(store.data_ids_for_tags(&[]).is_empty());
}

#[test]
fn test_unindexed_tags_contribute_nothing() {
    let store = DataStore::from_unsorted_index(HashMap::from([(1, vec![11, 12])]), None);
    assert_eq!(store.data_ids_for_tags(&[1, 99]), vec![11, 12]);
    assert!(store.data_ids_for_tags(&[99]).is_empty());
}
