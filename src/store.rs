use std::collections::HashMap;

use crate::hierarchy::TagId;

/// External identifier of a data record.
pub type DataId = u64;

/// A normalized inverted index: tag id -> sorted, deduplicated data
/// ids, plus the sorted universe of all data ids.
///
/// Immutable after construction and shared read-only across queries.
/// The universe is the right-hand operand of set negation, so it must
/// be a superset of every posting list.
pub struct DataStore {
    tag_id_to_data_ids: HashMap<TagId, Vec<DataId>>,
    all_data_ids: Vec<DataId>,
}

fn sort_dedup(mut ids: Vec<DataId>) -> Vec<DataId> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl DataStore {
    /// Build a store from a raw (possibly unsorted, duplicated) index
    /// and an optional raw universe.
    ///
    /// When the universe is omitted it is inferred as the union of all
    /// posting lists.
    ///
    /// # Panics
    ///
    /// Panics if a supplied universe omits a data id referenced by the
    /// index. That is a structural precondition violation in the
    /// caller's data, not a query-time error.
    pub fn from_unsorted_index(
        index: HashMap<TagId, Vec<DataId>>,
        all_data_ids: Option<Vec<DataId>>,
    ) -> Self {
        let tag_id_to_data_ids: HashMap<TagId, Vec<DataId>> = index
            .into_iter()
            .map(|(tag_id, data_ids)| (tag_id, sort_dedup(data_ids)))
            .collect();

        let all_data_ids = match all_data_ids {
            None => {
                let mut union: Vec<DataId> = tag_id_to_data_ids
                    .values()
                    .flatten()
                    .copied()
                    .collect();
                union.sort_unstable();
                union.dedup();
                union
            }
            Some(supplied) => {
                let supplied = sort_dedup(supplied);
                for (tag_id, data_ids) in &tag_id_to_data_ids {
                    for data_id in data_ids {
                        assert!(
                            supplied.binary_search(data_id).is_ok(),
                            "data id {} indexed under tag {} is missing from the supplied universe",
                            data_id,
                            tag_id,
                        );
                    }
                }
                supplied
            }
        };

        DataStore {
            tag_id_to_data_ids,
            all_data_ids,
        }
    }

    /// The sorted, deduplicated union of the posting lists for
    /// `tag_ids`. Ids absent from the index contribute nothing.
    pub fn data_ids_for_tags(&self, tag_ids: &[TagId]) -> Vec<DataId> {
        let mut data_ids: Vec<DataId> = tag_ids
            .iter()
            .filter_map(|tag_id| self.tag_id_to_data_ids.get(tag_id))
            .flatten()
            .copied()
            .collect();
        data_ids.sort_unstable();
        data_ids.dedup();
        data_ids
    }

    /// The full, sorted set of all known data ids.
    pub fn all_data_ids(&self) -> &[DataId] {
        &self.all_data_ids
    }
}
