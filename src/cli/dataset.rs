//! JSON dataset loading for the btriev CLI.
//!
//! A dataset file bundles everything a query evaluates against:
//!
//! ```json
//! {
//!   "tags": [{"id": 1, "name": "tag1"}, {"id": 2, "name": "tag2"}],
//!   "edges": [{"from": 1, "to": 2}],
//!   "index": {"1": [101, 102], "2": [102]},
//!   "all_data_ids": [101, 102, 103]
//! }
//! ```
//!
//! `all_data_ids` is optional; when omitted the universe is inferred as
//! the union of the index's posting lists.

use std::collections::{HashMap, HashSet};

use crate::hierarchy::{Edge, TagHierarchy, TagRecord};
use crate::store::{DataId, DataStore};

use super::CliError;

/// A fully loaded dataset: the two long-lived structures queries run
/// against.
pub struct Dataset {
    pub hierarchy: TagHierarchy,
    pub store: DataStore,
}

fn invalid(message: impl Into<String>) -> CliError {
    CliError::InvalidDataset(message.into())
}

fn as_u64(value: &serde_json::Value, what: &str) -> Result<u64, CliError> {
    value
        .as_u64()
        .ok_or_else(|| invalid(format!("{} must be a non-negative integer", what)))
}

fn parse_tags(value: &serde_json::Value) -> Result<Vec<TagRecord>, CliError> {
    let entries = value
        .as_array()
        .ok_or_else(|| invalid("'tags' must be an array"))?;

    let mut tags = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = as_u64(
            entry.get("id").ok_or_else(|| invalid("tag entry missing 'id'"))?,
            "tag id",
        )?;
        let name = entry
            .get("name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| invalid("tag entry missing string 'name'"))?;
        tags.push(TagRecord::new(id, name));
    }
    Ok(tags)
}

fn parse_edges(value: &serde_json::Value) -> Result<Vec<Edge>, CliError> {
    let entries = value
        .as_array()
        .ok_or_else(|| invalid("'edges' must be an array"))?;

    let mut edges = Vec::with_capacity(entries.len());
    for entry in entries {
        let from = as_u64(
            entry.get("from").ok_or_else(|| invalid("edge missing 'from'"))?,
            "edge 'from'",
        )?;
        let to = as_u64(
            entry.get("to").ok_or_else(|| invalid("edge missing 'to'"))?,
            "edge 'to'",
        )?;
        edges.push(Edge { from, to });
    }
    Ok(edges)
}

fn parse_index(value: &serde_json::Value) -> Result<HashMap<u64, Vec<DataId>>, CliError> {
    let entries = value
        .as_object()
        .ok_or_else(|| invalid("'index' must be an object keyed by tag id"))?;

    let mut index = HashMap::with_capacity(entries.len());
    for (key, ids) in entries {
        let tag_id: u64 = key
            .parse()
            .map_err(|_| invalid(format!("index key '{}' is not a tag id", key)))?;
        let ids = ids
            .as_array()
            .ok_or_else(|| invalid("index values must be arrays of data ids"))?
            .iter()
            .map(|id| as_u64(id, "data id"))
            .collect::<Result<Vec<DataId>, CliError>>()?;
        index.insert(tag_id, ids);
    }
    Ok(index)
}

/// Parse a dataset from its JSON text.
pub fn load_dataset(json: &str) -> Result<Dataset, CliError> {
    let root: serde_json::Value = serde_json::from_str(json).map_err(CliError::Json)?;

    let tags = parse_tags(root.get("tags").ok_or_else(|| invalid("missing 'tags'"))?)?;
    let edges = parse_edges(root.get("edges").ok_or_else(|| invalid("missing 'edges'"))?)?;
    let index = parse_index(root.get("index").ok_or_else(|| invalid("missing 'index'"))?)?;

    let all_data_ids = match root.get("all_data_ids") {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => Some(
            value
                .as_array()
                .ok_or_else(|| invalid("'all_data_ids' must be an array"))?
                .iter()
                .map(|id| as_u64(id, "data id"))
                .collect::<Result<Vec<DataId>, CliError>>()?,
        ),
    };

    // The library treats these as structural preconditions and panics;
    // a dataset file is user input, so check them here and report like
    // any other malformed dataset.
    let known_tags: HashSet<u64> = tags.iter().map(|tag| tag.id).collect();
    for edge in &edges {
        for id in [edge.from, edge.to] {
            if !known_tags.contains(&id) {
                return Err(invalid(format!("edge references unknown tag id {}", id)));
            }
        }
    }
    if let Some(universe) = &all_data_ids {
        for (tag_id, data_ids) in &index {
            for data_id in data_ids {
                if !universe.contains(data_id) {
                    return Err(invalid(format!(
                        "data id {} indexed under tag {} is missing from 'all_data_ids'",
                        data_id, tag_id,
                    )));
                }
            }
        }
    }

    Ok(Dataset {
        hierarchy: TagHierarchy::from_edge_list(&edges, &tags),
        store: DataStore::from_unsorted_index(index, all_data_ids),
    })
}
