use std::collections::HashMap;

/// External identifier of a tag.
pub type TagId = u64;

/// A directed `from -> to` edge between two external tag ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: TagId,
    pub to: TagId,
}

/// An external tag id paired with its display name. Names need not be
/// unique across tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub id: TagId,
    pub name: String,
}

impl TagRecord {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        TagRecord {
            id,
            name: name.into(),
        }
    }
}

/// An immutable directed graph over tag ids.
///
/// Built once from an edge list and a tag list, then shared read-only
/// across queries. Each external id maps to a dense internal index;
/// adjacency and reachability work on indices, while the public API
/// speaks external ids throughout.
///
/// The hierarchy is conceptually a forest, but cycles are tolerated:
/// reachability uses an explicit visited set and terminates regardless.
pub struct TagHierarchy {
    /// Dense index -> external id.
    ids: Vec<TagId>,
    /// External id -> dense index.
    id_to_index: HashMap<TagId, usize>,
    /// Tag name -> external ids bearing that name.
    name_to_ids: HashMap<String, Vec<TagId>>,
    /// Dense index -> successor indices.
    adjacency: Vec<Vec<usize>>,
}

impl TagHierarchy {
    /// Build a hierarchy from an edge list and a tag list.
    ///
    /// # Panics
    ///
    /// Panics if an edge references a tag id absent from the tag list.
    /// That is a structural precondition violation in the caller's
    /// data, not a query-time error.
    pub fn from_edge_list(edges: &[Edge], tags: &[TagRecord]) -> Self {
        let mut ids = Vec::with_capacity(tags.len());
        let mut id_to_index = HashMap::with_capacity(tags.len());
        let mut name_to_ids: HashMap<String, Vec<TagId>> = HashMap::new();

        for (index, tag) in tags.iter().enumerate() {
            ids.push(tag.id);
            id_to_index.insert(tag.id, index);
            name_to_ids.entry(tag.name.clone()).or_default().push(tag.id);
        }

        let mut adjacency = vec![Vec::new(); tags.len()];
        for edge in edges {
            let from = *id_to_index
                .get(&edge.from)
                .unwrap_or_else(|| panic!("edge references unknown tag id {}", edge.from));
            let to = *id_to_index
                .get(&edge.to)
                .unwrap_or_else(|| panic!("edge references unknown tag id {}", edge.to));
            adjacency[from].push(to);
        }

        TagHierarchy {
            ids,
            id_to_index,
            name_to_ids,
            adjacency,
        }
    }

    pub fn contains_tag(&self, name: &str) -> bool {
        self.name_to_ids.contains_key(name)
    }

    /// All external ids bearing `name`, empty if the name is unknown.
    pub fn get_ids(&self, name: &str) -> Vec<TagId> {
        self.name_to_ids.get(name).cloned().unwrap_or_default()
    }

    /// Resolve a path where each segment may be ambiguous (several ids
    /// sharing one name).
    ///
    /// Considers every combination of one id per segment, keeps the
    /// combinations where each consecutive pair is joined by a direct
    /// edge, and returns the deduplicated final ids across all
    /// surviving combinations. Ids unknown to the hierarchy invalidate
    /// their combination.
    ///
    /// Cost scales with the product of per-segment ambiguity counts;
    /// callers should bound path length and duplicate-name fan-out if
    /// adversarial input is possible.
    pub fn get_ids_for_path(&self, id_path: &[Vec<TagId>]) -> Vec<TagId> {
        if id_path.is_empty() {
            return Vec::new();
        }

        let mut terminals = Vec::new();
        let mut combination = Vec::with_capacity(id_path.len());
        self.collect_path_terminals(id_path, &mut combination, &mut terminals);

        let mut unique = Vec::new();
        for id in terminals {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        unique
    }

    fn collect_path_terminals(
        &self,
        remaining: &[Vec<TagId>],
        combination: &mut Vec<usize>,
        terminals: &mut Vec<TagId>,
    ) {
        if remaining.is_empty() {
            if let Some(&last) = combination.last() {
                terminals.push(self.ids[last]);
            }
            return;
        }

        for id in &remaining[0] {
            let Some(&index) = self.id_to_index.get(id) else {
                continue;
            };
            if let Some(&prev) = combination.last() {
                if !self.adjacency[prev].contains(&index) {
                    continue;
                }
            }
            combination.push(index);
            self.collect_path_terminals(&remaining[1..], combination, terminals);
            combination.pop();
        }
    }

    /// Whether a name sequence resolves to at least one existing path.
    pub fn path_exists(&self, name_path: &[&str]) -> bool {
        let id_path: Vec<Vec<TagId>> = name_path.iter().map(|name| self.get_ids(name)).collect();
        !self.get_ids_for_path(&id_path).is_empty()
    }

    /// Reachability closure: each starting id plus every id reachable
    /// by following successor edges.
    ///
    /// The visited set is shared across all starting ids, so overlapping
    /// subtrees are walked once. Safe on cyclic graphs.
    pub fn explode(&self, ids: &[TagId]) -> Vec<TagId> {
        let mut visited = vec![false; self.ids.len()];
        let mut collected = Vec::new();
        let mut frontier = Vec::new();

        for id in ids {
            let Some(&index) = self.id_to_index.get(id) else {
                continue;
            };
            if visited[index] {
                continue;
            }
            visited[index] = true;
            collected.push(self.ids[index]);
            frontier.push(index);

            while let Some(current) = frontier.pop() {
                for &next in &self.adjacency[current] {
                    if !visited[next] {
                        visited[next] = true;
                        collected.push(self.ids[next]);
                        frontier.push(next);
                    }
                }
            }
        }

        collected
    }
}
