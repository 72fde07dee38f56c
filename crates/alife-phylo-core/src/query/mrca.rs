//! Most-recent-common-ancestor and pairwise distance queries.

use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::TaxonId;
use crate::error::{PhyloError, Result};
use crate::graph::phylogeny::Phylogeny;
use crate::query::lineage::ancestor_path;
use crate::query::structure::{leaf_indices, require_asexual};

/// Resolve the query set; `None` means every leaf taxon.
fn query_indices(phylogeny: &Phylogeny, ids: Option<&[TaxonId]>) -> Result<Vec<NodeIndex>> {
    match ids {
        Some(ids) => ids.iter().map(|id| phylogeny.require_index(id)).collect(),
        None => Ok(leaf_indices(phylogeny)),
    }
}

fn mrca_index(phylogeny: &Phylogeny, ids: Option<&[TaxonId]>) -> Result<Option<NodeIndex>> {
    require_asexual(phylogeny)?;
    let queried = query_indices(phylogeny, ids)?;
    let Some((&first, rest)) = queried.split_first() else {
        return Ok(None);
    };

    // Ordered from the taxon up to its root, so the first shared entry is the deepest.
    let first_path = ancestor_path(phylogeny, first);
    let mut shared: HashSet<NodeIndex> = first_path.iter().copied().collect();
    for &idx in rest {
        let path: HashSet<NodeIndex> = ancestor_path(phylogeny, idx).into_iter().collect();
        shared.retain(|candidate| path.contains(candidate));
        if shared.is_empty() {
            return Ok(None);
        }
    }
    Ok(first_path.into_iter().find(|idx| shared.contains(idx)))
}

/// Id of the most recent common ancestor of `ids` (default: all leaf taxa).
///
/// Returns `Ok(None)` when the taxa share no ancestor, e.g. when they sit in
/// different independent phylogenies.
pub fn get_mrca_id_asexual(
    phylogeny: &Phylogeny,
    ids: Option<&[TaxonId]>,
) -> Result<Option<TaxonId>> {
    Ok(mrca_index(phylogeny, ids)?.map(|idx| phylogeny.taxon(idx).id.clone()))
}

pub fn has_common_ancestor_asexual(phylogeny: &Phylogeny, ids: Option<&[TaxonId]>) -> Result<bool> {
    Ok(mrca_index(phylogeny, ids)?.is_some())
}

/// Edge count from the MRCA's root down to the MRCA.
///
/// Unlike [`get_mrca_id_asexual`], a missing common ancestor is an error here.
pub fn get_mrca_tree_depth_asexual(
    phylogeny: &Phylogeny,
    ids: Option<&[TaxonId]>,
) -> Result<usize> {
    let mrca = mrca_index(phylogeny, ids)?.ok_or(PhyloError::NoCommonAncestor)?;
    Ok(ancestor_path(phylogeny, mrca).len() - 1)
}

/// Undirected shortest-path distance (in edges) for every pair `ids[i], ids[j]`, `i < j`.
pub fn get_pairwise_distances(phylogeny: &Phylogeny, ids: &[TaxonId]) -> Result<Vec<usize>> {
    let indices = ids
        .iter()
        .map(|id| phylogeny.require_index(id))
        .collect::<Result<Vec<_>>>()?;

    let mut distances = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1) / 2);
    for (i, &source) in indices.iter().enumerate() {
        if i + 1 == indices.len() {
            break;
        }
        let reached = undirected_distances(phylogeny, source);
        for (j, target) in indices.iter().enumerate().skip(i + 1) {
            let d = reached.get(target).ok_or_else(|| PhyloError::NoPath {
                from: ids[i].clone(),
                to: ids[j].clone(),
            })?;
            distances.push(*d);
        }
    }
    Ok(distances)
}

/// BFS over the graph with edge direction ignored.
fn undirected_distances(phylogeny: &Phylogeny, source: NodeIndex) -> HashMap<NodeIndex, usize> {
    let graph = phylogeny.inner_graph();
    let mut dist: HashMap<NodeIndex, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(source, 0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next = dist[&current] + 1;
        for neighbour in graph.neighbors_undirected(current) {
            if !dist.contains_key(&neighbour) {
                dist.insert(neighbour, next);
                queue.push_back(neighbour);
            }
        }
    }
    dist
}
