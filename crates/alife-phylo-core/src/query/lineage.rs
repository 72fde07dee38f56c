//! Lineage extraction, abstraction and line-of-descent tracing.

use petgraph::graph::NodeIndex;
use std::collections::{BTreeMap, HashSet};

use crate::config::{AttrValue, ExtantPolicy, TaxonId};
use crate::error::{PhyloError, Result};
use crate::graph::phylogeny::Phylogeny;
use crate::query::extant::extant_by_destruction;
use crate::query::structure::{
    has_single_root, is_asexual, require_asexual, require_attributes, root_indices,
};

const STATE_MEMBERS: &str = "members";
const STATE_NUM_MEMBERS: &str = "num_members";
const ORIGIN_TIME: &str = "origin_time";
const DESTRUCTION_TIME: &str = "destruction_time";

/// Extract the lineage of `taxon_id`: the taxon and its chain of direct ancestors.
pub fn extract_asexual_lineage(phylogeny: &Phylogeny, taxon_id: &TaxonId) -> Result<Phylogeny> {
    let idx = phylogeny.require_index(taxon_id)?;
    require_asexual(phylogeny)?;
    let members: HashSet<NodeIndex> = ancestor_path(phylogeny, idx).into_iter().collect();
    Ok(phylogeny.induced_subgraph(&members))
}

/// Is this an asexual, single-rooted phylogeny?
///
/// A connected component with no taxon lacking an ancestor is an ancestry
/// cycle, which is not a lineage.
pub fn is_asexual_lineage(phylogeny: &Phylogeny) -> bool {
    is_asexual(phylogeny) && has_single_root(phylogeny) && !root_indices(phylogeny).is_empty()
}

pub(crate) fn require_asexual_lineage(lineage: &Phylogeny) -> Result<()> {
    if is_asexual_lineage(lineage) {
        Ok(())
    } else {
        Err(PhyloError::NotAsexual { subject: "lineage" })
    }
}

/// Walk from `idx` up through first parents to a root. Starts with `idx`.
pub(crate) fn ancestor_path(phylogeny: &Phylogeny, idx: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![idx];
    let mut seen: HashSet<NodeIndex> = path.iter().copied().collect();
    let mut current = idx;
    while let Some(&parent) = phylogeny.parents(current).first() {
        if !seen.insert(parent) {
            break;
        }
        path.push(parent);
        current = parent;
    }
    path
}

/// Walk a lineage from its root to its tip, following the first-loaded child.
pub(crate) fn lineage_walk(lineage: &Phylogeny) -> Vec<NodeIndex> {
    let Some(&root) = root_indices(lineage).first() else {
        return Vec::new();
    };
    let mut walk = vec![root];
    let mut seen: HashSet<NodeIndex> = walk.iter().copied().collect();
    let mut current = root;
    while let Some(&child) = lineage.children(current).first() {
        if !seen.insert(child) {
            break;
        }
        walk.push(child);
        current = child;
    }
    walk
}

/// Ids along a lineage, root first.
pub fn lineage_ids(lineage: &Phylogeny) -> Result<Vec<TaxonId>> {
    require_asexual_lineage(lineage)?;
    Ok(lineage_walk(lineage)
        .into_iter()
        .map(|idx| lineage.taxon(idx).id.clone())
        .collect())
}

/// Values of `attributes` on one taxon, in list order.
pub(crate) fn state_of<S: AsRef<str>>(
    lineage: &Phylogeny,
    idx: NodeIndex,
    attributes: &[S],
) -> Vec<AttrValue> {
    let taxon = lineage.taxon(idx);
    attributes
        .iter()
        .map(|a| taxon.get(a.as_ref()).cloned().unwrap_or_default())
        .collect()
}

/// Consecutive taxa sharing one attribute tuple, root first.
pub(crate) type StateRun = (Vec<AttrValue>, Vec<NodeIndex>);

pub(crate) fn state_runs<S: AsRef<str>>(
    lineage: &Phylogeny,
    attributes: &[S],
) -> Result<Vec<StateRun>> {
    require_asexual_lineage(lineage)?;
    require_attributes(lineage, attributes)?;

    let mut runs: Vec<StateRun> = Vec::new();
    for idx in lineage_walk(lineage) {
        let state = state_of(lineage, idx, attributes);
        if let Some((current, members)) = runs.last_mut() {
            if *current == state {
                members.push(idx);
                continue;
            }
        }
        runs.push((state, vec![idx]));
    }
    Ok(runs)
}

/// Collapse runs of consecutive taxa that share the same attribute values.
///
/// Each state becomes a node with id `0..n` (root first) holding the shared
/// values, its `members`, `num_members`, and when available the first member's
/// `origin_time` and the last member's `destruction_time`.
pub fn abstract_asexual_lineage<S: AsRef<str>>(
    lineage: &Phylogeny,
    attributes: &[S],
) -> Result<Phylogeny> {
    let runs = state_runs(lineage, attributes)?;

    let mut abstracted = Phylogeny::new();
    let mut previous: Option<TaxonId> = None;
    for (state_id, (values, members)) in runs.into_iter().enumerate() {
        let mut node = BTreeMap::new();
        let first = lineage.taxon(members[0]);
        let last = lineage.taxon(members[members.len() - 1]);
        if let Some(origin) = first.get(ORIGIN_TIME) {
            node.insert(ORIGIN_TIME.to_string(), origin.clone());
        }
        if let Some(destruction) = last.get(DESTRUCTION_TIME) {
            node.insert(DESTRUCTION_TIME.to_string(), destruction.clone());
        }
        for (attribute, value) in attributes.iter().zip(values) {
            node.insert(attribute.as_ref().to_string(), value);
        }
        node.insert(
            STATE_NUM_MEMBERS.to_string(),
            AttrValue::Int(members.len() as i64),
        );
        node.insert(
            STATE_MEMBERS.to_string(),
            AttrValue::List(
                members
                    .iter()
                    .map(|&m| AttrValue::from(&lineage.taxon(m).id))
                    .collect(),
            ),
        );

        let id = TaxonId::Int(state_id as i64);
        abstracted.add_taxon(id.clone(), node)?;
        if let Some(prev) = &previous {
            abstracted.add_descent(prev, &id)?;
        }
        previous = Some(id);
    }
    Ok(abstracted)
}

/// Extract the line of descent: the lineage of a surviving taxon.
///
/// The first extant leaf in load order is traced; if no extant taxon is a leaf,
/// the first extant taxon is used.
pub fn extract_asexual_lod(phylogeny: &Phylogeny, policy: &ExtantPolicy) -> Result<Phylogeny> {
    require_asexual(phylogeny)?;
    let extant = extant_by_destruction(phylogeny, policy)?;
    let tip = extant
        .iter()
        .copied()
        .find(|&idx| phylogeny.out_degree(idx) == 0)
        .or_else(|| extant.first().copied())
        .ok_or(PhyloError::EmptySelection("extant taxa"))?;
    let members: HashSet<NodeIndex> = ancestor_path(phylogeny, tip).into_iter().collect();
    Ok(phylogeny.induced_subgraph(&members))
}
