//! Metrics computed along an asexual lineage.
//!
//! Every metric walks from the root to the tip, following the first-loaded
//! successor at each step, and refuses anything that is not an asexual lineage.

use std::collections::{BTreeMap, HashSet};

use crate::config::AttrValue;
use crate::error::{PhyloError, Result};
use crate::graph::phylogeny::Phylogeny;
use crate::query::lineage::{lineage_walk, require_asexual_lineage, state_of};
use crate::query::structure::require_attributes;

/// Number of taxa in the lineage.
pub fn get_asexual_lineage_length(lineage: &Phylogeny) -> Result<usize> {
    require_asexual_lineage(lineage)?;
    Ok(lineage.node_count())
}

/// Number of discrete states visited along the lineage.
///
/// A state is the tuple of `attributes` on a taxon. The root's state counts as
/// the first one, so a lineage that never changes has one state.
pub fn get_asexual_lineage_num_discrete_state_changes<S: AsRef<str>>(
    lineage: &Phylogeny,
    attributes: &[S],
) -> Result<usize> {
    require_asexual_lineage(lineage)?;
    require_attributes(lineage, attributes)?;

    let mut states = 0;
    let mut current: Option<Vec<AttrValue>> = None;
    for idx in lineage_walk(lineage) {
        let state = state_of(lineage, idx, attributes);
        if current.as_ref() != Some(&state) {
            states += 1;
            current = Some(state);
        }
    }
    Ok(states)
}

/// Number of distinct attribute tuples seen anywhere along the lineage.
pub fn get_asexual_lineage_num_discrete_unique_states<S: AsRef<str>>(
    lineage: &Phylogeny,
    attributes: &[S],
) -> Result<usize> {
    require_asexual_lineage(lineage)?;
    require_attributes(lineage, attributes)?;

    let unique: HashSet<Vec<AttrValue>> = lineage_walk(lineage)
        .into_iter()
        .map(|idx| state_of(lineage, idx, attributes))
        .collect();
    Ok(unique.len())
}

/// Sum each mutation-count attribute along the lineage.
///
/// With `skip_root` the root's counts are left out. Counts must be integral,
/// and a total that no longer fits in an `i64` fails with `CountOverflow`.
pub fn get_asexual_lineage_mutation_accumulation<S: AsRef<str>>(
    lineage: &Phylogeny,
    attributes: &[S],
    skip_root: bool,
) -> Result<BTreeMap<String, i64>> {
    require_asexual_lineage(lineage)?;
    require_attributes(lineage, attributes)?;

    let mut totals: BTreeMap<String, i64> = attributes
        .iter()
        .map(|a| (a.as_ref().to_string(), 0))
        .collect();
    let skip = usize::from(skip_root);
    for idx in lineage_walk(lineage).into_iter().skip(skip) {
        let taxon = lineage.taxon(idx);
        for attribute in attributes {
            let attribute = attribute.as_ref();
            let count = taxon
                .get(attribute)
                .and_then(AttrValue::as_i64)
                .ok_or_else(|| PhyloError::NonNumericAttribute {
                    taxon: taxon.id.clone(),
                    attribute: attribute.to_string(),
                })?;
            let total = totals.entry(attribute.to_string()).or_insert(0);
            *total = total
                .checked_add(count)
                .ok_or_else(|| PhyloError::CountOverflow {
                    attribute: attribute.to_string(),
                })?;
        }
    }
    Ok(totals)
}
