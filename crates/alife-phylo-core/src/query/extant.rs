//! Extant-taxa selection.
//!
//! Two policies coexist: a pure destruction-marker test, and a time-window test
//! that also honours origin and destruction times.

use petgraph::graph::NodeIndex;

use crate::config::{ExtantPolicy, QueryTime, TaxonId, TaxonRecord};
use crate::error::{PhyloError, Result};
use crate::graph::phylogeny::{Phylogeny, Taxon};
use crate::query::structure::require_attributes;

/// Ids of taxa whose destruction attribute still holds the not-destroyed sentinel.
pub fn get_extant_taxa_ids_by_destruction_time(
    phylogeny: &Phylogeny,
    policy: &ExtantPolicy,
) -> Result<Vec<TaxonId>> {
    Ok(extant_by_destruction(phylogeny, policy)?
        .into_iter()
        .map(|idx| phylogeny.taxon(idx).id.clone())
        .collect())
}

pub fn get_extant_taxa_by_destruction_time(
    phylogeny: &Phylogeny,
    policy: &ExtantPolicy,
) -> Result<Vec<TaxonRecord>> {
    Ok(extant_by_destruction(phylogeny, policy)?
        .into_iter()
        .map(|idx| phylogeny.taxon(idx).to_record())
        .collect())
}

pub(crate) fn extant_by_destruction(
    phylogeny: &Phylogeny,
    policy: &ExtantPolicy,
) -> Result<Vec<NodeIndex>> {
    require_attributes(phylogeny, &[policy.destruction_attribute.as_str()])?;
    Ok(phylogeny
        .indices()
        .filter(|&idx| not_destroyed(phylogeny.taxon(idx), policy))
        .collect())
}

/// Ids of taxa alive at `time`.
///
/// At [`QueryTime::Present`] a taxon is alive iff it was never destroyed. At a
/// concrete time `t` it must also have originated before `t`, and either never
/// have been destroyed or have been destroyed after `t`.
pub fn get_extant_taxa_ids_at_time(
    phylogeny: &Phylogeny,
    time: QueryTime,
    policy: &ExtantPolicy,
) -> Result<Vec<TaxonId>> {
    Ok(extant_at_time(phylogeny, time, policy)?
        .into_iter()
        .map(|idx| phylogeny.taxon(idx).id.clone())
        .collect())
}

pub fn get_extant_taxa_at_time(
    phylogeny: &Phylogeny,
    time: QueryTime,
    policy: &ExtantPolicy,
) -> Result<Vec<TaxonRecord>> {
    Ok(extant_at_time(phylogeny, time, policy)?
        .into_iter()
        .map(|idx| phylogeny.taxon(idx).to_record())
        .collect())
}

fn extant_at_time(
    phylogeny: &Phylogeny,
    time: QueryTime,
    policy: &ExtantPolicy,
) -> Result<Vec<NodeIndex>> {
    require_attributes(phylogeny, &[policy.destruction_attribute.as_str()])?;
    let t = match time {
        QueryTime::Present => return extant_by_destruction(phylogeny, policy),
        QueryTime::At(t) => t,
    };
    require_attributes(phylogeny, &[policy.origin_time_attribute.as_str()])?;

    let mut extant = Vec::new();
    for idx in phylogeny.indices() {
        let taxon = phylogeny.taxon(idx);
        let survives = not_destroyed(taxon, policy)
            || numeric(taxon, &policy.destruction_attribute)? > t;
        if survives && numeric(taxon, &policy.origin_time_attribute)? < t {
            extant.push(idx);
        }
    }
    Ok(extant)
}

fn not_destroyed(taxon: &Taxon, policy: &ExtantPolicy) -> bool {
    taxon.get(&policy.destruction_attribute) == Some(&policy.not_destroyed_value)
}

fn numeric(taxon: &Taxon, attribute: &str) -> Result<f64> {
    taxon
        .get(attribute)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| PhyloError::NonNumericAttribute {
            taxon: taxon.id.clone(),
            attribute: attribute.to_string(),
        })
}
