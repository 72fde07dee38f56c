//! Phase 1: shape of the phylogeny (roots, leaves, independent phylogenies).

use crate::config::{AnalysisConfig, AnalysisResult, StructureOutput};
use crate::graph::phylogeny::Phylogeny;
use crate::query::structure::{component_members, get_leaf_taxa_ids, get_roots, is_asexual};

/// Run the structure phase: record roots, leaves and component sizes.
pub fn run_structure_phase(
    _config: &AnalysisConfig,
    phylogeny: &Phylogeny,
    result: &mut AnalysisResult,
) {
    let mut component_sizes: Vec<usize> = component_members(phylogeny)
        .iter()
        .map(|members| members.len())
        .collect();
    component_sizes.sort_by(|a, b| b.cmp(a));

    result.structure = StructureOutput {
        asexual: is_asexual(phylogeny),
        roots: get_roots(phylogeny),
        leaves: get_leaf_taxa_ids(phylogeny),
        component_sizes,
    };
}
