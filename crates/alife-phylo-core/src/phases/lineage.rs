//! Phase 3: trace the line of descent and measure it.

use log::{debug, warn};

use crate::config::{AnalysisConfig, AnalysisResult, LineageOutput, StateOutput};
use crate::graph::phylogeny::Phylogeny;
use crate::query::lineage::{extract_asexual_lod, lineage_ids, state_runs};
use crate::query::metrics::{
    get_asexual_lineage_length, get_asexual_lineage_mutation_accumulation,
    get_asexual_lineage_num_discrete_state_changes, get_asexual_lineage_num_discrete_unique_states,
};
use crate::Result;

/// Run the lineage phase: extract the LOD and describe it.
pub fn run_lineage_phase(config: &AnalysisConfig, phylogeny: &Phylogeny, result: &mut AnalysisResult) {
    let lod = match extract_asexual_lod(phylogeny, &config.extant) {
        Ok(lod) => lod,
        Err(e) => {
            warn!("lineage phase: no line of descent: {e}");
            return;
        }
    };
    debug!("line of descent has {} taxa", lod.node_count());

    match describe_lineage(config, &lod) {
        Ok(output) => result.lod = Some(output),
        Err(e) => warn!("lineage phase: {e}"),
    }
}

/// Summarise one lineage with the trait and mutation attributes from `config`.
///
/// The lineage itself must be valid; a failing trait or mutation metric is
/// logged and left out of the output.
pub fn describe_lineage(config: &AnalysisConfig, lineage: &Phylogeny) -> Result<LineageOutput> {
    let taxa = lineage_ids(lineage)?;
    let length = get_asexual_lineage_length(lineage)?;
    let mut output = LineageOutput {
        taxa,
        length,
        state_changes: None,
        unique_states: None,
        states: Vec::new(),
        mutation_accumulation: Default::default(),
    };

    let traits = &config.trait_attributes;
    if !traits.is_empty() {
        match get_asexual_lineage_num_discrete_state_changes(lineage, traits) {
            Ok(n) => output.state_changes = Some(n),
            Err(e) => warn!("state changes over {traits:?}: {e}"),
        }
        match get_asexual_lineage_num_discrete_unique_states(lineage, traits) {
            Ok(n) => output.unique_states = Some(n),
            Err(e) => warn!("unique states over {traits:?}: {e}"),
        }
        match states(lineage, traits) {
            Ok(states) => output.states = states,
            Err(e) => warn!("abstracting lineage over {traits:?}: {e}"),
        }
    }

    let mutations = &config.mutation_attributes;
    if !mutations.is_empty() {
        match get_asexual_lineage_mutation_accumulation(lineage, mutations, config.skip_root) {
            Ok(totals) => output.mutation_accumulation = totals,
            Err(e) => warn!("mutation accumulation over {mutations:?}: {e}"),
        }
    }

    Ok(output)
}

fn states(lineage: &Phylogeny, traits: &[String]) -> Result<Vec<StateOutput>> {
    let states = state_runs(lineage, traits)?
        .into_iter()
        .map(|(values, members)| StateOutput {
            values: traits.iter().cloned().zip(values).collect(),
            members: members
                .iter()
                .map(|&idx| lineage.taxon(idx).id.clone())
                .collect(),
        })
        .collect();
    Ok(states)
}
