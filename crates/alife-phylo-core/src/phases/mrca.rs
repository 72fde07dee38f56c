//! Phase 4: most recent common ancestor of the surviving leaves.

use log::warn;

use crate::config::{AnalysisConfig, AnalysisResult, MrcaOutput};
use crate::graph::phylogeny::Phylogeny;
use crate::query::mrca::{get_mrca_id_asexual, get_mrca_tree_depth_asexual};
use crate::query::structure::is_asexual;

/// Run the MRCA phase over the leaf taxa. Sexual phylogenies are skipped.
pub fn run_mrca_phase(_config: &AnalysisConfig, phylogeny: &Phylogeny, result: &mut AnalysisResult) {
    if !is_asexual(phylogeny) {
        warn!("mrca phase: phylogeny is not asexual, skipping");
        return;
    }

    let id = match get_mrca_id_asexual(phylogeny, None) {
        Ok(id) => id,
        Err(e) => {
            warn!("mrca phase: {e}");
            return;
        }
    };
    let depth = id
        .as_ref()
        .and_then(|_| get_mrca_tree_depth_asexual(phylogeny, None).ok());
    result.mrca = Some(MrcaOutput { id, depth });
}
