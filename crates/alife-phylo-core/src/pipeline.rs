//! Sequential phase orchestrator with timing.

use std::collections::HashMap;
use std::time::Instant;

use log::debug;

use crate::config::{AnalysisConfig, AnalysisResult};
use crate::graph::phylogeny::Phylogeny;
use crate::loader::load_phylogeny;
use crate::output::build_result;
use crate::phases;

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("load", "Loading phylogeny"),
    ("structure", "Mapping roots and components"),
    ("extant", "Selecting extant taxa"),
    ("lineage", "Tracing line of descent"),
    ("mrca", "Finding common ancestor"),
];

/// Progress callback type: (phase_name, label).
pub type ProgressCallback = Box<dyn FnMut(&str, &str)>;

/// Type alias for phase function closures to keep signatures readable.
type PhaseFn = Box<dyn FnOnce(&AnalysisConfig, &Phylogeny, &mut AnalysisResult)>;

fn report(progress_callback: &mut Option<ProgressCallback>, name: &str) {
    if let Some(ref mut cb) = progress_callback {
        let label = PHASE_LABELS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, l)| *l)
            .unwrap_or(name);
        cb(name, label);
    }
}

/// Load the configured phylogeny, run every report phase over it and return the result.
pub fn run_pipeline(
    config: &AnalysisConfig,
    mut progress_callback: Option<ProgressCallback>,
) -> Result<AnalysisResult, Box<dyn std::error::Error>> {
    let mut timings: HashMap<String, f64> = HashMap::new();
    let total_start = Instant::now();

    report(&mut progress_callback, "load");
    let start = Instant::now();
    let phylogeny = load_phylogeny(&config.input_path)?;
    timings.insert("load".to_string(), start.elapsed().as_secs_f64());

    let phase_fns: Vec<(&str, PhaseFn)> = vec![
        ("structure", Box::new(phases::structure::run_structure_phase)),
        ("extant", Box::new(phases::extant::run_extant_phase)),
        ("lineage", Box::new(phases::lineage::run_lineage_phase)),
        ("mrca", Box::new(phases::mrca::run_mrca_phase)),
    ];

    let mut report_sections = AnalysisResult::default();
    for (name, phase_fn) in phase_fns {
        report(&mut progress_callback, name);

        let start = Instant::now();
        phase_fn(config, &phylogeny, &mut report_sections);
        let elapsed = start.elapsed().as_secs_f64();
        debug!("phase {name} took {:.3} ms", elapsed * 1000.0);
        timings.insert(name.to_string(), elapsed);
    }

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

    Ok(build_result(config, &phylogeny, report_sections, &timings, total_ms))
}
