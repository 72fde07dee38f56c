//! JSON serialisation of the summary report.

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;

use crate::config::{AnalysisConfig, AnalysisResult};
use crate::graph::phylogeny::Phylogeny;

/// Attach metadata and headline stats to the sections filled by the phases.
pub fn build_result(
    config: &AnalysisConfig,
    phylogeny: &Phylogeny,
    sections: AnalysisResult,
    timings: &HashMap<String, f64>,
    total_ms: f64,
) -> AnalysisResult {
    let input_path = Path::new(&config.input_path)
        .canonicalize()
        .unwrap_or_else(|_| Path::new(&config.input_path).to_path_buf());

    // Build metadata
    let mut metadata = HashMap::new();
    metadata.insert(
        "input_path".to_string(),
        serde_json::Value::String(input_path.to_string_lossy().to_string()),
    );
    metadata.insert(
        "analysed_at".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    metadata.insert(
        "alife_phylo_version".to_string(),
        serde_json::Value::String(env!("CARGO_PKG_VERSION").to_string()),
    );
    metadata.insert(
        "analysis_duration_ms".to_string(),
        serde_json::json!(((total_ms * 10.0).round() / 10.0)),
    );
    metadata.insert(
        "phase_timings".to_string(),
        serde_json::to_value(timings).unwrap_or_default(),
    );

    // Build stats
    let structure = &sections.structure;
    let mut stats = HashMap::new();
    stats.insert("taxa".to_string(), serde_json::json!(phylogeny.node_count()));
    stats.insert("edges".to_string(), serde_json::json!(phylogeny.edge_count()));
    stats.insert("roots".to_string(), serde_json::json!(structure.roots.len()));
    stats.insert("leaves".to_string(), serde_json::json!(structure.leaves.len()));
    stats.insert(
        "independent_phylogenies".to_string(),
        serde_json::json!(structure.component_sizes.len()),
    );
    stats.insert(
        "extant".to_string(),
        serde_json::json!(sections.extant.by_destruction.as_ref().map(Vec::len)),
    );
    stats.insert(
        "lod_length".to_string(),
        serde_json::json!(sections.lod.as_ref().map(|lod| lod.length)),
    );

    AnalysisResult {
        metadata,
        stats,
        ..sections
    }
}

/// Write the analysis result to a JSON file.
pub fn write_output(result: &AnalysisResult, output_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::other)?;
    std::fs::write(output_path, json)
}
