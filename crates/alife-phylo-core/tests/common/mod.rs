//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use alife_phylo_core::config::TaxonId;
use alife_phylo_core::loader::load_phylogeny;
use alife_phylo_core::Phylogeny;

pub const TOY_LINEAGE: &str = "toy-asexual-lineage.csv";
pub const TOY_PHYLOGENY_CSV: &str = "toy-asexual-phylogeny.csv";
pub const TOY_PHYLOGENY_JSON: &str = "toy-asexual-phylogeny.json";
pub const TOY_SEXUAL: &str = "toy-sexual-phylogeny.csv";
pub const TOY_FOREST: &str = "toy-forest.csv";

// ---------------------------------------------------------------------------
// Fixture path resolution
// ---------------------------------------------------------------------------

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

/// Load a fixture phylogeny, panicking with the fixture name on failure.
pub fn load_fixture(name: &str) -> Phylogeny {
    load_phylogeny(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to load fixture {name}: {e}"))
}

// ---------------------------------------------------------------------------
// Id helpers
// ---------------------------------------------------------------------------

pub fn ids(values: &[i64]) -> Vec<TaxonId> {
    values.iter().map(|&v| TaxonId::Int(v)).collect()
}

pub fn sorted(mut values: Vec<TaxonId>) -> Vec<TaxonId> {
    values.sort();
    values
}
