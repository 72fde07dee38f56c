//! ALife Phylo Core: phylogeny graph engine for artificial-life data.
//!
//! This crate loads standard-format phylogenies (one row per taxon with an
//! ancestor list) into a directed graph and answers structural, lineage and
//! metric queries over it. A small pipeline strings the queries together into
//! a JSON summary report.

pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod output;
pub mod phases;
pub mod pipeline;
pub mod query;

pub use error::{PhyloError, Result};
pub use graph::phylogeny::{Phylogeny, Taxon};
pub use loader::load_phylogeny;
