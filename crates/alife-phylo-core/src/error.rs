//! Error type shared by the loader and the query engines.

use std::path::PathBuf;

use crate::config::TaxonId;

/// Failures surfaced by loading and querying a phylogeny.
#[derive(Debug, thiserror::Error)]
pub enum PhyloError {
    #[error("{child}'s ancestor, {ancestor}, is not in this phylogeny")]
    ReferentialIntegrity { child: TaxonId, ancestor: i64 },

    #[error("the given {subject} is not asexual")]
    NotAsexual { subject: &'static str },

    #[error("not all taxa have the '{attribute}' attribute")]
    MissingAttribute { attribute: String },

    #[error("taxon {taxon} has a non-numeric '{attribute}' value")]
    NonNumericAttribute { taxon: TaxonId, attribute: String },

    #[error("accumulated '{attribute}' count overflows a 64-bit integer")]
    CountOverflow { attribute: String },

    #[error("failed to find taxon {0} in the phylogeny")]
    UnknownTaxon(TaxonId),

    #[error("the given taxa share no common ancestor")]
    NoCommonAncestor,

    #[error("no path between taxa {from} and {to}")]
    NoPath { from: TaxonId, to: TaxonId },

    #[error("no {0} found")]
    EmptySelection(&'static str),

    #[error("taxon {0} appears more than once")]
    DuplicateTaxon(TaxonId),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("unsupported phylogeny file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhyloError>;
