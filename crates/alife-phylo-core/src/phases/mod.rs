//! Report phases. Each one reads the phylogeny and fills one section of the result.

pub mod extant;
pub mod lineage;
pub mod mrca;
pub mod structure;
