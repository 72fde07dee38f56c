//! Graph loader: standard-format records → [`Phylogeny`].
//!
//! Construction runs in two passes (nodes, then edges) because rows are not
//! required to list ancestors before descendants.

pub mod ancestors;
pub mod csv_reader;
pub mod json_reader;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;

use crate::config::{AttrValue, PhylogenyRecord, TaxonId};
use crate::error::{PhyloError, Result};
use crate::graph::phylogeny::{Phylogeny, ORIGIN_ATTRIBUTE};

pub use ancestors::parse_ancestor_list;
pub use csv_reader::read_csv_records;
pub use json_reader::read_json_records;

pub const ID_FIELD: &str = "id";
pub const ANCESTOR_LIST_FIELD: &str = "ancestor_list";

/// Build a phylogeny from loader records.
///
/// Numeric ancestor tokens become ancestor → taxon edges and must name a taxon
/// present in `records`. The first non-numeric token of a taxon is kept under
/// its `origin` attribute instead.
pub fn build_phylogeny(records: Vec<PhylogenyRecord>) -> Result<Phylogeny> {
    let mut phylogeny = Phylogeny::new();
    let mut pending = Vec::with_capacity(records.len());

    // Pass 1: nodes
    for record in records {
        let idx = phylogeny.add_taxon(record.id.clone(), record.attributes)?;
        pending.push((idx, record.id, record.ancestor_list));
    }

    // Pass 2: edges
    let mut origins = 0usize;
    for (idx, child, tokens) in pending {
        let mut origin: Option<&str> = None;
        for token in &tokens {
            match ancestors::resolve_ancestor(token) {
                Some(ancestor) => {
                    let ancestor_id = TaxonId::Int(ancestor);
                    if !phylogeny.has_taxon(&ancestor_id) {
                        return Err(PhyloError::ReferentialIntegrity { child, ancestor });
                    }
                    phylogeny.add_descent(&ancestor_id, &child)?;
                }
                None => {
                    origin.get_or_insert(token.as_str());
                }
            }
        }
        if let Some(marker) = origin {
            debug!("taxon {child} originates from '{marker}'");
            phylogeny.set_attribute(idx, ORIGIN_ATTRIBUTE, AttrValue::from(marker));
            origins += 1;
        }
    }

    debug!(
        "built phylogeny: {} taxa, {} edges, {} origin markers",
        phylogeny.node_count(),
        phylogeny.edge_count(),
        origins
    );
    Ok(phylogeny)
}

/// Load a standard-format phylogeny from a `.csv` or `.json` file.
pub fn load_phylogeny(path: impl AsRef<Path>) -> Result<Phylogeny> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let records = match ext.as_str() {
        "csv" => read_csv_records(BufReader::new(File::open(path)?))?,
        "json" => read_json_records(BufReader::new(File::open(path)?))?,
        _ => return Err(PhyloError::UnsupportedFormat(path.to_path_buf())),
    };
    debug!("read {} records from {}", records.len(), path.display());
    build_phylogeny(records)
}

/// Build a phylogeny from CSV text.
pub fn phylogeny_from_csv_str(data: &str) -> Result<Phylogeny> {
    build_phylogeny(read_csv_records(data.as_bytes())?)
}

/// Build a phylogeny from JSON text.
pub fn phylogeny_from_json_str(data: &str) -> Result<Phylogeny> {
    build_phylogeny(read_json_records(data.as_bytes())?)
}
