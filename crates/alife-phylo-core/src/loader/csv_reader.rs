//! CSV rows → loader records.

use std::collections::BTreeMap;
use std::io::Read;

use crate::config::{AttrValue, PhylogenyRecord, TaxonId};
use crate::error::{PhyloError, Result};
use crate::loader::ancestors::parse_ancestor_list;
use crate::loader::{ANCESTOR_LIST_FIELD, ID_FIELD};

/// Read standard-format CSV. Requires `id` and `ancestor_list` columns.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<PhylogenyRecord>> {
    let mut rdr = ::csv::ReaderBuilder::new().trim(::csv::Trim::Headers).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PhyloError::MalformedInput(format!("missing '{name}' column")))
    };
    let id_col = column(ID_FIELD)?;
    let ancestor_col = column(ANCESTOR_LIST_FIELD)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let raw_id = row.get(id_col).unwrap_or_default();
        if raw_id.trim().is_empty() {
            return Err(PhyloError::MalformedInput(format!(
                "row {} has an empty id",
                records.len() + 1
            )));
        }
        let id = TaxonId::parse(raw_id);
        let ancestor_list = parse_ancestor_list(row.get(ancestor_col).unwrap_or_default());

        let mut attributes = BTreeMap::new();
        for (i, (header, cell)) in headers.iter().zip(row.iter()).enumerate() {
            if i == id_col || i == ancestor_col {
                continue;
            }
            attributes.insert(header.to_string(), AttrValue::parse_cell(cell));
        }

        records.push(PhylogenyRecord {
            id,
            ancestor_list,
            attributes,
        });
    }
    Ok(records)
}
