//! JSON documents → loader records.
//!
//! Two layouts are accepted: an object keyed by taxon id (pandas `orient="index"`)
//! or an array of objects each carrying an `id` field.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Read;

use crate::config::{AttrValue, PhylogenyRecord, TaxonId};
use crate::error::{PhyloError, Result};
use crate::loader::ancestors::parse_ancestor_list;
use crate::loader::{ANCESTOR_LIST_FIELD, ID_FIELD};

pub fn read_json_records<R: Read>(reader: R) -> Result<Vec<PhylogenyRecord>> {
    let doc: Value = serde_json::from_reader(reader)?;
    match doc {
        Value::Object(entries) => {
            let mut records = entries
                .into_iter()
                .map(|(key, fields)| match fields {
                    Value::Object(fields) => record_from_fields(TaxonId::parse(&key), &fields),
                    _ => Err(PhyloError::MalformedInput(format!(
                        "taxon {key} is not a JSON object"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            // Object keys come back in string order; load in id order instead.
            records.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(records)
        }
        Value::Array(rows) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let fields = row.as_object().ok_or_else(|| {
                    PhyloError::MalformedInput(format!("row {i} is not a JSON object"))
                })?;
                let id = fields
                    .get(ID_FIELD)
                    .and_then(id_from_value)
                    .ok_or_else(|| PhyloError::MalformedInput(format!("row {i} has no id")))?;
                record_from_fields(id, fields)
            })
            .collect(),
        _ => Err(PhyloError::MalformedInput(
            "expected a JSON object or array of taxa".to_string(),
        )),
    }
}

fn id_from_value(value: &Value) -> Option<TaxonId> {
    match value {
        Value::Number(n) => n.as_i64().map(TaxonId::Int),
        Value::String(s) => Some(TaxonId::parse(s)),
        _ => None,
    }
}

fn record_from_fields(id: TaxonId, fields: &Map<String, Value>) -> Result<PhylogenyRecord> {
    let ancestor_list = match fields.get(ANCESTOR_LIST_FIELD) {
        Some(Value::Array(items)) => items.iter().map(ancestor_token).collect(),
        Some(Value::String(literal)) => parse_ancestor_list(literal),
        Some(Value::Null) | None => {
            return Err(PhyloError::MalformedInput(format!(
                "taxon {id} has no '{ANCESTOR_LIST_FIELD}'"
            )))
        }
        Some(other) => vec![ancestor_token(other)],
    };

    let attributes: BTreeMap<String, AttrValue> = fields
        .iter()
        .filter(|(key, _)| key.as_str() != ID_FIELD && key.as_str() != ANCESTOR_LIST_FIELD)
        .map(|(key, value)| (key.clone(), AttrValue::from(value)))
        .collect();

    Ok(PhylogenyRecord {
        id,
        ancestor_list,
        attributes,
    })
}

/// Textual token for one ancestor entry; integral floats print without a fraction.
fn ancestor_token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(x)) if x.fract() == 0.0 => (x as i64).to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
