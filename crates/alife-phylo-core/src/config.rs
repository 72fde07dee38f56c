//! Core data types and configuration for phylogeny analysis.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

/// Identifier of a taxon. Textual ids that parse as integers are stored as `Int`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaxonId {
    Int(i64),
    Name(String),
}

impl TaxonId {
    /// Parse a textual id, preferring the integer form.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Name(trimmed.to_string()),
        }
    }
}

impl std::fmt::Display for TaxonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TaxonId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for TaxonId {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// A dynamically typed taxon attribute value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Type a raw CSV cell: empty, integer, finite float, boolean, then trimmed string.
    pub fn parse_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Self::Null;
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return Self::Int(n);
        }
        // `inf` and `nan` stay text, as they do in JSON input.
        if let Ok(x) = trimmed.parse::<f64>() {
            if x.is_finite() {
                return Self::Float(x);
            }
        }
        match trimmed {
            "True" | "true" => Self::Bool(true),
            "False" | "false" => Self::Bool(false),
            _ => Self::Str(trimmed.to_string()),
        }
    }

    /// Numeric view used by time comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Integral view used by counters. Floats with no fractional part count.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(x) if x.fract() == 0.0 && x.is_finite() => Some(*x as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for AttrValue {}

impl Hash for AttrValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(x) => x.to_bits().hash(state),
            Self::Str(s) => s.hash(state),
            Self::List(items) => items.hash(state),
        }
    }
}

impl From<&serde_json::Value> for AttrValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            serde_json::Value::Object(_) => Self::Str(value.to_string()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<&TaxonId> for AttrValue {
    fn from(id: &TaxonId) -> Self {
        match id {
            TaxonId::Int(n) => Self::Int(*n),
            TaxonId::Name(s) => Self::Str(s.clone()),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// One input row: a taxon with its raw ancestor tokens and remaining columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PhylogenyRecord {
    pub id: TaxonId,
    pub ancestor_list: Vec<String>,
    pub attributes: BTreeMap<String, AttrValue>,
}

/// An owned projection of a taxon returned by queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonRecord {
    pub id: TaxonId,
    pub attributes: BTreeMap<String, AttrValue>,
}

/// Simulation time for liveness queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryTime {
    Present,
    At(f64),
}

/// Attribute names and sentinel used to decide whether a taxon is extant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtantPolicy {
    #[serde(default = "default_destruction_attribute")]
    pub destruction_attribute: String,
    #[serde(default = "default_not_destroyed_value")]
    pub not_destroyed_value: AttrValue,
    #[serde(default = "default_origin_time_attribute")]
    pub origin_time_attribute: String,
}

fn default_destruction_attribute() -> String {
    "destruction_time".to_string()
}
fn default_not_destroyed_value() -> AttrValue {
    AttrValue::Str("none".to_string())
}
fn default_origin_time_attribute() -> String {
    "origin_time".to_string()
}

impl Default for ExtantPolicy {
    fn default() -> Self {
        Self {
            destruction_attribute: default_destruction_attribute(),
            not_destroyed_value: default_not_destroyed_value(),
            origin_time_attribute: default_origin_time_attribute(),
        }
    }
}

/// Configuration for a summary run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub input_path: String,
    pub output_path: Option<String>,
    #[serde(default)]
    pub extant: ExtantPolicy,
    /// Time for the windowed extant query; `None` skips it.
    pub query_time: Option<f64>,
    #[serde(default)]
    pub trait_attributes: Vec<String>,
    #[serde(default)]
    pub mutation_attributes: Vec<String>,
    #[serde(default)]
    pub skip_root: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: String::new(),
            output_path: None,
            extant: ExtantPolicy::default(),
            query_time: None,
            trait_attributes: Vec::new(),
            mutation_attributes: Vec::new(),
            skip_root: false,
            verbose: false,
            quiet: false,
        }
    }
}

/// Result of a summary run, matching the JSON report schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub stats: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub structure: StructureOutput,
    #[serde(default)]
    pub extant: ExtantOutput,
    pub lod: Option<LineageOutput>,
    pub mrca: Option<MrcaOutput>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            version: default_version(),
            metadata: HashMap::new(),
            stats: HashMap::new(),
            structure: StructureOutput::default(),
            extant: ExtantOutput::default(),
            lod: None,
            mrca: None,
        }
    }
}

/// Structure section of the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureOutput {
    #[serde(default)]
    pub asexual: bool,
    #[serde(default)]
    pub roots: Vec<TaxonRecord>,
    #[serde(default)]
    pub leaves: Vec<TaxonId>,
    /// Node count of each independent phylogeny, largest first.
    #[serde(default)]
    pub component_sizes: Vec<usize>,
}

/// Extant section of the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtantOutput {
    #[serde(default)]
    pub by_destruction: Option<Vec<TaxonId>>,
    pub query_time: Option<f64>,
    #[serde(default)]
    pub at_time: Option<Vec<TaxonId>>,
}

/// Line-of-descent section of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageOutput {
    /// Taxa from root to tip.
    pub taxa: Vec<TaxonId>,
    pub length: usize,
    pub state_changes: Option<usize>,
    pub unique_states: Option<usize>,
    #[serde(default)]
    pub states: Vec<StateOutput>,
    #[serde(default)]
    pub mutation_accumulation: BTreeMap<String, i64>,
}

/// One abstracted state along a lineage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateOutput {
    pub values: BTreeMap<String, AttrValue>,
    pub members: Vec<TaxonId>,
}

/// MRCA section of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrcaOutput {
    pub id: Option<TaxonId>,
    pub depth: Option<usize>,
}
