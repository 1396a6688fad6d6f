//! Workflow configuration document (workflow.yml).
//!
//! YAML shape:
//! ```yaml
//! name: my-workflow
//! entry_points: [main]
//! parameters:
//!   n_clusters:
//!     type: int                # int | float | str
//!     user_defined: 'True'     # exposed in the UI
//!     default: 5
//!     min_value: 1
//!     max_value: 20
//!     increment: 1
//!   method:
//!     type: str
//!     user_defined: 'True'
//!     default: leiden
//!     options: [leiden, louvain]
//! input_settings:
//!   data_structure: ...        # only used when no modality template matches
//!   file_extensions: [...]
//!   upload_options:
//!     counts:
//!       type: single_cell
//!       title: Counts matrix
//!       demo_path: s3://bucket/demo.h5ad
//!       demo_description: ...
//!       url: https://...
//! output_settings:
//!   description: ...
//!   save_model: 'False'
//!   folder: out/               # folder mode, OR the explicit groupings below
//!   images: { carousel: { entry: { file: ..., title: ... } } }
//!   figures: { ... }
//!   tables: { ... }
//!   download: { entry: { file: ..., title: ... } }
//!   artifacts: { entry: { file: ... } }
//! ```
//!
//! Every mapping is an `IndexMap`: upload options, controls and carousels are
//! emitted in the order they are written.

use crate::config::Flag;
use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::fmt;
use std::fs;
use std::path::Path;

/// Where the runner looks for its workflow config when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "app/workflow.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowDocument {
    pub name: String,

    #[serde(default)]
    pub entry_points: Vec<String>,

    #[serde(default)]
    pub parameters: IndexMap<String, ParameterSpec>,

    #[serde(default)]
    pub input_settings: Option<InputSettings>,

    #[serde(default)]
    pub output_settings: Option<OutputSettings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Int,
    Float,
    Str,
    /// Any type name outside int/float/str.
    #[serde(other)]
    Other,
}

impl ParamType {
    /// True when `value` is of this declared type.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ParamType::Int => value.is_i64() || value.is_u64(),
            ParamType::Float => value.is_f64(),
            ParamType::Str => value.is_string(),
            ParamType::Other => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Int => write!(f, "int"),
            ParamType::Float => write!(f, "float"),
            ParamType::Str => write!(f, "str"),
            ParamType::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParameterSpec {
    #[serde(default, rename = "type")]
    pub kind: Option<ParamType>,

    #[serde(default)]
    pub user_defined: Flag,

    /// `None` both when the key is missing and when it is an explicit null.
    #[serde(default)]
    pub default: Option<Value>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub tooltip: Option<String>,

    #[serde(default)]
    pub min_value: Option<Number>,

    #[serde(default)]
    pub max_value: Option<Number>,

    #[serde(default)]
    pub increment: Option<Number>,

    #[serde(default)]
    pub options: Option<Vec<Value>>,

    #[serde(default)]
    pub from_data: Flag,
}

impl ParameterSpec {
    /// Display title, falling back to the parameter name.
    pub fn title_or<'a>(&'a self, name: &'a str) -> &'a str {
        self.title.as_deref().filter(|s| !s.is_empty()).unwrap_or(name)
    }

    /// Tooltip, falling back to the parameter name.
    pub fn tooltip_or<'a>(&'a self, name: &'a str) -> &'a str {
        self.tooltip.as_deref().filter(|s| !s.is_empty()).unwrap_or(name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputSettings {
    #[serde(default)]
    pub data_structure: Option<String>,

    #[serde(default)]
    pub file_extensions: Vec<String>,

    #[serde(default)]
    pub upload_options: IndexMap<String, UploadOptionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadOptionSpec {
    #[serde(rename = "type")]
    pub modality: Modality,

    pub title: String,

    #[serde(default)]
    pub demo_path: Option<String>,

    #[serde(default)]
    pub demo_description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Data modality of an upload slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Modality {
    Table,
    Image,
    SingleCell,
    Unknown(String),
}

impl From<String> for Modality {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "table" => Modality::Table,
            "image" => Modality::Image,
            "single_cell" => Modality::SingleCell,
            _ => Modality::Unknown(tag),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub save_model: Flag,

    /// Switches payload building to directory-scan mode.
    #[serde(default)]
    pub folder: Option<String>,

    #[serde(default)]
    pub images: Option<CarouselGroup>,

    #[serde(default)]
    pub figures: Option<CarouselGroup>,

    #[serde(default)]
    pub tables: Option<CarouselGroup>,

    #[serde(default)]
    pub download: Option<IndexMap<String, OutputFile>>,

    #[serde(default)]
    pub artifacts: Option<IndexMap<String, ArtifactFile>>,
}

/// carousel name -> entry name -> file.
pub type CarouselGroup = IndexMap<String, IndexMap<String, OutputFile>>;

#[derive(Debug, Clone, Deserialize)]
pub struct OutputFile {
    pub file: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactFile {
    pub file: String,
}

impl WorkflowDocument {
    pub fn from_yaml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Read and parse a workflow config from disk.
pub fn load_document(path: impl AsRef<Path>) -> Result<WorkflowDocument, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    WorkflowDocument::from_yaml_str(&text, path)
}
