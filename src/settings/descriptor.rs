//! Serializable UI settings consumed by the front end.
//!
//! Field names and nesting are the front end's contract; keep the serde
//! renames stable.

use serde::Serialize;
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub results_config: ResultsConfig,
    pub settings_config: SettingsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsConfig {
    pub description: String,
    pub save_model: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsConfig {
    /// Controls to grey out until data is uploaded (same list as below).
    pub disabled_fields: Vec<String>,
    pub inputs_require_files: Vec<String>,
    pub parameters: ParametersBlock,
    pub upload_options: Vec<UploadOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParametersBlock {
    pub header: String,
    pub inputs: Vec<ParameterControl>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterControl {
    Slider(SliderControl),
    Dropdown(DropdownControl),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderControl {
    pub name: String,
    pub title: String,
    pub tooltip: String,
    /// "integer" or "float".
    #[serde(rename = "type")]
    pub kind: String,
    pub default_value: Value,
    pub input_type: String,
    pub increment: Number,
    pub max_value: Number,
    pub max_value_included: bool,
    pub min_value: Number,
    pub min_value_inclusive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownControl {
    pub name: String,
    pub title: String,
    pub tooltip: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub default_value: DropdownOption,
    pub input_type: String,
    pub options: Vec<DropdownOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: Value,
    pub value: Value,
}

impl DropdownOption {
    pub fn same(v: &Value) -> Self {
        Self {
            label: v.clone(),
            value: v.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOption {
    pub allowed_formats: AllowedFormats,
    pub data_structure: String,
    pub disabled: bool,
    pub name: String,
    pub supports_preview: bool,
    pub title: String,
    pub upload_types: Vec<UploadType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_data_details: Option<DemoDataDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowedFormats {
    pub file_extensions: Vec<String>,
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadType {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoDataDetails {
    pub description: String,
    pub file_path: String,
    pub file_name: String,
    pub file_source: Vec<DataSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSource {
    pub title: String,
    pub url: String,
}
