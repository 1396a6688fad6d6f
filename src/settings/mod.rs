//! UI settings builder: turns workflow.yml into the front end's settings
//! descriptor (parameter controls, upload widgets, results display config).

pub mod descriptor;

pub use descriptor::{
    AllowedFormats, AppSettings, DataSource, DemoDataDetails, DropdownControl, DropdownOption,
    ParameterControl, ParametersBlock, ResultsConfig, SettingsConfig, SliderControl, UploadOption,
    UploadType,
};

use crate::config::{InputSettings, ParamType, ParameterSpec, UploadOptionSpec, WorkflowDocument};
use crate::error::ConfigError;
use crate::templates;
use serde_json::{Number, Value};
use tracing::warn;

const PARAMETERS_HEADER: &str = "Set Parameters";
const NO_DESCRIPTION: &str = "No description provided";

/// Build the full settings descriptor for a workflow.
///
/// Only parameters flagged `user_defined` become controls. A user-defined
/// parameter without a `type` is a config error.
pub fn build_ui_settings(doc: &WorkflowDocument) -> Result<AppSettings, ConfigError> {
    let mut inputs = Vec::new();
    let mut inputs_require_files = Vec::new();

    for (name, spec) in &doc.parameters {
        if !spec.user_defined.is_set() {
            continue;
        }
        let kind = spec.kind.ok_or_else(|| ConfigError::MissingType {
            parameter: name.clone(),
        })?;

        match kind {
            ParamType::Int | ParamType::Float => {
                inputs.push(ParameterControl::Slider(slider(name, spec, kind)?));
            }
            ParamType::Str if spec.from_data.is_set() => {
                // Choices come from the uploaded data; the front end fills them in.
                inputs.push(ParameterControl::Dropdown(dropdown(name, spec, Vec::new())));
                inputs_require_files.push(name.clone());
            }
            ParamType::Str => {
                let options = spec
                    .options
                    .as_ref()
                    .ok_or_else(|| ConfigError::MissingField {
                        owner: format!("parameter {}", name),
                        field: "options",
                    })?
                    .iter()
                    .map(DropdownOption::same)
                    .collect();
                inputs.push(ParameterControl::Dropdown(dropdown(name, spec, options)));
            }
            ParamType::Other => {
                warn!(parameter = %name, "unsupported parameter type; no control emitted");
            }
        }
    }

    let upload_options = match &doc.input_settings {
        Some(input) => upload_options(input)?,
        None => Vec::new(),
    };

    let results_config = match &doc.output_settings {
        Some(out) => ResultsConfig {
            description: out
                .description
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            save_model: out.save_model.is_set(),
        },
        None => ResultsConfig {
            description: NO_DESCRIPTION.to_string(),
            save_model: false,
        },
    };

    Ok(AppSettings {
        results_config,
        settings_config: SettingsConfig {
            disabled_fields: inputs_require_files.clone(),
            inputs_require_files,
            parameters: ParametersBlock {
                header: PARAMETERS_HEADER.to_string(),
                inputs,
            },
            upload_options,
        },
    })
}

fn slider(name: &str, spec: &ParameterSpec, kind: ParamType) -> Result<SliderControl, ConfigError> {
    let required = |value: &Option<Number>, field: &'static str| {
        value.clone().ok_or_else(|| ConfigError::MissingField {
            owner: format!("parameter {}", name),
            field,
        })
    };

    Ok(SliderControl {
        name: name.to_string(),
        title: spec.title_or(name).to_string(),
        tooltip: spec.tooltip_or(name).to_string(),
        kind: match kind {
            ParamType::Int => "integer",
            _ => "float",
        }
        .to_string(),
        default_value: spec.default.clone().ok_or_else(|| ConfigError::MissingField {
            owner: format!("parameter {}", name),
            field: "default",
        })?,
        input_type: "slider".to_string(),
        increment: required(&spec.increment, "increment")?,
        max_value: required(&spec.max_value, "max_value")?,
        max_value_included: true,
        min_value: required(&spec.min_value, "min_value")?,
        min_value_inclusive: true,
    })
}

fn dropdown(name: &str, spec: &ParameterSpec, options: Vec<DropdownOption>) -> DropdownControl {
    DropdownControl {
        name: name.to_string(),
        title: spec.title_or(name).to_string(),
        tooltip: spec.tooltip_or(name).to_string(),
        kind: ParamType::Str.to_string(),
        default_value: DropdownOption::same(spec.default.as_ref().unwrap_or(&Value::Null)),
        input_type: "dropdown".to_string(),
        options,
    }
}

fn upload_options(input: &InputSettings) -> Result<Vec<UploadOption>, ConfigError> {
    input
        .upload_options
        .iter()
        .map(|(key, spec)| upload_option(key, spec, input))
        .collect()
}

fn upload_option(
    key: &str,
    spec: &UploadOptionSpec,
    input: &InputSettings,
) -> Result<UploadOption, ConfigError> {
    let mut option = templates::upload_option_for(&spec.modality, input);
    option.name = key.to_string();
    option.title = spec.title.clone();

    if let Some(path) = spec.demo_path.as_deref().filter(|p| !p.is_empty()) {
        let required = |value: &Option<String>, field: &'static str| {
            value.clone().ok_or_else(|| ConfigError::MissingField {
                owner: format!("upload option {}", key),
                field,
            })
        };
        option.demo_data_details = Some(DemoDataDetails {
            description: required(&spec.demo_description, "demo_description")?,
            file_path: path.to_string(),
            file_name: path.rsplit('/').next().unwrap_or(path).to_string(),
            file_source: vec![DataSource {
                title: "Data Source".to_string(),
                url: required(&spec.url, "url")?,
            }],
        });
    }

    Ok(option)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::Path;

    fn doc(yaml: &str) -> WorkflowDocument {
        WorkflowDocument::from_yaml_str(yaml, Path::new("workflow.yml")).unwrap()
    }

    const WORKFLOW: &str = r#"
name: clustering
entry_points: [main]
parameters:
  n_clusters:
    type: int
    user_defined: 'True'
    default: 5
    min_value: 0
    max_value: 10
    increment: 1
    title: Clusters
  cluster_key:
    type: str
    user_defined: 'True'
    from_data: 'True'
    default: leiden
  method:
    type: str
    user_defined: 'True'
    default: umap
    options: [umap, tsne]
    tooltip: Embedding method
  output_dir:
    type: str
    default: out/
input_settings:
  upload_options:
    counts:
      type: single_cell
      title: Counts
      demo_path: s3://bucket/demo/pbmc.h5ad
      demo_description: PBMC demo
      url: https://example.org/pbmc
    meta:
      type: table
      title: Metadata
output_settings:
  description: Clustered cells
  save_model: 'True'
"#;

    #[test]
    fn builds_slider_for_numeric_parameter() {
        let settings = build_ui_settings(&doc(WORKFLOW)).unwrap();
        let ParameterControl::Slider(slider) = &settings.settings_config.parameters.inputs[0]
        else {
            panic!("expected slider");
        };
        assert_eq!(slider.name, "n_clusters");
        assert_eq!(slider.title, "Clusters");
        assert_eq!(slider.tooltip, "n_clusters");
        assert_eq!(slider.kind, "integer");
        assert_eq!(slider.default_value, json!(5));
        assert_eq!(slider.input_type, "slider");
        assert!(slider.min_value_inclusive);
        assert!(slider.max_value_included);
        assert_eq!(serde_json::to_value(slider).unwrap()["max_value"], json!(10));
    }

    #[test]
    fn data_driven_dropdown_waits_for_files() {
        let settings = build_ui_settings(&doc(WORKFLOW)).unwrap();
        let cfg = &settings.settings_config;
        assert_eq!(cfg.inputs_require_files, vec!["cluster_key"]);
        assert_eq!(cfg.disabled_fields, cfg.inputs_require_files);

        let ParameterControl::Dropdown(dd) = &cfg.parameters.inputs[1] else {
            panic!("expected dropdown");
        };
        assert!(dd.options.is_empty());
        assert_eq!(dd.default_value, DropdownOption::same(&json!("leiden")));
    }

    #[test]
    fn option_dropdown_lists_label_value_pairs() {
        let settings = build_ui_settings(&doc(WORKFLOW)).unwrap();
        let inputs = &settings.settings_config.parameters.inputs;
        assert_eq!(inputs.len(), 3, "non user-defined parameters are skipped");

        let value = serde_json::to_value(&inputs[2]).unwrap();
        assert_eq!(
            value["options"],
            json!([{"label": "umap", "value": "umap"}, {"label": "tsne", "value": "tsne"}])
        );
        assert_eq!(value["tooltip"], json!("Embedding method"));
        assert_eq!(value["type"], json!("str"));
    }

    #[test]
    fn upload_options_keep_order_and_attach_demo_data() {
        let settings = build_ui_settings(&doc(WORKFLOW)).unwrap();
        let uploads = &settings.settings_config.upload_options;
        let names: Vec<&str> = uploads.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["counts", "meta"]);

        assert_eq!(uploads[0].title, "Counts");
        assert_eq!(uploads[0].allowed_formats.title, ".h5ad or .h5");
        let demo = uploads[0].demo_data_details.as_ref().unwrap();
        assert_eq!(demo.file_name, "pbmc.h5ad");
        assert_eq!(demo.file_path, "s3://bucket/demo/pbmc.h5ad");
        assert_eq!(
            demo.file_source,
            vec![DataSource {
                title: "Data Source".to_string(),
                url: "https://example.org/pbmc".to_string(),
            }]
        );

        assert_eq!(uploads[1].title, "Metadata");
        assert_eq!(uploads[1].data_structure, "Data should be in .csv, .tsv or .txt format");
        assert!(uploads[1].demo_data_details.is_none());
    }

    #[test]
    fn results_config_reads_output_settings() {
        let settings = build_ui_settings(&doc(WORKFLOW)).unwrap();
        assert_eq!(
            settings.results_config,
            ResultsConfig {
                description: "Clustered cells".to_string(),
                save_model: true,
            }
        );

        let bare = build_ui_settings(&doc("name: empty\n")).unwrap();
        assert_eq!(bare.results_config.description, "No description provided");
        assert!(!bare.results_config.save_model);
        assert!(bare.settings_config.upload_options.is_empty());
    }

    #[test]
    fn serialized_layout_uses_front_end_names() {
        let settings = build_ui_settings(&doc(WORKFLOW)).unwrap();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["settingsConfig"]["parameters"]["header"], json!("Set Parameters"));
        assert_eq!(value["settingsConfig"]["disabledFields"], json!(["cluster_key"]));
        assert_eq!(value["resultsConfig"]["saveModel"], json!(true));
        assert_eq!(
            value["settingsConfig"]["uploadOptions"][0]["demoDataDetails"]["fileName"],
            json!("pbmc.h5ad")
        );
        assert!(value["settingsConfig"]["uploadOptions"][1].get("demoDataDetails").is_none());
    }

    #[test]
    fn user_defined_parameter_without_type_fails() {
        let err = build_ui_settings(&doc(
            "name: w\nparameters:\n  k:\n    user_defined: 'True'\n    default: 1\n",
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingType { ref parameter } if parameter == "k"));
    }

    #[test]
    fn slider_without_bounds_fails() {
        let err = build_ui_settings(&doc(
            "name: w\nparameters:\n  k:\n    type: float\n    user_defined: 'True'\n    default: 1.5\n",
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "increment", .. }));
    }

    #[test]
    fn slider_without_default_fails() {
        let err = build_ui_settings(&doc(
            "name: w\nparameters:\n  k:\n    type: int\n    user_defined: 'True'\n    min_value: 0\n    max_value: 9\n    increment: 1\n",
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "default", .. }));
        assert!(err.to_string().contains("parameter k"));
    }

    #[test]
    fn output_is_stable_across_calls() {
        let d = doc(WORKFLOW);
        let first = serde_json::to_string(&build_ui_settings(&d).unwrap()).unwrap();
        let second = serde_json::to_string(&build_ui_settings(&d).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
