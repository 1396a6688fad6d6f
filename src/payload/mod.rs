//! Results payload builder: describes how generated output files are shown.
//!
//! Two modes, picked by `output_settings.folder`:
//! - config mode: carousels and downloads are spelled out in workflow.yml
//! - folder mode: a directory is scanned and files are grouped by extension

pub mod folder;

use crate::config::{CarouselGroup, OutputFile, WorkflowDocument};
use crate::error::ConfigError;
use serde::Serialize;
use tracing::warn;

/// One displayable result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultFile {
    pub file: String,
    pub title: String,
}

impl From<&OutputFile> for ResultFile {
    fn from(f: &OutputFile) -> Self {
        Self {
            file: f.file.clone(),
            title: f.title.clone(),
        }
    }
}

/// Files shown together in one UI carousel.
pub type Carousel = Vec<ResultFile>;

/// Payload descriptor. Empty categories are left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Payload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Carousel>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub figures: Option<Vec<Carousel>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<Carousel>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<Vec<ResultFile>>,
}

/// Build the payload plus the list of extra artifact paths to ship with it.
pub fn build_payload(doc: &WorkflowDocument) -> Result<(Payload, Vec<String>), ConfigError> {
    let Some(out) = &doc.output_settings else {
        warn!(workflow = %doc.name, "no output_settings; payload is empty");
        return Ok((Payload::default(), Vec::new()));
    };

    if let Some(dir) = out.folder.as_deref().filter(|s| !s.is_empty()) {
        return folder::payload_from_folder(dir);
    }

    let payload = Payload {
        images: carousels(out.images.as_ref()),
        figures: carousels(out.figures.as_ref()),
        tables: carousels(out.tables.as_ref()),
        download: out
            .download
            .as_ref()
            .filter(|d| !d.is_empty())
            .map(|d| d.values().map(ResultFile::from).collect()),
    };

    let artifacts = out
        .artifacts
        .iter()
        .flat_map(|a| a.values())
        .map(|a| a.file.clone())
        .collect();

    Ok((payload, artifacts))
}

fn carousels(group: Option<&CarouselGroup>) -> Option<Vec<Carousel>> {
    let group = group.filter(|g| !g.is_empty())?;
    Some(
        group
            .values()
            .map(|entries| entries.values().map(ResultFile::from).collect())
            .collect(),
    )
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

    const CONFIG_MODE: &str = r#"
name: clustering
output_settings:
  images:
    umap:
      second: { file: out/umap_b.png, title: UMAP B }
      first: { file: out/umap_a.png, title: UMAP A }
    qc:
      violin: { file: out/qc.png, title: QC }
  tables:
    markers:
      top: { file: out/markers.csv, title: Markers }
  download:
    model: { file: out/model.pkl, title: Model }
    report: { file: out/report.html, title: Report }
  artifacts:
    log: { file: out/run.log, title: ignored }
    env: { file: out/env.txt }
"#;

    fn rf(file: &str, title: &str) -> ResultFile {
        ResultFile {
            file: file.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn config_mode_reproduces_carousel_order() {
        let (payload, _) = build_payload(&doc(CONFIG_MODE)).unwrap();
        assert_eq!(
            payload.images,
            Some(vec![
                vec![rf("out/umap_b.png", "UMAP B"), rf("out/umap_a.png", "UMAP A")],
                vec![rf("out/qc.png", "QC")],
            ])
        );
        assert_eq!(payload.tables, Some(vec![vec![rf("out/markers.csv", "Markers")]]));
        assert_eq!(payload.figures, None);
    }

    #[test]
    fn config_mode_flattens_downloads_and_collects_artifacts() {
        let (payload, artifacts) = build_payload(&doc(CONFIG_MODE)).unwrap();
        assert_eq!(
            payload.download,
            Some(vec![rf("out/model.pkl", "Model"), rf("out/report.html", "Report")])
        );
        assert_eq!(artifacts, vec!["out/run.log", "out/env.txt"]);
    }

    #[test]
    fn serialized_payload_omits_missing_categories() {
        let (payload, _) = build_payload(&doc(CONFIG_MODE)).unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("figures").is_none());
        assert_eq!(
            value["download"][0],
            json!({"file": "out/model.pkl", "title": "Model"})
        );
    }

    #[test]
    fn missing_output_settings_gives_empty_payload() {
        let (payload, artifacts) = build_payload(&doc("name: w\n")).unwrap();
        assert_eq!(payload, Payload::default());
        assert!(artifacts.is_empty());
        assert_eq!(serde_json::to_string(&payload).unwrap(), "{}");
    }

    #[test]
    fn output_is_stable_across_calls() {
        let d = doc(CONFIG_MODE);
        let first = serde_json::to_string(&build_payload(&d).unwrap()).unwrap();
        let second = serde_json::to_string(&build_payload(&d).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
