//! Upload widget templates, one per data modality.
//!
//! Templates are immutable `static` prototypes. `UploadTemplate::instantiate`
//! hands out an owned `UploadOption`, so callers mutate their copy and never
//! the shared template.

use crate::config::{InputSettings, Modality};
use crate::settings::{AllowedFormats, UploadOption, UploadType};
use tracing::warn;

#[derive(Debug)]
pub struct UploadTemplate {
    pub name: &'static str,
    pub title: &'static str,
    pub file_extensions: &'static [&'static str],
    pub formats_title: &'static str,
    pub data_structure: &'static str,
    pub supports_preview: bool,
}

pub static TABLE_TEMPLATE: UploadTemplate = UploadTemplate {
    name: "table",
    title: "Input Tabular Data",
    file_extensions: &["csv", "tsv", "txt"],
    formats_title: ".csv, .tsv or .txt",
    data_structure: "Data should be in .csv, .tsv or .txt format",
    supports_preview: true,
};

pub static IMAGE_TEMPLATE: UploadTemplate = UploadTemplate {
    name: "image",
    title: "Input Image Data",
    file_extensions: &["zip"],
    formats_title: ".zip",
    data_structure: "Images should be provided in a .zip compressed file",
    supports_preview: false,
};

pub static ANNDATA_TEMPLATE: UploadTemplate = UploadTemplate {
    name: "anndata",
    title: "Input Annotated Data",
    file_extensions: &["h5ad", "h5"],
    formats_title: ".h5ad or .h5",
    data_structure: "Data should be in .h5ad or .h5 format",
    supports_preview: true,
};

pub static FALLBACK_TEMPLATE: UploadTemplate = UploadTemplate {
    name: "",
    title: "",
    file_extensions: &[],
    formats_title: "",
    data_structure: "",
    supports_preview: false,
};

impl UploadTemplate {
    /// Owned copy of this template.
    pub fn instantiate(&self) -> UploadOption {
        UploadOption {
            allowed_formats: AllowedFormats {
                file_extensions: self.file_extensions.iter().map(|s| s.to_string()).collect(),
                title: self.formats_title.to_string(),
                value: String::new(),
            },
            data_structure: self.data_structure.to_string(),
            disabled: false,
            name: self.name.to_string(),
            supports_preview: self.supports_preview,
            title: self.title.to_string(),
            upload_types: vec![
                UploadType {
                    title: "Local".to_string(),
                    kind: "local".to_string(),
                },
                UploadType {
                    title: "Remote".to_string(),
                    kind: "remote".to_string(),
                },
            ],
            demo_data_details: None,
        }
    }
}

/// Template registered for a modality, if any.
pub fn template_for(modality: &Modality) -> Option<&'static UploadTemplate> {
    match modality {
        Modality::Table => Some(&TABLE_TEMPLATE),
        Modality::Image => Some(&IMAGE_TEMPLATE),
        Modality::SingleCell => Some(&ANNDATA_TEMPLATE),
        Modality::Unknown(_) => None,
    }
}

/// Resolve the widget for a modality.
///
/// Unknown modalities get the fallback template, filled from the document's
/// `input_settings.data_structure` / `file_extensions` when present.
pub fn upload_option_for(modality: &Modality, input: &InputSettings) -> UploadOption {
    if let Some(template) = template_for(modality) {
        return template.instantiate();
    }

    warn!(
        ?modality,
        "no template is available for this data modality; some parts of the uploadOptions \
         configuration may need to be entered manually"
    );
    let mut option = FALLBACK_TEMPLATE.instantiate();
    if let Some(structure) = input.data_structure.as_deref().filter(|s| !s.is_empty()) {
        option.data_structure = structure.to_string();
    }
    if !input.file_extensions.is_empty() {
        option.allowed_formats.file_extensions = input.file_extensions.clone();
        option.allowed_formats.title = input.file_extensions.join(" or ");
    }
    option
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_modalities_pick_their_template() {
        let input = InputSettings::default();
        let table = upload_option_for(&Modality::Table, &input);
        assert_eq!(table.name, "table");
        assert_eq!(table.allowed_formats.file_extensions, vec!["csv", "tsv", "txt"]);
        assert!(table.supports_preview);

        let image = upload_option_for(&Modality::Image, &input);
        assert_eq!(image.allowed_formats.title, ".zip");
        assert!(!image.supports_preview);

        let sc = upload_option_for(&Modality::SingleCell, &input);
        assert_eq!(sc.name, "anndata");
        assert_eq!(sc.data_structure, "Data should be in .h5ad or .h5 format");
    }

    #[test]
    fn unknown_modality_absorbs_document_formats() {
        let input = InputSettings {
            data_structure: Some("X".to_string()),
            file_extensions: vec!["a".to_string(), "b".to_string()],
            ..InputSettings::default()
        };
        let option = upload_option_for(&Modality::Unknown("spatial".to_string()), &input);
        assert_eq!(option.data_structure, "X");
        assert_eq!(option.allowed_formats.title, "a or b");
        assert_eq!(option.allowed_formats.file_extensions, vec!["a", "b"]);
    }

    #[test]
    fn mutating_a_copy_leaves_the_template_alone() {
        let mut first = TABLE_TEMPLATE.instantiate();
        first.title = "changed".to_string();
        first.allowed_formats.file_extensions.clear();

        let second = TABLE_TEMPLATE.instantiate();
        assert_eq!(second.title, "Input Tabular Data");
        assert_eq!(second.allowed_formats.file_extensions.len(), 3);
    }
}
