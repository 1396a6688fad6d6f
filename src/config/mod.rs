//! Config layer: the workflow.yml document and its typed in-memory form.
//!
//! This module only reads and models the document. It owns:
//! - Flag (the "True"/"False" switches used throughout the format)
//! - WorkflowDocument (parameters, upload options, output settings)

pub mod document;
pub mod flag;

pub use document::{
    CarouselGroup, DEFAULT_CONFIG_PATH, InputSettings, Modality, OutputFile, ParamType,
    ParameterSpec, UploadOptionSpec, WorkflowDocument, load_document,
};
pub use flag::Flag;
