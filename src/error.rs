//! Errors raised while reading a workflow configuration or checking a request
//! against it.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read workflow config failed `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("workflow config parse failed `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Please define 'type' for parameter {parameter}")]
    MissingType { parameter: String },

    #[error("{owner} is missing required field '{field}'")]
    MissingField { owner: String, field: &'static str },

    #[error("These required parameters are not specified: {0:?}")]
    MissingRequired(Vec<String>),

    #[error("These parameters have no declared type and were not supplied: {0:?}")]
    UntypedMissing(Vec<String>),

    #[error(
        "These parameters have invalid values (out of specified range of allowed values): {0:?}"
    )]
    InvalidValue(Vec<String>),

    #[error("request field 'input_files' must be a mapping")]
    InputFilesNotMapping,

    #[error("read output folder failed `{path}`: {source}")]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid workflow arguments: {0}")]
    InvalidArguments(String),
}
