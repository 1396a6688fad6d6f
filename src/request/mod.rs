//! Request validation: check an execution request against workflow.yml,
//! fill defaults and prepare output directories before the runner starts.

use crate::config::{ParamType, ParameterSpec, WorkflowDocument};
use crate::error::ConfigError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Runtime request: parameter name -> value. Validation edits it in place.
pub type Request = IndexMap<String, Value>;

/// Workflow facts handed to the runner once a request passes validation.
#[derive(Debug)]
pub struct ValidatedWorkflow<'a> {
    pub name: &'a str,
    pub entry_points: &'a [String],
    pub parameters: &'a IndexMap<String, ParameterSpec>,
    /// Parameters declared without a `type` (reported as a warning).
    pub untyped: Vec<String>,
    /// Supplied values whose JSON type differs from the declared one.
    pub wrong_type: Vec<String>,
}

/// Value for `key` if the request carries a non-null one.
fn supplied<'r>(request: &'r Request, key: &str) -> Option<&'r Value> {
    request.get(key).filter(|v| !v.is_null())
}

/// Validate `request` against the document, walking parameters in declaration order.
///
/// On success the request holds every default, the merged `input_files`
/// entries and `job_id`. Declared parameters set through `input_files` go
/// through the same type, range and option checks as top-level values.
/// Directories named by values ending in '/' are created on a best-effort basis.
pub fn validate_request<'a>(
    doc: &'a WorkflowDocument,
    request: &mut Request,
    job_id: &str,
) -> Result<ValidatedWorkflow<'a>, ConfigError> {
    let mut untyped = Vec::new();
    let mut no_default = Vec::new();
    let mut findings = Findings::default();

    for (key, spec) in &doc.parameters {
        if spec.kind.is_none() {
            untyped.push(key.clone());
        }
        findings.check_type(key, spec, request);

        match &spec.default {
            None => no_default.push(key.clone()),
            Some(default) => {
                if supplied(request, key).is_none() {
                    request.insert(key.clone(), default.clone());
                }
            }
        }

        findings.check_value(key, spec, request);
    }

    match request.get("input_files").cloned() {
        None | Some(Value::Null) => {}
        Some(Value::Object(files)) => {
            for (key, value) in files {
                request.insert(key.clone(), value);
                if let Some(spec) = doc.parameters.get(&key) {
                    findings.forget(&key);
                    findings.check_type(&key, spec, request);
                    findings.check_value(&key, spec, request);
                }
            }
        }
        Some(_) => return Err(ConfigError::InputFilesNotMapping),
    }
    request.insert("job_id".to_string(), Value::String(job_id.to_string()));

    let Findings {
        wrong_type,
        invalid,
    } = findings;

    let missing: Vec<String> = no_default
        .into_iter()
        .filter(|k| supplied(request, k).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingRequired(missing));
    }

    let untyped_missing: Vec<String> = untyped
        .iter()
        .filter(|k| supplied(request, k).is_none())
        .cloned()
        .collect();
    if !untyped_missing.is_empty() {
        return Err(ConfigError::UntypedMissing(untyped_missing));
    }

    if !untyped.is_empty() {
        warn!(parameters = ?untyped, "some parameters do not have their datatype specified");
    }
    if !wrong_type.is_empty() {
        warn!(parameters = ?wrong_type, "some parameters do not match their declared type");
    }

    if !invalid.is_empty() {
        return Err(ConfigError::InvalidValue(invalid));
    }

    Ok(ValidatedWorkflow {
        name: &doc.name,
        entry_points: &doc.entry_points,
        parameters: &doc.parameters,
        untyped,
        wrong_type,
    })
}

/// Per-parameter problems collected while walking the request.
#[derive(Debug, Default)]
struct Findings {
    wrong_type: Vec<String>,
    invalid: Vec<String>,
}

impl Findings {
    /// Declared type vs supplied value. Absent values are not checked here.
    fn check_type(&mut self, key: &str, spec: &ParameterSpec, request: &Request) {
        if let (Some(kind), Some(value)) = (spec.kind, supplied(request, key)) {
            if !kind.matches(value) {
                self.wrong_type.push(key.to_string());
            }
        }
    }

    /// Range/option checks for user-defined parameters, then directory ensure.
    fn check_value(&mut self, key: &str, spec: &ParameterSpec, request: &Request) {
        if spec.user_defined.is_set() {
            if let (Some(kind), Some(value)) = (spec.kind, supplied(request, key)) {
                if !value_allowed(spec, kind, value) {
                    self.invalid.push(key.to_string());
                }
            }
        }

        if let Some(Value::String(path)) = request.get(key) {
            if path.ends_with('/') {
                ensure_dir(path);
            }
        }
    }

    /// Drop earlier results for `key` before its value is checked again.
    fn forget(&mut self, key: &str) {
        self.wrong_type.retain(|k| k != key);
        self.invalid.retain(|k| k != key);
    }
}

/// Range (inclusive) and option checks for user-defined parameters.
fn value_allowed(spec: &ParameterSpec, kind: ParamType, value: &Value) -> bool {
    match kind {
        ParamType::Int | ParamType::Float => {
            let Some(x) = value.as_f64() else {
                return false;
            };
            let above = spec
                .max_value
                .as_ref()
                .and_then(|m| m.as_f64())
                .is_some_and(|max| x > max);
            let below = spec
                .min_value
                .as_ref()
                .and_then(|m| m.as_f64())
                .is_some_and(|min| x < min);
            !above && !below
        }
        // Choices for data-driven parameters are only known after upload.
        ParamType::Str if spec.from_data.is_set() => true,
        ParamType::Str => spec
            .options
            .as_ref()
            .is_some_and(|options| options.contains(value)),
        ParamType::Other => true,
    }
}

/// Create `path` unless it already exists. Failures are logged and ignored.
fn ensure_dir(path: &str) {
    let dir = Path::new(path);
    if dir.is_dir() {
        return;
    }
    match fs::create_dir_all(dir) {
        Ok(()) => debug!(path, "created directory"),
        Err(error) => debug!(path, %error, "could not create directory; continuing"),
    }
}
