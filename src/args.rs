//! Command-line surface derived from workflow.yml: one `--<name>` flag per
//! declared parameter, typed from its declared `type`.
//!
//! Flags that match no parameter are dropped together with their value, so a
//! workflow can be launched with a superset of arguments.

use crate::config::{ParamType, WorkflowDocument};
use crate::error::ConfigError;
use clap::{Arg, ArgAction, Command, value_parser};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

/// Parse `tokens` (without the binary name) against the document's parameters.
///
/// Every declared parameter appears in the result; ones not given are null.
pub fn parse_parameter_args<I, S>(
    doc: &WorkflowDocument,
    tokens: I,
) -> Result<IndexMap<String, Value>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let known = known_tokens(doc, tokens)?;

    let mut cmd = Command::new(doc.name.clone())
        .no_binary_name(true)
        .disable_help_flag(true)
        .args_override_self(true);
    for (name, spec) in &doc.parameters {
        let arg = Arg::new(name.clone())
            .long(name.clone())
            .action(ArgAction::Set)
            .allow_hyphen_values(true);
        cmd = cmd.arg(match spec.kind {
            Some(ParamType::Float) => arg.value_parser(value_parser!(f64)),
            Some(ParamType::Int) => arg.value_parser(value_parser!(i64)),
            _ => arg,
        });
    }

    let matches = cmd
        .try_get_matches_from(known)
        .map_err(|e| ConfigError::InvalidArguments(e.to_string()))?;

    let mut out = IndexMap::new();
    for (name, spec) in &doc.parameters {
        let value = match spec.kind {
            Some(ParamType::Float) => matches.get_one::<f64>(name).map(|v| Value::from(*v)),
            Some(ParamType::Int) => matches.get_one::<i64>(name).map(|v| Value::from(*v)),
            _ => matches.get_one::<String>(name).map(|v| Value::from(v.as_str())),
        };
        out.insert(name.clone(), value.unwrap_or(Value::Null));
    }
    Ok(out)
}

/// Keep only `--name value` / `--name=value` pairs for declared parameters.
fn known_tokens<I, S>(doc: &WorkflowDocument, tokens: I) -> Result<Vec<String>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let flag = Regex::new(r"^--([^=\s]+)(=.*)?$")
        .map_err(|e| ConfigError::InvalidArguments(e.to_string()))?;

    let mut kept = Vec::new();
    let mut iter = tokens.into_iter().map(Into::into).peekable();
    while let Some(token) = iter.next() {
        let Some((name, inline)) = flag
            .captures(&token)
            .and_then(|c| Some((c.get(1)?.as_str().to_string(), c.get(2).is_some())))
        else {
            continue;
        };
        let takes_next = !inline && iter.peek().is_some_and(|next| !next.starts_with("--"));

        if doc.parameters.contains_key(&name) {
            kept.push(token);
            if takes_next {
                kept.extend(iter.next());
            }
        } else if takes_next {
            iter.next();
        }
    }
    Ok(kept)
}
