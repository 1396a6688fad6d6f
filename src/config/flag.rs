//! Boolean switches in workflow configs.
//!
//! Workflow configs usually spell booleans as the strings
//! "True" / "False". Both that form and real YAML booleans are accepted here,
//! and everything past the document boundary sees a plain `bool`.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawFlag")]
pub struct Flag(pub bool);

impl Flag {
    pub fn is_set(self) -> bool {
        self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

impl TryFrom<RawFlag> for Flag {
    type Error = String;

    fn try_from(raw: RawFlag) -> Result<Self, Self::Error> {
        match raw {
            RawFlag::Bool(b) => Ok(Flag(b)),
            RawFlag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Flag(true)),
                "false" => Ok(Flag(false)),
                _ => Err(format!("expected \"True\" or \"False\", found {:?}", s)),
            },
        }
    }
}
