//! Deployment naming
//!
//! The gateway chooses the parser for a deployed resource by the suffix of
//! its name, so every deployment name must end in `.bpmn` or `.dmn`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::error;

/// Kind of diagram being deployed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramType {
    #[default]
    Bpmn,
    Dmn,
}

impl DiagramType {
    /// Deployment suffix including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            DiagramType::Bpmn => ".bpmn",
            DiagramType::Dmn => ".dmn",
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension()[1..])
    }
}

impl FromStr for DiagramType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bpmn" => Ok(DiagramType::Bpmn),
            "dmn" => Ok(DiagramType::Dmn),
            other => Err(format!("unsupported diagram type <{}>", other)),
        }
    }
}

/// Normalize the name a definition is deployed under.
///
/// * empty `name`: the file's base name without its extension, plus suffix
/// * `name` without the suffix: `name` plus suffix
/// * otherwise `name` unchanged
///
/// If the file name cannot be derived the fault is logged and `name` is
/// returned as given.
pub fn prepare_deployment_name(name: &str, file_path: &Path, diagram_type: DiagramType) -> String {
    let extension = diagram_type.extension();

    if name.is_empty() {
        return match file_path.file_stem() {
            Some(stem) => format!("{}{}", stem.to_string_lossy(), extension),
            None => {
                error!(
                    "Error happened preparing deployment name: no file name in {}",
                    file_path.display()
                );
                name.to_string()
            }
        };
    }

    if !name.ends_with(extension) {
        return format!("{}{}", name, extension);
    }

    name.to_string()
}
