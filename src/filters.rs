/*!
 * File dialog filters
 */

use crate::error::{ModelerError, Result};
use serde::Serialize;

/// A named group of file extensions offered by open/save dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

const EXTENSIONS: &[(&str, FileFilter)] = &[
    (
        "all",
        FileFilter {
            name: "All Files",
            extensions: &["*"],
        },
    ),
    (
        "supported",
        FileFilter {
            name: "All Supported",
            extensions: &["bpmn", "dmn", "cmmn", "xml"],
        },
    ),
    (
        "images",
        FileFilter {
            name: "All Images",
            extensions: &["png", "jpeg", "svg"],
        },
    ),
    (
        "bpmn",
        FileFilter {
            name: "BPMN diagram",
            extensions: &["bpmn", "xml"],
        },
    ),
    (
        "dmn",
        FileFilter {
            name: "DMN table",
            extensions: &["dmn", "xml"],
        },
    ),
    (
        "cmmn",
        FileFilter {
            name: "CMMN diagram",
            extensions: &["cmmn", "xml"],
        },
    ),
    (
        "png",
        FileFilter {
            name: "PNG image",
            extensions: &["png"],
        },
    ),
    (
        "jpeg",
        FileFilter {
            name: "JPEG image",
            extensions: &["jpeg"],
        },
    ),
    (
        "svg",
        FileFilter {
            name: "SVG image",
            extensions: &["svg"],
        },
    ),
];

/// Known filter keys, in table order
pub fn filter_types() -> impl Iterator<Item = &'static str> {
    EXTENSIONS.iter().map(|(key, _)| *key)
}

/// Look up a single filter
pub fn get_filter(file_type: &str) -> Result<FileFilter> {
    EXTENSIONS
        .iter()
        .find(|(key, _)| *key == file_type)
        .map(|(_, filter)| *filter)
        .ok_or_else(|| ModelerError::UnknownFilter(file_type.to_string()))
}

/// Dialog filters for one or more file types, in request order
pub fn get_filters<I, S>(types: I) -> Result<Vec<FileFilter>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    types
        .into_iter()
        .map(|file_type| get_filter(file_type.as_ref()))
        .collect()
}
