/*!
 * Execution platform registry
 */

use crate::error::{ModelerError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Execution platform a diagram targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Engine {
    #[serde(rename = "Camunda Platform")]
    Platform,
    #[serde(rename = "Camunda Cloud")]
    Cloud,
}

impl Engine {
    pub const ALL: [Engine; 2] = [Engine::Platform, Engine::Cloud];

    /// Name stored in diagrams as `executionPlatform`
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Platform => "Camunda Platform",
            Engine::Cloud => "Camunda Cloud",
        }
    }

    /// Name shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Engine::Platform => "Camunda Platform 7",
            Engine::Cloud => "Camunda Platform 8",
        }
    }

    pub fn profile(&self) -> &'static EngineProfile {
        match self {
            Engine::Platform => &PROFILES[0],
            Engine::Cloud => &PROFILES[1],
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = ModelerError;

    fn from_str(s: &str) -> Result<Self> {
        Engine::ALL
            .into_iter()
            .find(|engine| engine.name() == s)
            .ok_or_else(|| ModelerError::UnknownPlatform(s.to_string()))
    }
}

/// Supported versions of one execution platform, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineProfile {
    pub execution_platform: Engine,
    pub execution_platform_versions: &'static [&'static str],
    pub latest_stable: &'static str,
}

pub const PROFILES: [EngineProfile; 2] = [
    EngineProfile {
        execution_platform: Engine::Platform,
        execution_platform_versions: &["7.19.0", "7.18.0", "7.17.0", "7.16.0", "7.15.0"],
        latest_stable: "7.19.0",
    },
    EngineProfile {
        execution_platform: Engine::Cloud,
        execution_platform_versions: &[
            "8.2.0", "8.1.0", "8.0.0", "1.3.0", "1.2.0", "1.1.0", "1.0.0",
        ],
        latest_stable: "8.2.0",
    },
];

/// Latest stable version for a platform given by name
pub fn get_latest_stable(platform: &str) -> Result<&'static str> {
    let engine: Engine = platform.parse()?;
    Ok(engine.profile().latest_stable)
}
