// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving configuration.

use crate::error::{SeamError, SeamResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How far to carve, and how fast to show it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarveConfig {
    /// Number of columns to strip before stopping.
    pub seams_to_remove: u32,

    /// Ticks between highlighting a seam and removing it.  Purely a
    /// presentation knob: the seams chosen do not depend on it.
    pub removal_pace: u32,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "seamcarve=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self {
            seams_to_remove: 1000,
            removal_pace: 1,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl CarveConfig {
    /// A default configuration that strips `seams_to_remove` columns.
    pub fn with_seams(seams_to_remove: u32) -> Self {
        Self {
            seams_to_remove,
            ..Self::default()
        }
    }

    /// Load a JSON configuration file.  Missing fields take their
    /// defaults; the result is validated before it is returned.
    pub fn from_file(path: impl AsRef<Path>) -> SeamResult<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path)?;
        let config: CarveConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!(?path, ?config, "loaded carve configuration");
        Ok(config)
    }

    pub fn validate(&self) -> SeamResult<()> {
        if self.removal_pace == 0 {
            return Err(SeamError::config("removal_pace must be at least 1"));
        }
        Ok(())
    }
}
