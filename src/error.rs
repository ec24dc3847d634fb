// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types shared by the exporters

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The temp directory is unset or does not exist. Blocks the export before
    /// anything is written.
    #[error("{0}")]
    Configuration(String),

    /// No settings file could be located. Indicates a broken installation,
    /// never retried.
    #[error("could not locate {file_name} (searched: {})", display_paths(.searched))]
    Resolution {
        file_name: String,
        searched: Vec<PathBuf>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("invalid scene manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("invalid settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    #[error("mesh error for '{object}': {message}")]
    Mesh { object: String, message: String },
}

impl ExportError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ExportError::Configuration(_))
    }

    pub fn is_resolution(&self) -> bool {
        matches!(self, ExportError::Resolution { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
