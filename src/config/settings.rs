// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Exporter settings

use crate::error::{ExportError, Result};
use crate::io::PlyFormat;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding `tmpdir`
pub const TMPDIR_ENV: &str = "SLICER_TMPDIR";

const TMPDIR_HINT: &str = "set `tmpdir` in the slicer_bridge.toml settings file";

/// Persisted exporter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Exchange directory shared with Slicer
    pub tmpdir: PathBuf,
    /// Indent the scene XML
    pub pretty_xml: bool,
    /// Encoding of exported PLY files
    pub ply_format: PlyFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tmpdir: PathBuf::from("slicer_module").join("tmp"),
            pretty_xml: false,
            ply_format: PlyFormat::Ascii,
        }
    }
}

impl Settings {
    pub fn with_tmpdir(tmpdir: impl Into<PathBuf>) -> Self {
        Self {
            tmpdir: tmpdir.into(),
            ..Default::default()
        }
    }

    /// Load settings from a TOML file. Missing keys take their defaults and
    /// a relative `tmpdir` is resolved against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut settings: Settings =
            toml::from_str(&content).map_err(|source| ExportError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;

        if settings.tmpdir.is_relative() && !settings.tmpdir.as_os_str().is_empty() {
            if let Some(parent) = path.parent() {
                settings.tmpdir = parent.join(&settings.tmpdir);
            }
        }
        Ok(settings)
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var_os(key))
    }

    /// Apply overrides read through `lookup` instead of the process environment
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if let Some(tmpdir) = lookup(TMPDIR_ENV) {
            self.tmpdir = PathBuf::from(tmpdir);
        }
        self
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// The exchange directory, validated as non-empty and an existing directory
    pub fn temp_dir(&self) -> Result<&Path> {
        if self.tmpdir.as_os_str().is_empty() {
            return Err(ExportError::Configuration(format!(
                "Temp directory is not set, {}",
                TMPDIR_HINT
            )));
        }
        if !self.tmpdir.is_dir() {
            return Err(ExportError::Configuration(format!(
                "Temp directory {} doesn't exist, {}",
                self.tmpdir.display(),
                TMPDIR_HINT
            )));
        }
        Ok(&self.tmpdir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_dir_validation() -> anyhow::Result<()> {
        let dir = TempDir::new()?;

        let ok = Settings::with_tmpdir(dir.path());
        assert_eq!(ok.temp_dir()?, dir.path());

        let unset = Settings::with_tmpdir("");
        assert!(unset.temp_dir().unwrap_err().is_configuration());

        let missing = Settings::with_tmpdir(dir.path().join("missing"));
        assert!(missing.temp_dir().unwrap_err().is_configuration());

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "not a directory")?;
        assert!(Settings::with_tmpdir(&file).temp_dir().is_err());
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("slicer_bridge.toml");

        let settings = Settings {
            tmpdir: dir.path().join("exchange"),
            pretty_xml: true,
            ply_format: PlyFormat::BinaryLittleEndian,
        };
        settings.save(&path)?;

        assert_eq!(Settings::from_file(&path)?, settings);
        Ok(())
    }

    #[test]
    fn test_relative_tmpdir_and_defaults() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("slicer_bridge.toml");
        std::fs::write(&path, "tmpdir = \"exchange\"\n")?;

        let settings = Settings::from_file(&path)?;
        assert_eq!(settings.tmpdir, dir.path().join("exchange"));
        assert!(!settings.pretty_xml);
        assert_eq!(settings.ply_format, PlyFormat::Ascii);
        Ok(())
    }

    #[test]
    fn test_tmpdir_override() {
        let settings = Settings::with_tmpdir("from/file").with_overrides_from(|key| {
            (key == TMPDIR_ENV).then(|| OsString::from("/srv/slicer/exchange"))
        });
        assert_eq!(settings.tmpdir, PathBuf::from("/srv/slicer/exchange"));

        let untouched = Settings::with_tmpdir("from/file").with_overrides_from(|_| None);
        assert_eq!(untouched.tmpdir, PathBuf::from("from/file"));
    }

    #[test]
    fn test_invalid_toml() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("slicer_bridge.toml");
        std::fs::write(&path, "tmpdir = [")?;

        assert!(matches!(
            Settings::from_file(&path),
            Err(ExportError::SettingsParse { .. })
        ));
        Ok(())
    }
}
