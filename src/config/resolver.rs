// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Settings file discovery
//!
//! Lookup order: an explicit path, then `SLICER_BRIDGE_CONFIG`, then the
//! start directory and each of its ancestors. Ancestors named `lib` or
//! `addons` are generic install folders and are never searched.

use super::Settings;
use crate::error::{ExportError, Result};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "slicer_bridge.toml";
pub const CONFIG_ENV: &str = "SLICER_BRIDGE_CONFIG";

const GENERIC_FOLDERS: [&str; 2] = ["lib", "addons"];

#[derive(Debug, Clone)]
pub struct SettingsResolver {
    explicit: Option<PathBuf>,
    start_dir: Option<PathBuf>,
    use_env: bool,
    config_env: Option<PathBuf>,
}

impl Default for SettingsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsResolver {
    pub fn new() -> Self {
        Self {
            explicit: None,
            start_dir: None,
            use_env: true,
            config_env: None,
        }
    }

    /// Use this file and nothing else
    pub fn explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Directory the ancestor walk starts from (defaults to the current directory)
    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Ignore `SLICER_BRIDGE_CONFIG`
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self.config_env = None;
        self
    }

    /// Take `path` as the value of `SLICER_BRIDGE_CONFIG` instead of reading
    /// the process environment
    pub fn config_env(mut self, path: impl Into<PathBuf>) -> Self {
        self.use_env = true;
        self.config_env = Some(path.into());
        self
    }

    fn env_path(&self) -> Option<PathBuf> {
        if !self.use_env {
            return None;
        }
        self.config_env
            .clone()
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Path of the settings file that `resolve` would load
    pub fn locate(&self) -> Result<PathBuf> {
        let mut searched = Vec::new();

        if let Some(path) = &self.explicit {
            return existing(path, &mut searched).ok_or_else(|| not_found(searched));
        }

        if let Some(path) = self.env_path() {
            if let Some(found) = existing(&path, &mut searched) {
                return Ok(found);
            }
            log::warn!(
                "{} points to missing file {}, searching ancestors",
                CONFIG_ENV,
                path.display()
            );
        }

        let start = match &self.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        for dir in start.ancestors() {
            if is_generic_folder(dir) {
                continue;
            }
            if let Some(found) = existing(&dir.join(SETTINGS_FILE_NAME), &mut searched) {
                return Ok(found);
            }
        }

        Err(not_found(searched))
    }

    /// Locate and load the settings, applying environment overrides
    pub fn resolve(&self) -> Result<Settings> {
        let path = self.locate()?;
        log::debug!("loading settings from {}", path.display());
        Ok(Settings::from_file(&path)?.with_env_overrides())
    }
}

fn existing(path: &Path, searched: &mut Vec<PathBuf>) -> Option<PathBuf> {
    if path.is_file() {
        Some(path.to_path_buf())
    } else {
        searched.push(path.to_path_buf());
        None
    }
}

fn is_generic_folder(dir: &Path) -> bool {
    dir.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| GENERIC_FOLDERS.contains(&name))
}

fn not_found(searched: Vec<PathBuf>) -> ExportError {
    ExportError::Resolution {
        file_name: SETTINGS_FILE_NAME.to_string(),
        searched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_file_in_ancestor() -> anyhow::Result<()> {
        let root = TempDir::new()?;
        let nested = root.path().join("project").join("scenes");
        std::fs::create_dir_all(&nested)?;
        let settings_path = root.path().join("project").join(SETTINGS_FILE_NAME);
        Settings::with_tmpdir(root.path()).save(&settings_path)?;

        let found = SettingsResolver::new()
            .without_env()
            .start_dir(&nested)
            .locate()?;
        assert_eq!(found, settings_path);
        Ok(())
    }

    #[test]
    fn test_skips_generic_folders() -> anyhow::Result<()> {
        let root = TempDir::new()?;
        let addons = root.path().join("addons");
        let inner = addons.join("slicer");
        std::fs::create_dir_all(&inner)?;
        // Placed in a generic folder, so it must be ignored
        Settings::default().save(addons.join(SETTINGS_FILE_NAME))?;
        let real = root.path().join(SETTINGS_FILE_NAME);
        Settings::default().save(&real)?;

        let found = SettingsResolver::new()
            .without_env()
            .start_dir(&inner)
            .locate()?;
        assert_eq!(found, real);
        Ok(())
    }

    #[test]
    fn test_config_env_wins_over_ancestors() -> anyhow::Result<()> {
        let root = TempDir::new()?;
        let project = root.path().join("project");
        std::fs::create_dir_all(&project)?;
        Settings::default().save(project.join(SETTINGS_FILE_NAME))?;
        let shared = root.path().join("shared.toml");
        Settings::default().save(&shared)?;

        let found = SettingsResolver::new()
            .config_env(&shared)
            .start_dir(&project)
            .locate()?;
        assert_eq!(found, shared);
        Ok(())
    }

    #[test]
    fn test_missing_config_env_falls_through() -> anyhow::Result<()> {
        let root = TempDir::new()?;
        let project = root.path().join("project");
        std::fs::create_dir_all(&project)?;
        let local = project.join(SETTINGS_FILE_NAME);
        Settings::default().save(&local)?;
        let gone = root.path().join("gone.toml");

        let found = SettingsResolver::new()
            .config_env(&gone)
            .start_dir(&project)
            .locate()?;
        assert_eq!(found, local);

        let err = SettingsResolver::new()
            .config_env(&gone)
            .explicit(root.path().join("also-missing.toml"))
            .locate()
            .unwrap_err();
        assert!(err.is_resolution());
        Ok(())
    }

    #[test]
    fn test_explicit_missing_is_resolution_error() {
        let err = SettingsResolver::new()
            .explicit("/definitely/not/here/slicer_bridge.toml")
            .resolve()
            .unwrap_err();
        assert!(err.is_resolution());
        assert!(err.to_string().contains("slicer_bridge.toml"));
    }

    #[test]
    fn test_resolve_loads_settings() -> anyhow::Result<()> {
        let root = TempDir::new()?;
        let path = root.path().join(SETTINGS_FILE_NAME);
        let mut settings = Settings::with_tmpdir(root.path());
        settings.pretty_xml = true;
        settings.save(&path)?;

        let resolved = SettingsResolver::new().without_env().explicit(&path).resolve()?;
        assert!(resolved.pretty_xml);
        Ok(())
    }
}
