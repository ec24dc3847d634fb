// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration - exporter settings and settings file discovery

mod resolver;
mod settings;

pub use resolver::{SettingsResolver, CONFIG_ENV, SETTINGS_FILE_NAME};
pub use settings::{Settings, TMPDIR_ENV};
