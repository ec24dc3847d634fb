// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Slicer bridge
//!
//! Exports a scene's object names, world transforms and materials to an XML
//! exchange file, and selected objects' meshes to per-object PLY files, for
//! the Slicer surgical-navigation tool. Both exports write into a single
//! configured temp directory.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod io;
pub mod operator;
pub mod scene;

pub use config::{Settings, SettingsResolver};
pub use error::{ExportError, Result};
pub use export::{export_scene_xml, export_selected_ply, ObjectNaming, PlyExportSummary};
pub use geometry::{Mesh, Primitive};
pub use operator::{ExportContext, Operator, OperatorResult, Outcome, SlicerPlyExport, SlicerXmlExport};
pub use scene::{load_scene_manifest, Scene, SceneMeshEvaluator, SceneObject};
