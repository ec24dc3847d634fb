// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Exporters writing into the Slicer exchange directory

mod ply;
mod scene_xml;

pub use ply::{export_selected_ply, purge_ply_files, ObjectNaming, PlyExportSummary, SkippedObject};
pub use scene_xml::{build_scene_element, export_scene_xml, object_to_element, SCENE_XML_FILE_NAME};
