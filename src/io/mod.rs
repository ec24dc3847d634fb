// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - XML serialization, exchange documents, PLY export and STL import

mod exchange;
mod export_ply;
mod import_stl;
mod serialize;
mod xml;

pub use exchange::{parse_scene_document, read_scene_xml, ExportedObject};
pub use export_ply::export as export_ply;
pub use export_ply::{write_ply, MeshWriter, PlyFormat, PlyOptions, PlyWriter};
pub use import_stl::import as import_stl;
pub use serialize::{
    color_to_element, element_to_color, element_to_matrix, format_float, material_to_element,
    matrix_to_element, round4,
};
pub use xml::Element;
