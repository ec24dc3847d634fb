// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reader for the scene exchange document

use super::serialize::{element_to_color, element_to_matrix};
use super::xml::Element;
use crate::error::{ExportError, Result};
use crate::scene::DiffuseColor;
use nalgebra::DMatrix;
use std::fs;
use std::path::Path;

/// One `b_object` entry read back from an exchange document
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedObject {
    pub name: String,
    pub matrix: DMatrix<f64>,
    /// `Some` when the object carried a `material` element
    pub material: Option<Option<DiffuseColor>>,
}

impl ExportedObject {
    pub fn has_material(&self) -> bool {
        self.material.is_some()
    }

    pub fn color(&self) -> Option<DiffuseColor> {
        self.material.flatten()
    }
}

/// Parse a `scene` document into its objects, in document order
pub fn parse_scene_document(xml: &str) -> Result<Vec<ExportedObject>> {
    let root = Element::parse(xml)?;
    if root.tag != "scene" {
        return Err(ExportError::MalformedDocument(format!(
            "expected <scene> root, found <{}>",
            root.tag
        )));
    }

    root.children_named("b_object").map(parse_object).collect()
}

/// Read an exchange file from disk
pub fn read_scene_xml(path: impl AsRef<Path>) -> Result<Vec<ExportedObject>> {
    let xml = fs::read_to_string(path.as_ref())?;
    parse_scene_document(&xml)
}

fn parse_object(element: &Element) -> Result<ExportedObject> {
    let name = element
        .attribute("name")
        .ok_or_else(|| ExportError::MalformedDocument("b_object without a name".to_string()))?;
    let matrix = element.child("matrix").ok_or_else(|| {
        ExportError::MalformedDocument(format!("b_object '{}' has no matrix", name))
    })?;
    let material = element.child("material").map(element_to_color).transpose()?;

    Ok(ExportedObject {
        name: name.to_string(),
        matrix: element_to_matrix(matrix)?,
        material,
    })
}
