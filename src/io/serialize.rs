// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Matrix and material serializers for the Slicer exchange format
//!
//! Numbers use Rust's shortest round-trip formatting, with `.0` appended to
//! integral values so `1` is written as `1.0`. Exponent notation is never
//! used, so very large or small magnitudes are written out in full.

use super::xml::Element;
use crate::error::{ExportError, Result};
use crate::scene::{DiffuseColor, Material};
use nalgebra::storage::RawStorage;
use nalgebra::{DMatrix, Dim, Matrix};

/// Default textual form of a float
pub fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Round the stored value to 4 decimal places.
///
/// Works on the exact decimal expansion of `value`, ties to even, so
/// `0.00035` (stored just below the tie) gives `0.0003`.
pub fn round4(value: f64) -> f64 {
    format!("{:.4}", value).parse().unwrap_or(value)
}

/// `matrix` element with one `row` per matrix row and one `entry` per cell
pub fn matrix_to_element<R, C, S>(mx: &Matrix<f64, R, C, S>) -> Element
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    let mut xml_mx = Element::new("matrix");
    for i in 0..mx.nrows() {
        let mut xml_row = Element::new("row");
        for j in 0..mx.ncols() {
            xml_row.push(Element::with_text("entry", format_float(mx[(i, j)])));
        }
        xml_mx.push(xml_row);
    }
    xml_mx
}

/// Parse a `matrix` element. Every row must have the same number of entries.
pub fn element_to_matrix(element: &Element) -> Result<DMatrix<f64>> {
    if element.tag != "matrix" {
        return Err(malformed(format!("expected <matrix>, found <{}>", element.tag)));
    }

    let mut ncols = None;
    let mut cells = Vec::new();
    let mut nrows = 0;
    for row in element.children_named("row") {
        let mut width = 0;
        for entry in row.children_named("entry") {
            cells.push(parse_number(entry)?);
            width += 1;
        }
        match ncols {
            None => ncols = Some(width),
            Some(n) if n != width => {
                return Err(malformed(format!("row {} has {} entries, expected {}", nrows, width, n)))
            }
            Some(_) => {}
        }
        nrows += 1;
    }

    Ok(DMatrix::from_row_slice(nrows, ncols.unwrap_or(0), &cells))
}

/// `material` element holding the diffuse color as `r`, `g`, `b`
pub fn material_to_element(material: &Material) -> Element {
    color_to_element(&material.diffuse_color)
}

pub fn color_to_element(color: &DiffuseColor) -> Element {
    let mut xml_mat = Element::new("material");
    xml_mat.push(Element::with_text("r", format_float(round4(color.r))));
    xml_mat.push(Element::with_text("g", format_float(round4(color.g))));
    xml_mat.push(Element::with_text("b", format_float(round4(color.b))));
    xml_mat
}

/// Parse a `material` element. An empty `<material/>` yields `None`.
pub fn element_to_color(element: &Element) -> Result<Option<DiffuseColor>> {
    if element.tag != "material" {
        return Err(malformed(format!("expected <material>, found <{}>", element.tag)));
    }
    if element.children.is_empty() {
        return Ok(None);
    }

    let channel = |name: &str| -> Result<f64> {
        element
            .child(name)
            .ok_or_else(|| malformed(format!("material is missing <{}>", name)))
            .and_then(parse_number)
    };
    Ok(Some(DiffuseColor::new(channel("r")?, channel("g")?, channel("b")?)))
}

fn parse_number(element: &Element) -> Result<f64> {
    let text = element.text().unwrap_or_default().trim();
    text.parse::<f64>()
        .map_err(|_| malformed(format!("<{}> is not a number: {:?}", element.tag, text)))
}

fn malformed(message: String) -> ExportError {
    ExportError::MalformedDocument(message)
}
