// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL importer for file-backed scene geometry

use crate::error::Result;
use crate::geometry::Mesh;
use nalgebra::Point3;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read an ASCII or binary STL file into a mesh with shared vertices
pub fn import(path: &Path) -> Result<Mesh> {
    let mut reader = BufReader::new(File::open(path)?);
    let stl = stl_io::read_stl(&mut reader)?;

    let positions: Vec<Point3<f64>> = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();
    let faces: Vec<[usize; 3]> = stl.faces.iter().map(|f| f.vertices).collect();

    // stl_io only produces in-range indices
    Ok(Mesh::from_faces(&positions, &faces).unwrap_or_default())
}
