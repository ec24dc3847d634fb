// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stanford PLY exporter

use crate::error::Result;
use crate::geometry::Mesh;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PLY body encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlyFormat {
    #[default]
    Ascii,
    BinaryLittleEndian,
}

impl PlyFormat {
    fn header_name(self) -> &'static str {
        match self {
            PlyFormat::Ascii => "ascii",
            PlyFormat::BinaryLittleEndian => "binary_little_endian",
        }
    }
}

/// Which optional vertex attributes to write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlyOptions {
    pub use_normals: bool,
    pub use_uv_coords: bool,
    pub use_colors: bool,
    pub format: PlyFormat,
}

impl PlyOptions {
    /// Positions and faces only
    pub fn geometry_only(format: PlyFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }
}

/// Writes one mesh to one file
pub trait MeshWriter {
    fn write_mesh(&self, path: &Path, mesh: &Mesh, options: &PlyOptions) -> Result<()>;
}

/// Default PLY writer
#[derive(Debug, Clone, Copy, Default)]
pub struct PlyWriter;

impl MeshWriter for PlyWriter {
    fn write_mesh(&self, path: &Path, mesh: &Mesh, options: &PlyOptions) -> Result<()> {
        export(mesh, path, options)
    }
}

/// Export mesh to PLY. UVs and colors are skipped when the mesh has none.
pub fn export(mesh: &Mesh, path: &Path, options: &PlyOptions) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_ply(&mut out, mesh, options)?;
    out.flush()?;
    Ok(())
}

/// Write PLY to any sink
pub fn write_ply<W: Write>(out: &mut W, mesh: &Mesh, options: &PlyOptions) -> Result<()> {
    let layout = Layout {
        normals: options.use_normals,
        uvs: options.use_uv_coords && mesh.has_uvs(),
        colors: options.use_colors && mesh.has_colors(),
    };

    write_header(out, mesh, options.format, layout)?;
    match options.format {
        PlyFormat::Ascii => write_ascii_body(out, mesh, layout)?,
        PlyFormat::BinaryLittleEndian => write_binary_body(out, mesh, layout)?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    normals: bool,
    uvs: bool,
    colors: bool,
}

fn write_header<W: Write>(out: &mut W, mesh: &Mesh, format: PlyFormat, layout: Layout) -> Result<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format {} 1.0", format.header_name())?;
    writeln!(out, "comment Created by slicer-bridge {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "element vertex {}", mesh.vertex_count())?;
    for axis in ["x", "y", "z"] {
        writeln!(out, "property float {}", axis)?;
    }
    if layout.normals {
        for axis in ["nx", "ny", "nz"] {
            writeln!(out, "property float {}", axis)?;
        }
    }
    if layout.uvs {
        writeln!(out, "property float s")?;
        writeln!(out, "property float t")?;
    }
    if layout.colors {
        for channel in ["red", "green", "blue"] {
            writeln!(out, "property uchar {}", channel)?;
        }
    }
    writeln!(out, "element face {}", mesh.triangle_count())?;
    writeln!(out, "property list uchar uint vertex_indices")?;
    writeln!(out, "end_header")?;
    Ok(())
}

fn write_ascii_body<W: Write>(out: &mut W, mesh: &Mesh, layout: Layout) -> Result<()> {
    for (i, v) in mesh.vertices.iter().enumerate() {
        let p = v.position;
        write!(out, "{} {} {}", p.x as f32, p.y as f32, p.z as f32)?;
        if layout.normals {
            let n = v.normal;
            write!(out, " {} {} {}", n.x as f32, n.y as f32, n.z as f32)?;
        }
        if layout.uvs {
            let [s, t] = mesh.uvs[i];
            write!(out, " {} {}", s as f32, t as f32)?;
        }
        if layout.colors {
            let [r, g, b] = color_bytes(mesh.colors[i]);
            write!(out, " {} {} {}", r, g, b)?;
        }
        writeln!(out)?;
    }
    for tri in &mesh.triangles {
        let [a, b, c] = tri.indices;
        writeln!(out, "3 {} {} {}", a, b, c)?;
    }
    Ok(())
}

fn write_binary_body<W: Write>(out: &mut W, mesh: &Mesh, layout: Layout) -> Result<()> {
    for (i, v) in mesh.vertices.iter().enumerate() {
        for c in v.position.coords.iter() {
            out.write_all(&(*c as f32).to_le_bytes())?;
        }
        if layout.normals {
            for c in v.normal.iter() {
                out.write_all(&(*c as f32).to_le_bytes())?;
            }
        }
        if layout.uvs {
            for c in mesh.uvs[i] {
                out.write_all(&(c as f32).to_le_bytes())?;
            }
        }
        if layout.colors {
            out.write_all(&color_bytes(mesh.colors[i]))?;
        }
    }
    for tri in &mesh.triangles {
        out.write_all(&[3u8])?;
        for index in tri.indices {
            out.write_all(&(index as u32).to_le_bytes())?;
        }
    }
    Ok(())
}

fn color_bytes(color: [f32; 3]) -> [u8; 3] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
