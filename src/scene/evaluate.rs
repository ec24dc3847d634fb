// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scoped mesh evaluation
//!
//! Evaluating an object bakes its geometry into a standalone [`Mesh`] snapshot
//! owned by the evaluator. Every snapshot handed out by [`MeshEvaluator::acquire`]
//! must be given back through [`MeshEvaluator::release`]; [`EvaluatedMesh`]
//! does that on drop so no exit path can leak one.

use super::{MeshSource, SceneObject};
use crate::error::{ExportError, Result};
use crate::geometry::{Mesh, Primitive};
use crate::io::import_stl;
use nalgebra::{Point3, Vector3};
use std::cell::Cell;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Turns scene objects into concrete meshes
pub trait MeshEvaluator {
    /// Evaluate `object`. `Ok(None)` means the object has no geometry.
    fn acquire(&self, object: &SceneObject) -> Result<Option<Mesh>>;

    /// Give back a mesh obtained from `acquire`
    fn release(&self, mesh: Mesh);
}

/// An acquired mesh, released back to its evaluator when dropped
pub struct EvaluatedMesh<'a, E: MeshEvaluator + ?Sized> {
    evaluator: &'a E,
    mesh: Mesh,
}

impl<E: MeshEvaluator + ?Sized> Deref for EvaluatedMesh<'_, E> {
    type Target = Mesh;

    fn deref(&self) -> &Mesh {
        &self.mesh
    }
}

impl<E: MeshEvaluator + ?Sized> Drop for EvaluatedMesh<'_, E> {
    fn drop(&mut self) {
        self.evaluator.release(std::mem::take(&mut self.mesh));
    }
}

/// Evaluate `object` into a scoped mesh
pub fn evaluate<'a, E: MeshEvaluator + ?Sized>(
    evaluator: &'a E,
    object: &SceneObject,
) -> Result<Option<EvaluatedMesh<'a, E>>> {
    Ok(evaluator
        .acquire(object)?
        .map(|mesh| EvaluatedMesh { evaluator, mesh }))
}

/// Evaluator for manifest-described geometry.
///
/// Meshes are produced in object-local coordinates. The number of meshes
/// currently acquired and not yet released is tracked in `live_meshes`.
#[derive(Debug, Default)]
pub struct SceneMeshEvaluator {
    base_dir: PathBuf,
    live: Cell<usize>,
}

impl SceneMeshEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative STL paths against `base_dir`
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            live: Cell::new(0),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn live_meshes(&self) -> usize {
        self.live.get()
    }

    fn build(&self, object: &SceneObject, source: &MeshSource) -> Result<Mesh> {
        let mesh = match source {
            MeshSource::Cube { size } => {
                Primitive::cube(Vector3::new(size[0], size[1], size[2])).to_mesh()
            }
            MeshSource::Sphere { radius, segments } => {
                Primitive::sphere(*radius, *segments).to_mesh()
            }
            MeshSource::Cylinder {
                height,
                radius,
                segments,
            } => Primitive::cylinder(*height, *radius, *segments).to_mesh(),
            MeshSource::Inline { vertices, faces } => {
                let positions: Vec<Point3<f64>> =
                    vertices.iter().map(|v| Point3::new(v[0], v[1], v[2])).collect();
                Mesh::from_faces(&positions, faces).ok_or_else(|| ExportError::Mesh {
                    object: object.name.clone(),
                    message: "face index out of range".to_string(),
                })?
            }
            MeshSource::Stl { path } => {
                let path = if path.is_relative() {
                    self.base_dir.join(path)
                } else {
                    path.clone()
                };
                import_stl(&path).map_err(|e| ExportError::Mesh {
                    object: object.name.clone(),
                    message: format!("{}: {}", path.display(), e),
                })?
            }
        };
        Ok(mesh)
    }
}

impl MeshEvaluator for SceneMeshEvaluator {
    fn acquire(&self, object: &SceneObject) -> Result<Option<Mesh>> {
        let Some(source) = &object.mesh else {
            return Ok(None);
        };
        let mesh = self.build(object, source)?;
        if mesh.is_empty() {
            return Ok(None);
        }
        self.live.set(self.live.get() + 1);
        Ok(Some(mesh))
    }

    fn release(&self, _mesh: Mesh) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}
