// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON scene manifest importer
//!
//! A manifest stands in for the live scene graph of the authoring tool:
//!
//! ```json
//! {
//!   "name": "Scene",
//!   "objects": [
//!     {
//!       "name": "Cube",
//!       "matrix_world": [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]],
//!       "selected": true,
//!       "material_slots": [{ "material": { "name": "Bone", "diffuse_color": [0.5, 0.25, 0.125] } }],
//!       "mesh": { "type": "cube", "size": [2, 2, 2] }
//!     }
//!   ]
//! }
//! ```

use super::{MaterialSlot, MeshSource, Scene, SceneObject};
use crate::error::Result;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct SceneManifest {
    #[serde(default = "default_scene_name")]
    name: String,
    #[serde(default)]
    objects: Vec<ObjectManifest>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ObjectManifest {
    name: String,
    /// Row-major world transform
    #[serde(default = "identity_rows")]
    matrix_world: [[f64; 4]; 4],
    #[serde(default)]
    material_slots: Vec<MaterialSlot>,
    #[serde(default)]
    selected: bool,
    #[serde(default)]
    mesh: Option<MeshSource>,
}

fn default_scene_name() -> String {
    "Scene".to_string()
}

fn identity_rows() -> [[f64; 4]; 4] {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

impl From<ObjectManifest> for SceneObject {
    fn from(m: ObjectManifest) -> Self {
        let flat: Vec<f64> = m.matrix_world.iter().flatten().copied().collect();
        SceneObject {
            name: m.name,
            matrix_world: Matrix4::from_row_slice(&flat),
            material_slots: m.material_slots,
            selected: m.selected,
            mesh: m.mesh,
        }
    }
}

impl From<&SceneObject> for ObjectManifest {
    fn from(ob: &SceneObject) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = ob.matrix_world[(i, j)];
            }
        }
        ObjectManifest {
            name: ob.name.clone(),
            matrix_world: rows,
            material_slots: ob.material_slots.clone(),
            selected: ob.selected,
            mesh: ob.mesh.clone(),
        }
    }
}

impl Scene {
    /// Parse a scene from manifest JSON
    pub fn from_json(source: &str) -> Result<Scene> {
        let manifest: SceneManifest = serde_json::from_str(source)?;
        Ok(Scene {
            name: manifest.name,
            objects: manifest.objects.into_iter().map(SceneObject::from).collect(),
        })
    }

    /// Serialize the scene back to manifest JSON
    pub fn to_json(&self) -> Result<String> {
        let manifest = SceneManifest {
            name: self.name.clone(),
            objects: self.objects.iter().map(ObjectManifest::from).collect(),
        };
        Ok(serde_json::to_string_pretty(&manifest)?)
    }
}

/// Load a scene manifest from disk
pub fn load_scene_manifest(path: impl AsRef<Path>) -> Result<Scene> {
    let source = fs::read_to_string(path.as_ref())?;
    Scene::from_json(&source)
}
