// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene XML exporter

use crate::config::Settings;
use crate::error::Result;
use crate::io::{matrix_to_element, material_to_element, Element};
use crate::scene::{Scene, SceneObject};
use std::fs;
use std::path::PathBuf;

/// Name of the exchange document inside the temp directory
pub const SCENE_XML_FILE_NAME: &str = "blend_to_slicer.xml";

/// `b_object` element for one object: its name, world matrix and the
/// material of its first slot, if it has any slots.
pub fn object_to_element(object: &SceneObject) -> Element {
    let mut xob = Element::new("b_object");
    xob.set("name", object.name.as_str());
    xob.push(matrix_to_element(&object.matrix_world));

    if let Some(slot) = object.first_slot() {
        let xml_mat = match &slot.material {
            Some(material) => material_to_element(material),
            // An empty first slot still marks the object as having a material
            None => Element::new("material"),
        };
        log::debug!("material for '{}': {:?}", object.name, xml_mat);
        xob.push(xml_mat);
    }
    xob
}

/// `scene` element holding one `b_object` per object, in scene order
pub fn build_scene_element(scene: &Scene) -> Element {
    let mut x_scene = Element::new("scene");
    for object in scene.objects() {
        x_scene.push(object_to_element(object));
    }
    x_scene
}

/// Write the scene to `<tmpdir>/blend_to_slicer.xml`, replacing any previous
/// export. Fails before writing anything if the temp directory is invalid.
pub fn export_scene_xml(scene: &Scene, settings: &Settings) -> Result<PathBuf> {
    let temp_dir = settings.temp_dir()?;

    let xml = build_scene_element(scene).to_xml_string(settings.pretty_xml)?;
    let temp_file = temp_dir.join(SCENE_XML_FILE_NAME);
    if temp_file.exists() {
        log::debug!("overwriting {}", temp_file.display());
    }
    fs::write(&temp_file, xml)?;

    log::info!(
        "exported {} objects to {}",
        scene.len(),
        temp_file.display()
    );
    Ok(temp_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{DiffuseColor, Material, MaterialSlot};
    use nalgebra::{Matrix4, Vector3};
    use tempfile::TempDir;

    #[test]
    fn test_object_without_slots() {
        let element = object_to_element(&SceneObject::new("Lamp"));
        assert_eq!(element.attribute("name"), Some("Lamp"));
        assert_eq!(element.children.len(), 1);
        assert_eq!(element.children[0].tag, "matrix");
    }

    #[test]
    fn test_only_first_slot_exported() {
        let ob = SceneObject::new("Tumor")
            .with_material(Material::new("Red", DiffuseColor::new(1.0, 0.0, 0.0)))
            .with_material(Material::new("Blue", DiffuseColor::new(0.0, 0.0, 1.0)));
        let element = object_to_element(&ob);

        let materials: Vec<_> = element.children_named("material").collect();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].child("r").and_then(Element::text), Some("1.0"));
    }

    #[test]
    fn test_empty_first_slot() {
        let ob = SceneObject::new("Vessel")
            .with_slot(MaterialSlot::empty())
            .with_material(Material::new("Red", DiffuseColor::new(1.0, 0.0, 0.0)));
        let element = object_to_element(&ob);

        let material = element.child("material").expect("material element");
        assert!(material.children.is_empty());
    }

    #[test]
    fn test_export_overwrites() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let settings = Settings::with_tmpdir(dir.path());
        let target = dir.path().join(SCENE_XML_FILE_NAME);
        fs::write(&target, "stale content that is longer than the new document ".repeat(100))?;

        let scene = Scene::new("Scene").with_object(
            SceneObject::new("Cube")
                .with_matrix(Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0))),
        );
        let path = export_scene_xml(&scene, &settings)?;
        assert_eq!(path, target);

        let written = fs::read_to_string(&path)?;
        assert!(written.starts_with("<?xml"));
        assert!(!written.contains("stale"));
        assert!(written.contains("<entry>3.0</entry>"));
        Ok(())
    }

    #[test]
    fn test_invalid_tmpdir_writes_nothing() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let missing = dir.path().join("missing");
        let settings = Settings::with_tmpdir(&missing);

        let err = export_scene_xml(&Scene::new("Scene"), &settings).unwrap_err();
        assert!(err.is_configuration());
        assert!(!missing.exists());
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }
}
