// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-object PLY exporter

use crate::config::Settings;
use crate::error::Result;
use crate::io::{MeshWriter, PlyOptions};
use crate::scene::{evaluate, MeshEvaluator, SceneObject};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How object names become file stems
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObjectNaming {
    /// Use the object name unchanged. Matches the file names produced by
    /// earlier versions of the exporter, where the `.` to `_` rename never
    /// took effect. The name is joined to the temp directory as is, so a
    /// name containing path separators lands outside `<tmpdir>/<name>.ply`.
    #[default]
    Preserve,
    /// Replace `.` and path separators with `_`; Slicer does not accept dots
    /// in node names, and the file always stays directly in the temp directory
    Sanitize,
}

impl ObjectNaming {
    pub fn file_stem(self, name: &str) -> String {
        match self {
            ObjectNaming::Preserve => name.to_string(),
            ObjectNaming::Sanitize => name.replace(['.', '/', '\\'], "_"),
        }
    }
}

/// An object that produced no file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedObject {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlyExportSummary {
    /// Stale `.ply` files removed before exporting
    pub purged: usize,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedObject>,
}

/// Delete every `.ply` file (any case) below `dir`, returning how many were removed
pub fn purge_ply_files(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_ply = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.to_lowercase().ends_with(".ply"));
        if is_ply {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Export each object's evaluated mesh to `<tmpdir>/<name>.ply`.
///
/// The temp directory is validated and purged of old `.ply` files first.
/// Objects without geometry, or whose evaluation fails, are skipped. A write
/// failure aborts the export; the evaluated mesh is released either way.
pub fn export_selected_ply<'a, I>(
    objects: I,
    settings: &Settings,
    evaluator: &dyn MeshEvaluator,
    writer: &dyn MeshWriter,
    naming: ObjectNaming,
) -> Result<PlyExportSummary>
where
    I: IntoIterator<Item = &'a SceneObject>,
{
    let temp_dir = settings.temp_dir()?;
    let options = PlyOptions::geometry_only(settings.ply_format);

    let mut summary = PlyExportSummary {
        purged: purge_ply_files(temp_dir)?,
        ..Default::default()
    };
    log::debug!("purged {} stale ply files from {}", summary.purged, temp_dir.display());

    for ob in objects {
        let temp_file = temp_dir.join(format!("{}.ply", naming.file_stem(&ob.name)));
        if temp_file.exists() {
            log::debug!("overwriting {}", temp_file.display());
        }

        let mesh = match evaluate(evaluator, ob) {
            Ok(Some(mesh)) => mesh,
            Ok(None) => {
                log::warn!("skipping '{}': no geometry", ob.name);
                summary.skipped.push(SkippedObject {
                    name: ob.name.clone(),
                    reason: "no geometry".to_string(),
                });
                continue;
            }
            Err(e) => {
                log::warn!("skipping '{}': {}", ob.name, e);
                summary.skipped.push(SkippedObject {
                    name: ob.name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        writer.write_mesh(&temp_file, &mesh, &options)?;
        log::debug!(
            "wrote '{}' ({} vertices, {} triangles)",
            ob.name,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        summary.written.push(temp_file);
    }

    log::info!(
        "exported {} ply files to {} ({} skipped)",
        summary.written.len(),
        temp_dir.display(),
        summary.skipped.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::geometry::Mesh;
    use crate::io::PlyWriter;
    use crate::scene::{MeshSource, SceneMeshEvaluator};
    use nalgebra::Vector3;
    use tempfile::TempDir;

    struct FailingWriter;

    impl MeshWriter for FailingWriter {
        fn write_mesh(&self, _path: &Path, _mesh: &Mesh, _options: &PlyOptions) -> Result<()> {
            Err(ExportError::Io(std::io::Error::other("disk full")))
        }
    }

    fn cube(name: &str) -> SceneObject {
        SceneObject::new(name)
            .with_mesh(MeshSource::cube(Vector3::new(1.0, 1.0, 1.0)))
            .selected(true)
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(ObjectNaming::Preserve.file_stem("Cube.001"), "Cube.001");
        assert_eq!(ObjectNaming::Sanitize.file_stem("Cube.001"), "Cube_001");
        assert_eq!(ObjectNaming::Sanitize.file_stem("Skull"), "Skull");
        assert_eq!(ObjectNaming::Sanitize.file_stem("/abs/Liver.L"), "_abs_Liver_L");
        assert_eq!(ObjectNaming::Sanitize.file_stem("a\\b"), "a_b");
    }

    #[test]
    fn test_sanitized_names_stay_in_temp_dir() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let settings = Settings::with_tmpdir(dir.path());
        let evaluator = SceneMeshEvaluator::new();
        let objects = [cube("Left/Kidney.001"), cube("/Spleen")];

        let summary = export_selected_ply(
            &objects,
            &settings,
            &evaluator,
            &PlyWriter,
            ObjectNaming::Sanitize,
        )?;

        assert_eq!(
            summary.written,
            vec![
                dir.path().join("Left_Kidney_001.ply"),
                dir.path().join("_Spleen.ply"),
            ]
        );
        for path in &summary.written {
            assert_eq!(path.parent(), Some(dir.path()));
            assert!(path.is_file());
        }
        Ok(())
    }

    #[test]
    fn test_purge_is_recursive_and_case_insensitive() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let nested = dir.path().join("old");
        fs::create_dir(&nested)?;
        fs::write(dir.path().join("a.ply"), "")?;
        fs::write(dir.path().join("B.PLY"), "")?;
        fs::write(nested.join("c.Ply"), "")?;
        fs::write(dir.path().join("keep.xml"), "")?;
        fs::write(dir.path().join("ply.txt"), "")?;

        assert_eq!(purge_ply_files(dir.path())?, 3);
        assert!(dir.path().join("keep.xml").exists());
        assert!(dir.path().join("ply.txt").exists());
        assert!(nested.exists());
        Ok(())
    }

    #[test]
    fn test_skips_objects_without_geometry() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let settings = Settings::with_tmpdir(dir.path());
        let evaluator = SceneMeshEvaluator::new();
        let objects = [cube("Cube"), SceneObject::new("Empty").selected(true)];

        let summary = export_selected_ply(
            &objects,
            &settings,
            &evaluator,
            &PlyWriter,
            ObjectNaming::Preserve,
        )?;

        assert_eq!(summary.written, vec![dir.path().join("Cube.ply")]);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].name, "Empty");
        assert_eq!(evaluator.live_meshes(), 0);
        Ok(())
    }

    #[test]
    fn test_write_failure_releases_mesh() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let settings = Settings::with_tmpdir(dir.path());
        let evaluator = SceneMeshEvaluator::new();
        let objects = [cube("Cube")];

        let result = export_selected_ply(
            &objects,
            &settings,
            &evaluator,
            &FailingWriter,
            ObjectNaming::Preserve,
        );

        assert!(matches!(result, Err(ExportError::Io(_))));
        assert_eq!(evaluator.live_meshes(), 0);
        Ok(())
    }

    #[test]
    fn test_naming_modes() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let settings = Settings::with_tmpdir(dir.path());
        let evaluator = SceneMeshEvaluator::new();
        let objects = [cube("Liver.001")];

        export_selected_ply(&objects, &settings, &evaluator, &PlyWriter, ObjectNaming::Preserve)?;
        assert!(dir.path().join("Liver.001.ply").exists());

        export_selected_ply(&objects, &settings, &evaluator, &PlyWriter, ObjectNaming::Sanitize)?;
        assert!(dir.path().join("Liver_001.ply").exists());
        // Purged by the second run
        assert!(!dir.path().join("Liver.001.ply").exists());
        Ok(())
    }
}
