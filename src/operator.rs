// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Invocable export commands and their outcomes

use crate::config::Settings;
use crate::error::ExportError;
use crate::export::{export_scene_xml, export_selected_ply, ObjectNaming};
use crate::io::MeshWriter;
use crate::scene::{MeshEvaluator, Scene};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished,
    Cancelled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Finished => write!(f, "FINISHED"),
            Outcome::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing message produced while running an operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: ReportLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorResult {
    pub outcome: Outcome,
    pub reports: Vec<Report>,
}

impl OperatorResult {
    fn finished(reports: Vec<Report>) -> Self {
        Self {
            outcome: Outcome::Finished,
            reports,
        }
    }

    fn cancelled(error: &ExportError) -> Self {
        Self {
            outcome: Outcome::Cancelled,
            reports: vec![Report {
                level: ReportLevel::Error,
                message: error.to_string(),
            }],
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome == Outcome::Finished
    }

    /// The first error message, if any
    pub fn error_message(&self) -> Option<&str> {
        self.reports
            .iter()
            .find(|r| r.level == ReportLevel::Error)
            .map(|r| r.message.as_str())
    }
}

/// Everything an operator reads. Settings are resolved by the caller.
pub struct ExportContext<'a> {
    pub scene: &'a Scene,
    pub settings: &'a Settings,
    pub evaluator: &'a dyn MeshEvaluator,
    pub writer: &'a dyn MeshWriter,
}

pub trait Operator {
    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn execute(&self, ctx: &ExportContext<'_>) -> OperatorResult;
}

/// "Export Slicer XML": object names, transforms and materials
#[derive(Debug, Clone, Copy, Default)]
pub struct SlicerXmlExport;

impl Operator for SlicerXmlExport {
    fn id(&self) -> &'static str {
        "export.slicerxml"
    }

    fn label(&self) -> &'static str {
        "Export Slicer XML"
    }

    fn execute(&self, ctx: &ExportContext<'_>) -> OperatorResult {
        match export_scene_xml(ctx.scene, ctx.settings) {
            Ok(path) => OperatorResult::finished(vec![Report {
                level: ReportLevel::Info,
                message: format!("Wrote {}", path.display()),
            }]),
            Err(e) => OperatorResult::cancelled(&e),
        }
    }
}

/// "Export Slicer Ply": selected objects' meshes, one file each
#[derive(Debug, Clone, Copy)]
pub struct SlicerPlyExport {
    /// Accepted for compatibility; existing files are always replaced
    pub overwrite: bool,
    pub naming: ObjectNaming,
}

impl Default for SlicerPlyExport {
    fn default() -> Self {
        Self {
            overwrite: true,
            naming: ObjectNaming::Preserve,
        }
    }
}

impl Operator for SlicerPlyExport {
    fn id(&self) -> &'static str {
        "export.slicerply"
    }

    fn label(&self) -> &'static str {
        "Export Slicer Ply"
    }

    fn execute(&self, ctx: &ExportContext<'_>) -> OperatorResult {
        let summary = match export_selected_ply(
            ctx.scene.selected_objects(),
            ctx.settings,
            ctx.evaluator,
            ctx.writer,
            self.naming,
        ) {
            Ok(summary) => summary,
            Err(e) => return OperatorResult::cancelled(&e),
        };

        let mut reports = vec![Report {
            level: ReportLevel::Info,
            message: format!("Wrote {} ply files", summary.written.len()),
        }];
        reports.extend(summary.skipped.into_iter().map(|s| Report {
            level: ReportLevel::Warning,
            message: format!("Skipped '{}': {}", s.name, s.reason),
        }));
        OperatorResult::finished(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::PlyWriter;
    use crate::scene::{MeshSource, SceneMeshEvaluator, SceneObject};
    use nalgebra::Vector3;
    use tempfile::TempDir;

    fn scene() -> Scene {
        Scene::new("Scene")
            .with_object(
                SceneObject::new("Cube")
                    .with_mesh(MeshSource::cube(Vector3::new(1.0, 1.0, 1.0)))
                    .selected(true),
            )
            .with_object(SceneObject::new("Camera").selected(true))
    }

    #[test]
    fn test_xml_operator_finished() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let settings = Settings::with_tmpdir(dir.path());
        let scene = scene();
        let evaluator = SceneMeshEvaluator::new();
        let ctx = ExportContext {
            scene: &scene,
            settings: &settings,
            evaluator: &evaluator,
            writer: &PlyWriter,
        };

        let op = SlicerXmlExport;
        assert_eq!(op.id(), "export.slicerxml");
        let result = op.execute(&ctx);
        assert!(result.is_finished());
        assert!(result.error_message().is_none());
        Ok(())
    }

    #[test]
    fn test_ply_operator_reports_skips() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let settings = Settings::with_tmpdir(dir.path());
        let scene = scene();
        let evaluator = SceneMeshEvaluator::new();
        let ctx = ExportContext {
            scene: &scene,
            settings: &settings,
            evaluator: &evaluator,
            writer: &PlyWriter,
        };

        let result = SlicerPlyExport::default().execute(&ctx);
        assert_eq!(result.outcome, Outcome::Finished);
        assert!(result
            .reports
            .iter()
            .any(|r| r.level == ReportLevel::Warning && r.message.contains("Camera")));
        Ok(())
    }

    #[test]
    fn test_cancelled_on_missing_tmpdir() {
        let settings = Settings::with_tmpdir("/nonexistent/slicer/tmp");
        let scene = scene();
        let evaluator = SceneMeshEvaluator::new();
        let ctx = ExportContext {
            scene: &scene,
            settings: &settings,
            evaluator: &evaluator,
            writer: &PlyWriter,
        };

        for op in [&SlicerXmlExport as &dyn Operator, &SlicerPlyExport::default()] {
            let result = op.execute(&ctx);
            assert_eq!(result.outcome, Outcome::Cancelled);
            assert!(result
                .error_message()
                .is_some_and(|m| m.contains("Temp directory")));
        }
    }
}
