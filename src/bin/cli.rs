// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! slicer-bridge CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slicer_bridge::cli::Reporter;
use slicer_bridge::config::SETTINGS_FILE_NAME;
use slicer_bridge::export::SCENE_XML_FILE_NAME;
use slicer_bridge::io::{self, PlyFormat, PlyWriter};
use slicer_bridge::{
    load_scene_manifest, ExportContext, ExportError, ObjectNaming, Operator, Outcome,
    SceneMeshEvaluator, Settings, SettingsResolver, SlicerPlyExport, SlicerXmlExport,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "slicer-bridge")]
#[command(about = "Export scene transforms, materials and meshes for Slicer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (otherwise searched upwards from the scene directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export object names, transforms and materials to blend_to_slicer.xml
    ExportXml {
        /// Scene manifest (JSON)
        scene: PathBuf,
    },

    /// Export selected objects' meshes to one PLY file each
    ExportPly {
        /// Scene manifest (JSON)
        scene: PathBuf,

        /// Replace '.' and path separators with '_' in file names
        #[arg(long)]
        sanitize_names: bool,

        /// Write binary little-endian PLY instead of the configured format
        #[arg(long)]
        binary: bool,

        /// Overwrite existing files (accepted for compatibility; files are always replaced)
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true, value_name = "BOOL")]
        overwrite: bool,
    },

    /// Run both exports
    ExportAll {
        /// Scene manifest (JSON)
        scene: PathBuf,

        /// Replace '.' and path separators with '_' in file names
        #[arg(long)]
        sanitize_names: bool,

        /// Write binary little-endian PLY instead of the configured format
        #[arg(long)]
        binary: bool,
    },

    /// Summarize an exchange XML file
    Inspect {
        /// Exchange file (defaults to the one in the configured temp directory)
        file: Option<PathBuf>,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a settings file
    Init {
        /// Exchange directory shared with Slicer
        #[arg(long)]
        tmpdir: Option<PathBuf>,

        /// Indent the scene XML
        #[arg(long)]
        pretty_xml: bool,

        /// Create the exchange directory if missing
        #[arg(long)]
        create: bool,

        /// Replace an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved settings
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(Outcome::Finished) => ExitCode::SUCCESS,
        Ok(Outcome::Cancelled) => ExitCode::from(1),
        Err(e) => match e.downcast_ref::<ExportError>() {
            Some(export_error) if export_error.is_resolution() => {
                Reporter::report_fatal(&format!("{:#}", e));
                ExitCode::from(2)
            }
            _ => {
                eprintln!("Error: {:#}", e);
                ExitCode::from(1)
            }
        },
    }
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(cli: &Cli) -> Result<Outcome> {
    match &cli.command {
        Commands::ExportXml { scene } => {
            let settings = resolve_settings(cli, Some(scene.as_path()))?;
            run_operators(scene, &settings, &[&SlicerXmlExport])
        }
        Commands::ExportPly {
            scene,
            sanitize_names,
            binary,
            overwrite,
        } => {
            let settings = ply_format(resolve_settings(cli, Some(scene.as_path()))?, *binary);
            let op = SlicerPlyExport {
                overwrite: *overwrite,
                naming: naming(*sanitize_names),
            };
            run_operators(scene, &settings, &[&op])
        }
        Commands::ExportAll {
            scene,
            sanitize_names,
            binary,
        } => {
            let settings = ply_format(resolve_settings(cli, Some(scene.as_path()))?, *binary);
            let ply = SlicerPlyExport {
                naming: naming(*sanitize_names),
                ..Default::default()
            };
            run_operators(scene, &settings, &[&SlicerXmlExport, &ply])
        }
        Commands::Inspect { file } => {
            let path = match file {
                Some(path) => path.clone(),
                None => {
                    let settings = resolve_settings(cli, None)?;
                    settings.temp_dir()?.join(SCENE_XML_FILE_NAME)
                }
            };
            let objects = io::read_scene_xml(&path)
                .with_context(|| format!("Failed to read exchange file: {}", path.display()))?;
            Reporter::report_exchange(&path.display().to_string(), &objects);
            Ok(Outcome::Finished)
        }
        Commands::Config { action } => config_command(cli, action),
        Commands::Version => {
            println!("slicer-bridge v{}", env!("CARGO_PKG_VERSION"));
            Ok(Outcome::Finished)
        }
    }
}

fn naming(sanitize: bool) -> ObjectNaming {
    if sanitize {
        ObjectNaming::Sanitize
    } else {
        ObjectNaming::Preserve
    }
}

fn ply_format(mut settings: Settings, binary: bool) -> Settings {
    if binary {
        settings.ply_format = PlyFormat::BinaryLittleEndian;
    }
    settings
}

fn resolve_settings(cli: &Cli, scene: Option<&Path>) -> Result<Settings> {
    let mut resolver = SettingsResolver::new();
    if let Some(path) = &cli.config {
        resolver = resolver.explicit(path);
    }
    if let Some(dir) = scene.and_then(Path::parent).filter(|d| !d.as_os_str().is_empty()) {
        resolver = resolver.start_dir(dir);
    }
    Ok(resolver.resolve()?)
}

fn run_operators(scene_path: &Path, settings: &Settings, ops: &[&dyn Operator]) -> Result<Outcome> {
    let scene = load_scene_manifest(scene_path)
        .with_context(|| format!("Failed to load scene manifest: {}", scene_path.display()))?;
    let evaluator = SceneMeshEvaluator::with_base_dir(
        scene_path.parent().unwrap_or_else(|| Path::new(".")),
    );
    let ctx = ExportContext {
        scene: &scene,
        settings,
        evaluator: &evaluator,
        writer: &PlyWriter,
    };

    for op in ops {
        let start = Instant::now();
        let result = op.execute(&ctx);
        Reporter::report_operator(*op, &result, start.elapsed());
        if result.outcome == Outcome::Cancelled {
            return Ok(Outcome::Cancelled);
        }
    }
    Ok(Outcome::Finished)
}

fn config_command(cli: &Cli, action: &ConfigAction) -> Result<Outcome> {
    match action {
        ConfigAction::Init {
            tmpdir,
            pretty_xml,
            create,
            force,
        } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME));
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to replace it)", path.display());
            }

            let mut settings = Settings {
                pretty_xml: *pretty_xml,
                ..Default::default()
            };
            if let Some(dir) = tmpdir {
                settings.tmpdir = dir.clone();
            }
            if *create {
                let dir = match path.parent() {
                    Some(parent) if settings.tmpdir.is_relative() => parent.join(&settings.tmpdir),
                    _ => settings.tmpdir.clone(),
                };
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }

            settings.save(&path)?;
            println!("Wrote {}", path.display());
            Ok(Outcome::Finished)
        }
        ConfigAction::Show => {
            let settings = resolve_settings(cli, None)?;
            print!("{}", toml::to_string_pretty(&settings)?);
            if let Err(e) = settings.temp_dir() {
                log::warn!("{}", e);
            }
            Ok(Outcome::Finished)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_flag_on_both_ply_commands() {
        for command in ["export-ply", "export-all"] {
            let cli = Cli::try_parse_from(["slicer-bridge", command, "scene.json", "--binary"])
                .expect("arguments parse");
            let binary = match cli.command {
                Commands::ExportPly { binary, .. } | Commands::ExportAll { binary, .. } => binary,
                _ => panic!("unexpected command for {}", command),
            };
            assert!(binary);
            let settings = ply_format(Settings::default(), binary);
            assert_eq!(settings.ply_format, PlyFormat::BinaryLittleEndian);
        }
    }

    #[test]
    fn test_configured_format_kept_without_flag() {
        let settings = ply_format(Settings::default(), false);
        assert_eq!(settings.ply_format, PlyFormat::Ascii);
    }
}
