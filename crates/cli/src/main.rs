#![deny(unsafe_code)]
//! CLI binary for the tricube demo renderer.
//!
//! Subcommands:
//! - `list` — print registered scene names
//! - `describe <scene>` — print the resolved scene configuration
//! - `matrix <scene>` — dump the MVP matrix for a timestamp
//!
//! `matrix` exists to debug the determinism of the transform pipeline:
//! the same scene, params, aspect, and time must always print the same
//! sixteen values.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use serde_json::Value;
use std::process;
use tricube_core::{SceneConfig, ShadingMode, TransformPipeline};
use tricube_scenes::SceneKind;

#[derive(Parser)]
#[command(name = "tricube", about = "Inspect tricube demo scenes")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered scene names.
    List,
    /// Print the resolved configuration of a scene.
    Describe {
        /// Scene name (e.g. "cube").
        scene: String,

        /// Viewport aspect ratio used to resolve the projection.
        #[arg(short, long, default_value_t = 1.0)]
        aspect: f32,

        /// Scene parameters as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Dump the model-view-projection matrix for a timestamp.
    Matrix {
        /// Scene name (e.g. "cube").
        scene: String,

        /// Timestamp in seconds.
        #[arg(short, long, default_value_t = 0.0)]
        time: f64,

        /// Viewport aspect ratio used to resolve the projection.
        #[arg(short, long, default_value_t = 1.0)]
        aspect: f32,

        /// Scene parameters as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn parse_params(raw: &str) -> Result<Value, CliError> {
    serde_json::from_str(raw).map_err(|err| CliError::Input(format!("--params is not JSON: {err}")))
}

fn resolve(scene: &str, aspect: f32, raw_params: &str) -> Result<SceneConfig, CliError> {
    let params = parse_params(raw_params)?;
    Ok(SceneKind::from_name(scene)?.config(aspect, &params)?)
}

fn describe_value(config: &SceneConfig) -> Value {
    serde_json::json!({
        "name": config.name,
        "shading": config.shading,
        "vertices": config.geometry.vertex_count(),
        "triangles": config.geometry.triangle_count(),
        "capture": config.capture,
        "clear_color": config.clear_color,
        "eye": config.camera.eye.to_array(),
        "fov_y_degrees": config.projection.fov_y_degrees,
        "aspect": config.projection.aspect,
        "animated": !config.animation.is_still(),
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let scenes = SceneKind::list_scenes();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({ "scenes": scenes }))?
                );
            } else {
                println!("Scenes:");
                for name in scenes {
                    println!("  {name}");
                }
            }
        }
        Command::Describe {
            scene,
            aspect,
            params,
        } => {
            let config = resolve(&scene, aspect, &params)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&describe_value(&config))?);
            } else {
                println!("{}:", config.name);
                println!(
                    "  shading: {}",
                    match config.shading {
                        ShadingMode::Flat => "flat",
                        ShadingMode::Textured => "textured",
                    }
                );
                println!(
                    "  geometry: {} vertices, {} triangles",
                    config.geometry.vertex_count(),
                    config.geometry.triangle_count()
                );
                println!("  capture: {}", config.capture);
                println!("  fov: {} deg, aspect {}", config.projection.fov_y_degrees, aspect);
                println!("  animated: {}", !config.animation.is_still());
            }
        }
        Command::Matrix {
            scene,
            time,
            aspect,
            params,
        } => {
            let config = resolve(&scene, aspect, &params)?;
            let pipeline = TransformPipeline::new(&config.camera, &config.projection);
            let mvp = pipeline.mvp(config.animation.model_matrix(time as f32));
            let cols = mvp.to_cols_array();

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "scene": config.name,
                        "time": time,
                        "column_major": cols,
                    }))?
                );
            } else {
                // Print rows; storage is column-major.
                for row in 0..4 {
                    println!(
                        "{:>12.6} {:>12.6} {:>12.6} {:>12.6}",
                        cols[row],
                        cols[4 + row],
                        cols[8 + row],
                        cols[12 + row]
                    );
                }
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        process::exit(err.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_params_accepts_an_object() {
        let value = parse_params(r#"{"fov": 60.0}"#).unwrap();
        assert_eq!(value["fov"], 60.0);
    }

    #[test]
    fn parse_params_rejects_invalid_json() {
        let result = parse_params("{fov: 60}");
        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn resolve_rejects_unknown_scene_with_scene_error() {
        let result = resolve("teapot", 1.0, "{}");
        assert!(matches!(result, Err(CliError::Scene(_))));
    }

    #[test]
    fn describe_value_reports_cube_shape() {
        let config = resolve("cube", 1.0, "{}").unwrap();
        let value = describe_value(&config);
        assert_eq!(value["vertices"], 24);
        assert_eq!(value["triangles"], 12);
        assert_eq!(value["shading"], "flat");
    }

    #[test]
    fn matrix_output_is_deterministic_for_a_timestamp() {
        let config = resolve("cube", 1.0, "{}").unwrap();
        let pipeline = TransformPipeline::new(&config.camera, &config.projection);
        let a = pipeline.mvp(config.animation.model_matrix(2.5)).to_cols_array();
        let b = pipeline.mvp(config.animation.model_matrix(2.5)).to_cols_array();
        assert_eq!(a, b);
    }
}
