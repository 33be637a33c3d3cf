#![deny(unsafe_code)]
//! Scene registry: maps scene names to `SceneConfig`s.
//!
//! Each registered scene is one demo variant expressed as data against
//! the single parameterized pipeline:
//!
//! - `triangle` -- a static 2D triangle with colored corners
//! - `cube` -- a spinning cube with solid-colored faces
//! - `textured-cube` -- the spinning cube sampling a 2D texture
//! - `capture-cube` -- the spinning cube with the transform-feedback
//!   capture skeleton attached
//!
//! Both the CLI and the WASM bindings resolve scenes through this crate
//! so the defaults live in exactly one place. JSON parameters override
//! individual settings (`fov`, `spin_speed`, `clear_color`, `orbit`,
//! `pulse`).

use glam::Vec3;
use serde_json::Value;

use tricube_core::params::{param_bool, param_f32, param_rgba};
use tricube_core::transform::{Animation, Camera, Orbit, Projection, Pulse, Spin};
use tricube_core::{DemoError, Geometry, SceneConfig, ShadingMode};

/// All registered scene names.
const SCENE_NAMES: &[&str] = &["triangle", "cube", "textured-cube", "capture-cube"];

/// Enumeration of the registered scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Triangle,
    Cube,
    TexturedCube,
    CaptureCube,
}

impl SceneKind {
    /// Looks a scene up by registry name.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::UnknownScene` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, DemoError> {
        match name {
            "triangle" => Ok(SceneKind::Triangle),
            "cube" => Ok(SceneKind::Cube),
            "textured-cube" => Ok(SceneKind::TexturedCube),
            "capture-cube" => Ok(SceneKind::CaptureCube),
            _ => Err(DemoError::UnknownScene(name.to_string())),
        }
    }

    /// The registry name for this scene.
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Triangle => "triangle",
            SceneKind::Cube => "cube",
            SceneKind::TexturedCube => "textured-cube",
            SceneKind::CaptureCube => "capture-cube",
        }
    }

    /// Returns a slice of all recognized scene names.
    pub fn list_scenes() -> &'static [&'static str] {
        SCENE_NAMES
    }

    /// Resolves the scene to a full config for the given viewport aspect
    /// ratio, applying any JSON parameter overrides.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::InvalidParam` for a present-but-malformed
    /// parameter (e.g. a two-element `clear_color`).
    pub fn config(self, aspect: f32, params: &Value) -> Result<SceneConfig, DemoError> {
        let clear_color = param_rgba(params, "clear_color", [0.0, 0.0, 0.0, 1.0])?;
        let spin_speed = param_f32(params, "spin_speed", 1.0);

        let (geometry, shading, default_fov, eye, capture) = match self {
            SceneKind::Triangle => (
                Geometry::triangle(),
                ShadingMode::Flat,
                90.0,
                Vec3::new(0.0, 1.0, 3.0),
                false,
            ),
            SceneKind::Cube => (
                Geometry::cube(),
                ShadingMode::Flat,
                45.0,
                Vec3::new(0.0, 1.0, 5.0),
                false,
            ),
            SceneKind::TexturedCube => (
                Geometry::textured_cube(),
                ShadingMode::Textured,
                45.0,
                Vec3::new(0.0, 1.0, 5.0),
                false,
            ),
            SceneKind::CaptureCube => (
                Geometry::cube(),
                ShadingMode::Flat,
                45.0,
                Vec3::new(0.0, 1.0, 5.0),
                true,
            ),
        };

        let animation = match self {
            // The triangle never moves; everything else spins about Y
            // and the (1, 1, 0) diagonal.
            SceneKind::Triangle => Animation::still(),
            _ => {
                let mut animation = Animation {
                    spins: vec![
                        Spin {
                            axis: Vec3::Y,
                            speed: spin_speed,
                        },
                        Spin {
                            axis: Vec3::new(1.0, 1.0, 0.0),
                            speed: spin_speed,
                        },
                    ],
                    orbit: None,
                    pulse: None,
                };
                if param_bool(params, "orbit", false) {
                    animation.orbit = Some(Orbit {
                        amplitude: Vec3::new(1.5, 0.0, 0.0),
                        speed: spin_speed,
                    });
                }
                if param_bool(params, "pulse", false) {
                    animation.pulse = Some(Pulse {
                        min: 0.75,
                        max: 1.25,
                        speed: spin_speed,
                    });
                }
                animation
            }
        };

        Ok(SceneConfig {
            name: self.name().to_string(),
            geometry,
            shading,
            clear_color,
            camera: Camera::looking_at_origin(eye),
            projection: Projection {
                fov_y_degrees: param_f32(params, "fov", default_fov),
                aspect,
                z_near: 0.1,
                z_far: 100.0,
            },
            animation,
            capture,
        })
    }
}
