//! The single parameterized scene configuration that replaces a family
//! of copy-pasted demo entry points.
//!
//! A `SceneConfig` captures everything a render pipeline needs at build
//! time: geometry, shading mode, clear color, camera, projection, and
//! the per-frame animation. After setup it is read-only; the render
//! loop derives each frame purely from the timestamp.

use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::transform::{Animation, Camera, Projection};

/// How fragments get their color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Interpolated vertex colors only.
    Flat,
    /// Vertex colors modulated by a sampled 2D texture.
    Textured,
}

/// Build-time description of one renderable scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Registry name, e.g. "cube".
    pub name: String,
    pub geometry: Geometry,
    pub shading: ShadingMode,
    /// RGBA clear color applied at the start of every frame.
    pub clear_color: [f32; 4],
    pub camera: Camera,
    pub projection: Projection,
    pub animation: Animation,
    /// Whether to attach the transform-feedback capture skeleton.
    pub capture: bool,
}

impl SceneConfig {
    /// Returns true if the pipeline must create a texture for this scene.
    pub fn needs_texture(&self) -> bool {
        self.shading == ShadingMode::Textured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Projection;
    use glam::Vec3;

    fn config(shading: ShadingMode) -> SceneConfig {
        SceneConfig {
            name: "test".into(),
            geometry: Geometry::triangle(),
            shading,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            camera: Camera::looking_at_origin(Vec3::new(0.0, 1.0, 3.0)),
            projection: Projection {
                fov_y_degrees: 90.0,
                aspect: 1.0,
                z_near: 0.1,
                z_far: 100.0,
            },
            animation: Animation::still(),
            capture: false,
        }
    }

    #[test]
    fn flat_scene_does_not_need_texture() {
        assert!(!config(ShadingMode::Flat).needs_texture());
    }

    #[test]
    fn textured_scene_needs_texture() {
        assert!(config(ShadingMode::Textured).needs_texture());
    }

    #[test]
    fn shading_mode_serializes_snake_case() {
        let json = serde_json::to_string(&ShadingMode::Textured).unwrap();
        assert_eq!(json, "\"textured\"");
        let back: ShadingMode = serde_json::from_str("\"flat\"").unwrap();
        assert_eq!(back, ShadingMode::Flat);
    }
}
