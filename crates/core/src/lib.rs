#![deny(unsafe_code)]
//! Core types for the tricube demo renderer.
//!
//! Provides the transform pipeline (camera, projection, per-frame model
//! animation, MVP composition), validated CPU-side `Geometry`, the
//! parameterized `SceneConfig` that replaces per-sample entry points,
//! and JSON parameter helpers.
//!
//! GPU-facing code (shader building, mesh upload, textures, transform
//! feedback) lives in [`render`] behind the `render` feature.

pub mod error;
pub mod geometry;
pub mod params;
pub mod scene;
pub mod transform;

#[cfg(feature = "render")]
pub mod render;

pub use error::DemoError;
pub use geometry::Geometry;
pub use scene::{SceneConfig, ShadingMode};
pub use transform::{Animation, Camera, Orbit, Projection, Pulse, Spin, TransformPipeline};
