//! The transform pipeline: camera, projection, per-frame model animation,
//! and MVP composition.
//!
//! Everything here is pure math over `glam` types. The view-projection
//! product is computed once at setup; the model matrix is rebuilt from
//! identity on every frame from the timestamp alone, so no matrix ever
//! accumulates drift across frames.

use glam::{Mat4, Vec3};

/// A look-at camera defined by eye position, target point, and up vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Creates a camera looking at the origin with +Y up.
    pub fn looking_at_origin(eye: Vec3) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    /// Returns the right-handed view matrix for this camera.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// A perspective projection described by vertical field of view (degrees),
/// aspect ratio, and near/far clip distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Projection {
    /// Returns the projection matrix using GL clip-space conventions
    /// (z in [-1, 1]), matching WebGL.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.z_near,
            self.z_far,
        )
    }
}

/// A continuous rotation about a fixed axis at `speed` radians per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub axis: Vec3,
    pub speed: f32,
}

/// A periodic translation: `amplitude * sin(speed * t)` per component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub amplitude: Vec3,
    pub speed: f32,
}

/// A periodic uniform scale oscillating between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub min: f32,
    pub max: f32,
    pub speed: f32,
}

/// Per-frame model animation. The model matrix is a pure function of the
/// timestamp: translate (orbit), then each spin rotation in order, then
/// scale (pulse), all applied to a fresh identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
    pub spins: Vec<Spin>,
    pub orbit: Option<Orbit>,
    pub pulse: Option<Pulse>,
}

impl Animation {
    /// An animation that leaves the model at identity forever.
    pub fn still() -> Self {
        Self::default()
    }

    /// Returns true if this animation never changes the model matrix.
    pub fn is_still(&self) -> bool {
        self.spins.is_empty() && self.orbit.is_none() && self.pulse.is_none()
    }

    /// Computes the model matrix for time `t` (seconds).
    ///
    /// Rebuilt from identity on every call; calling twice with the same
    /// `t` yields the same matrix. A spin with a zero-length axis is
    /// skipped rather than producing NaNs.
    pub fn model_matrix(&self, t: f32) -> Mat4 {
        let mut model = Mat4::IDENTITY;

        if let Some(orbit) = &self.orbit {
            let offset = orbit.amplitude * (orbit.speed * t).sin();
            model *= Mat4::from_translation(offset);
        }

        for spin in &self.spins {
            let axis = spin.axis.normalize_or_zero();
            if axis != Vec3::ZERO {
                model *= Mat4::from_axis_angle(axis, spin.speed * t);
            }
        }

        if let Some(pulse) = &self.pulse {
            let phase = 0.5 + 0.5 * (pulse.speed * t).sin();
            let scale = pulse.min + (pulse.max - pulse.min) * phase;
            model *= Mat4::from_scale(Vec3::splat(scale));
        }

        model
    }
}

/// Holds the constant view-projection product and composes it with a
/// per-object model matrix into one MVP per draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformPipeline {
    view_projection: Mat4,
}

impl TransformPipeline {
    /// Builds the pipeline from a camera and projection. The product is
    /// computed once here and reused every frame.
    pub fn new(camera: &Camera, projection: &Projection) -> Self {
        Self {
            view_projection: projection.matrix() * camera.view_matrix(),
        }
    }

    /// Returns the cached view-projection matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// Composes the cached view-projection with a model matrix.
    pub fn mvp(&self, model: Mat4) -> Mat4 {
        self.view_projection * model
    }
}
