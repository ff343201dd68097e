//! Camera state shared with the web frontend.
//!
//! These types avoid platform APIs; the frontend feeds them the viewport size
//! it observes and reads back matrices for the renderer.

use crate::constants::{CAMERA_FAR, CAMERA_NEAR, MOBILE_MAX_WIDTH, TABLET_MAX_WIDTH};
use glam::{Mat4, Vec3};

/// Host viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

/// Camera band selected from the viewport width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraProfile {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl CameraProfile {
    pub fn for_width(width: f32) -> Self {
        if width < MOBILE_MAX_WIDTH {
            CameraProfile::Mobile
        } else if width < TABLET_MAX_WIDTH {
            CameraProfile::Tablet
        } else {
            CameraProfile::Desktop
        }
    }

    /// Vertical field of view in degrees. Narrow screens get a wider lens.
    pub fn fov_degrees(self) -> f32 {
        match self {
            CameraProfile::Mobile => 35.0,
            CameraProfile::Tablet => 32.0,
            CameraProfile::Desktop => 30.5,
        }
    }

    /// Camera distance from the cylinder axis along +Z.
    pub fn distance(self) -> f32 {
        match self {
            CameraProfile::Mobile => 13.0,
            CameraProfile::Tablet => 14.0,
            CameraProfile::Desktop => 15.0,
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub profile: CameraProfile,
}

impl Camera {
    pub fn for_viewport(viewport: Viewport) -> Self {
        let profile = CameraProfile::for_width(viewport.width);
        Self {
            eye: Vec3::new(0.0, 0.0, profile.distance()),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: profile.fov_degrees().to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            profile,
        }
    }

    /// Re-derive profile, field of view, distance and aspect after a resize.
    pub fn resize(&mut self, viewport: Viewport) {
        let profile = CameraProfile::for_width(viewport.width);
        self.profile = profile;
        self.fovy_radians = profile.fov_degrees().to_radians();
        self.eye.z = profile.distance();
        self.aspect = viewport.aspect();
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
