use cgmath::{InnerSpace, Vector2, Vector3, vec2};
use engine::comfort_log;

use crate::{config::ComfortConfig, screen::ScreenProjector, tracking::DevicePose};

pub const SCREEN_CENTER: Vector2<f32> = Vector2 { x: 0.5, y: 0.5 };

/// Peripheral "blinder" parameters, fed to the post-process material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComfortVignette {
    /// `None` when no radius curve is configured
    pub radius: Option<f32>,
    /// Normalized screen position (0..1 on both axes)
    pub center: Vector2<f32>,
}

impl Default for ComfortVignette {
    fn default() -> Self {
        Self {
            radius: None,
            center: SCREEN_CENTER,
        }
    }
}

/// Recompute the vignette from the character's current velocity.
pub fn update_vignette(
    velocity: Vector3<f32>,
    camera: &DevicePose,
    config: &ComfortConfig,
    screen: Option<&dyn ScreenProjector>,
) -> ComfortVignette {
    let speed = velocity.magnitude();
    let radius = config
        .radius_curve
        .as_ref()
        .and_then(|curve| curve.evaluate(speed));

    ComfortVignette {
        radius,
        center: blinder_center(velocity, camera, config, screen),
    }
}

/// World point the vignette should focus on while moving, or `None` when
/// standing still.
///
/// The point sits along the travel direction, ahead of the camera when the
/// player looks roughly the way they move and behind it otherwise, so the
/// focus stays put as the head turns.
pub fn probe_point(
    velocity: Vector3<f32>,
    camera: &DevicePose,
    config: &ComfortConfig,
) -> Option<Vector3<f32>> {
    if velocity.magnitude() <= config.stationary_speed {
        return None;
    }

    let direction = velocity.normalize();
    if camera.forward().dot(direction) > 0.0 {
        Some(camera.position + direction * config.probe_distance)
    } else {
        Some(camera.position - direction * config.probe_distance)
    }
}

pub fn blinder_center(
    velocity: Vector3<f32>,
    camera: &DevicePose,
    config: &ComfortConfig,
    screen: Option<&dyn ScreenProjector>,
) -> Vector2<f32> {
    let Some(probe) = probe_point(velocity, camera, config) else {
        return SCREEN_CENTER;
    };

    let Some(screen) = screen else {
        comfort_log!(TRACE, "no viewport to project onto, centering vignette");
        return SCREEN_CENTER;
    };

    let (width, height) = screen.viewport_size();
    if width == 0 || height == 0 {
        return SCREEN_CENTER;
    }

    match screen.world_to_screen(probe) {
        Some(pixel) => vec2(pixel.x / width as f32, pixel.y / height as f32),
        None => {
            comfort_log!(TRACE, "vignette probe {:?} did not project", probe);
            SCREEN_CENTER
        }
    }
}
