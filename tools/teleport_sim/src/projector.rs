use cgmath::{Deg, Matrix4, Rotation, Vector2, Vector3, perspective, vec2};
use vrdemo::{screen::ScreenProjector, tracking::DevicePose};

/// Pinhole camera standing in for the headset's eye buffer.
pub struct PerspectiveProjector {
    projection: Matrix4<f32>,
    view: Matrix4<f32>,
    width: u32,
    height: u32,
}

impl PerspectiveProjector {
    pub fn new(camera: &DevicePose, width: u32, height: u32, fov_degrees: f32) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let view = Matrix4::from(camera.rotation.invert())
            * Matrix4::from_translation(-camera.position);

        PerspectiveProjector {
            projection: perspective(Deg(fov_degrees), aspect, 1.0, 100_000.0),
            view,
            width,
            height,
        }
    }
}

impl ScreenProjector for PerspectiveProjector {
    fn world_to_screen(&self, point: Vector3<f32>) -> Option<Vector2<f32>> {
        let clip = self.projection * self.view * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(vec2(
            (ndc_x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc_y) * 0.5 * self.height as f32,
        ))
    }

    fn viewport_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    #[test]
    fn test_point_straight_ahead_is_centered() {
        let projector = PerspectiveProjector::new(&DevicePose::at(vec3(0.0, 170.0, 0.0)), 800, 600, 90.0);
        let pixel = projector
            .world_to_screen(vec3(0.0, 170.0, -100.0))
            .unwrap();

        assert!((pixel.x - 400.0).abs() < 1e-2);
        assert!((pixel.y - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_point_behind_is_rejected() {
        let projector = PerspectiveProjector::new(&DevicePose::at(vec3(0.0, 170.0, 0.0)), 800, 600, 90.0);
        assert_eq!(projector.world_to_screen(vec3(0.0, 170.0, 100.0)), None);
    }
}
