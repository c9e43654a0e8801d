use cgmath::{Quaternion, Rotation, Vector3, vec3};

/// Position and orientation of a tracked device (headset or controller).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DevicePose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl DevicePose {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vector3<f32>) -> Self {
        Self::new(position, Quaternion::new(1.0, 0.0, 0.0, 0.0))
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.rotation.rotate_vector(vec3(0.0, 0.0, -1.0))
    }

    pub fn right(&self) -> Vector3<f32> {
        self.rotation.rotate_vector(vec3(1.0, 0.0, 0.0))
    }

    /// Express this pose (given relative to `parent`) in the parent's space.
    pub fn relative_to(&self, parent_position: Vector3<f32>, parent_rotation: Quaternion<f32>) -> DevicePose {
        DevicePose {
            position: parent_position + parent_rotation.rotate_vector(self.position),
            rotation: parent_rotation * self.rotation,
        }
    }
}

impl Default for DevicePose {
    fn default() -> Self {
        DevicePose::at(vec3(0.0, 0.0, 0.0))
    }
}

/// Device poses reported by the tracking runtime for one frame, in
/// tracking-origin space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackingFrame {
    pub head: DevicePose,
    pub right_hand: Option<DevicePose>,
}
