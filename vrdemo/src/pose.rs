use cgmath::{Quaternion, Rotation, Vector3, vec3};

use crate::tracking::DevicePose;

/// World transform of the character's collision capsule.
///
/// `position` is the capsule centre, so the feet sit `capsule_half_height` below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterPose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub capsule_half_height: f32,
}

impl CharacterPose {
    pub fn new(position: Vector3<f32>, capsule_half_height: f32) -> Self {
        Self {
            position,
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            capsule_half_height,
        }
    }

    /// Place the capsule so its base rests on `floor_point`.
    pub fn standing_on(floor_point: Vector3<f32>, capsule_half_height: f32) -> Self {
        Self::new(floor_point + vec3(0.0, capsule_half_height, 0.0), capsule_half_height)
    }

    pub fn feet(&self) -> Vector3<f32> {
        self.position - vec3(0.0, self.capsule_half_height, 0.0)
    }

    /// Transform a pose reported in tracking space into world space, given the
    /// tracking origin's offset from the body.
    pub fn tracked_to_world(&self, vr_root: Vector3<f32>, local: &DevicePose) -> DevicePose {
        local.relative_to(self.position + self.rotation.rotate_vector(vr_root), self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_on_floor() {
        let pose = CharacterPose::standing_on(vec3(10.0, 0.0, 5.0), 96.0);
        assert_eq!(pose.position, vec3(10.0, 96.0, 5.0));
        assert_eq!(pose.feet(), vec3(10.0, 0.0, 5.0));
    }

    #[test]
    fn test_tracked_to_world_adds_root_offset() {
        let pose = CharacterPose::new(vec3(100.0, 96.0, 0.0), 96.0);
        let head = DevicePose::at(vec3(0.0, 170.0, 0.0));
        let world = pose.tracked_to_world(vec3(0.0, -96.0, 0.0), &head);
        assert_eq!(world.position, vec3(100.0, 170.0, 0.0));
    }
}
