//! Room-scale recentering.
//!
//! The player walks around their room, so the tracked head drifts away from
//! the capsule. Every tick the capsule is pulled horizontally under the head
//! and the tracking origin is pushed back by the same amount, which leaves the
//! head (and hands) exactly where tracking put them.

use cgmath::{Rotation, Vector3};
use engine::locomotion_log;

use crate::pose::CharacterPose;

/// Horizontal offset from the body to the head.
pub fn recenter_offset(head_position: Vector3<f32>, body_position: Vector3<f32>) -> Vector3<f32> {
    let mut offset = head_position - body_position;
    offset.y = 0.0;
    offset
}

/// Move `body` under `head_position` on the ground plane and compensate the
/// tracking origin (`vr_root`, body-local). Returns the world offset applied.
pub fn recenter(
    head_position: Vector3<f32>,
    body: &mut CharacterPose,
    vr_root: &mut Vector3<f32>,
) -> Vector3<f32> {
    let offset = recenter_offset(head_position, body.position);

    body.position += offset;
    *vr_root -= body.rotation.invert().rotate_vector(offset);

    locomotion_log!(TRACE, "recentered body by {:?}", offset);
    offset
}
