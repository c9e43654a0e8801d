use cgmath::{InnerSpace, Vector3, Zero, vec3};

use crate::{config::MovementConfig, pose::CharacterPose, tracking::DevicePose};

/// Smooth thumbstick locomotion: input is gathered during the frame and
/// consumed by [`CharacterMovement::integrate`] once per tick.
pub struct CharacterMovement {
    config: MovementConfig,
    pending_input: Vector3<f32>,
    velocity: Vector3<f32>,
}

impl CharacterMovement {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            pending_input: Vector3::zero(),
            velocity: Vector3::zero(),
        }
    }

    pub fn add_movement_input(&mut self, world_direction: Vector3<f32>, scale: f32) {
        if !scale.is_finite() || scale.abs() < self.config.dead_zone {
            return;
        }
        self.pending_input += world_direction * scale;
    }

    pub fn move_forward(&mut self, throttle: f32, camera: &DevicePose) {
        self.add_movement_input(camera.forward(), throttle);
    }

    pub fn move_right(&mut self, throttle: f32, camera: &DevicePose) {
        self.add_movement_input(camera.right(), throttle);
    }

    /// Apply this frame's input to `body` and reset it. Movement stays on the
    /// ground plane; input longer than one unit is clamped.
    pub fn integrate(&mut self, dt: f32, body: &mut CharacterPose) -> Vector3<f32> {
        let mut input = vec3(self.pending_input.x, 0.0, self.pending_input.z);
        self.pending_input = Vector3::zero();

        if input.magnitude2() > 1.0 {
            input = input.normalize();
        }

        self.velocity = input * self.config.max_walk_speed;
        if dt > 0.0 {
            body.position += self.velocity * dt;
        }
        self.velocity
    }

    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    /// Drop any gathered input and come to rest, e.g. after a teleport.
    pub fn stop(&mut self) {
        self.pending_input = Vector3::zero();
        self.velocity = Vector3::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement() -> CharacterMovement {
        CharacterMovement::new(MovementConfig {
            max_walk_speed: 600.0,
            dead_zone: 0.1,
        })
    }

    #[test]
    fn test_forward_throttle_moves_along_camera() {
        let mut movement = movement();
        let mut body = CharacterPose::new(vec3(0.0, 96.0, 0.0), 96.0);

        movement.move_forward(1.0, &DevicePose::default());
        movement.integrate(0.5, &mut body);

        assert_eq!(body.position, vec3(0.0, 96.0, -300.0));
        assert_eq!(movement.velocity(), vec3(0.0, 0.0, -600.0));
    }

    #[test]
    fn test_diagonal_input_is_clamped() {
        let mut movement = movement();
        let mut body = CharacterPose::new(vec3(0.0, 96.0, 0.0), 96.0);
        let camera = DevicePose::default();

        movement.move_forward(1.0, &camera);
        movement.move_right(1.0, &camera);
        let velocity = movement.integrate(1.0 / 90.0, &mut body);

        assert!((velocity.magnitude() - 600.0).abs() < 1e-2);
    }

    #[test]
    fn test_dead_zone_ignores_drift() {
        let mut movement = movement();
        let mut body = CharacterPose::new(vec3(0.0, 96.0, 0.0), 96.0);

        movement.move_forward(0.05, &DevicePose::default());
        movement.integrate(1.0, &mut body);

        assert_eq!(movement.velocity(), Vector3::zero());
        assert_eq!(body.position, vec3(0.0, 96.0, 0.0));
    }

    #[test]
    fn test_input_is_consumed_each_tick() {
        let mut movement = movement();
        let mut body = CharacterPose::new(vec3(0.0, 96.0, 0.0), 96.0);

        movement.move_forward(1.0, &DevicePose::default());
        movement.integrate(0.1, &mut body);
        movement.integrate(0.1, &mut body);

        assert_eq!(movement.velocity(), Vector3::zero());
    }
}
