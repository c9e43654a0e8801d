use cgmath::Vector3;

/// Position of a projectile `time` seconds after launch, using the kinematic equation.
pub fn position_at(
    origin: Vector3<f32>,
    initial_velocity: Vector3<f32>,
    gravity: Vector3<f32>,
    time: f32,
) -> Vector3<f32> {
    origin + initial_velocity * time + gravity * (0.5 * time * time)
}

/// Upper bound on trajectory segments per prediction.
pub const MAX_SAMPLES: usize = 1024;

/// Sample times from launch up to `horizon`, spaced `1 / frequency` apart.
/// The horizon itself is always the last sample. Past [`MAX_SAMPLES`]
/// segments the spacing widens to `horizon / MAX_SAMPLES`.
pub fn sample_times(horizon: f32, frequency: f32) -> Vec<f32> {
    if !horizon.is_finite() || horizon <= 0.0 {
        return vec![0.0];
    }

    let mut step = 1.0 / frequency.max(f32::EPSILON);
    let mut steps = (horizon / step).ceil().max(1.0);
    if !steps.is_finite() || steps > MAX_SAMPLES as f32 {
        steps = MAX_SAMPLES as f32;
        step = horizon / steps;
    }
    let steps = steps as usize;

    let mut times: Vec<f32> = (0..=steps)
        .map(|i| (i as f32 * step).min(horizon))
        .collect();
    times.dedup_by(|later, earlier| (*later - *earlier).abs() < 1.0e-6);
    if let Some(last) = times.last_mut() {
        *last = horizon;
    }
    times
}
