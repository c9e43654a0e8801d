use std::time::Duration;

/// Frame timing handed to every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Time {
    pub elapsed: Duration,
    pub total: Duration,
}

impl Time {
    /// Advance by `dt` seconds. Negative or non-finite deltas count as zero.
    pub fn step(&self, dt: f32) -> Time {
        let elapsed = if dt.is_finite() && dt > 0.0 {
            Duration::from_secs_f32(dt)
        } else {
            Duration::ZERO
        };

        Time {
            elapsed,
            total: self.total + elapsed,
        }
    }

    pub fn delta_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_accumulates_total() {
        let time = Time::default().step(0.5).step(0.25);
        assert_eq!(time.elapsed, Duration::from_secs_f32(0.25));
        assert!((time.total.as_secs_f32() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_negative_step_is_clamped() {
        let time = Time::default().step(-1.0);
        assert_eq!(time.delta_seconds(), 0.0);
    }
}
