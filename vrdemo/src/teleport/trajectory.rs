use cgmath::{InnerSpace, Vector3};

/// Ordered control points of a teleport path, launch first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArcTrajectory {
    pub points: Vec<Vector3<f32>>,
}

impl ArcTrajectory {
    pub fn new(points: Vec<Vector3<f32>>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Get the arc length (useful for visual feedback)
    pub fn arc_length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).magnitude())
            .sum()
    }

    /// Get trajectory point at normalized position (0.0 to 1.0), by sample index
    pub fn point_at_normalized_position(&self, t: f32) -> Option<Vector3<f32>> {
        let last_index = self.points.len().checked_sub(1)?;
        if last_index == 0 {
            return self.points.first().copied();
        }

        let scaled = t.clamp(0.0, 1.0) * last_index as f32;
        let index = (scaled as usize).min(last_index);
        if index == last_index {
            return Some(self.points[last_index]);
        }

        let t_local = scaled - index as f32;
        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        Some(p1 + (p2 - p1) * t_local)
    }

    /// Pairs of consecutive points, ready for a line-list renderer.
    pub fn line_segments(&self) -> Vec<(Vector3<f32>, Vector3<f32>)> {
        self.points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    fn arc() -> ArcTrajectory {
        ArcTrajectory::new(vec![
            vec3(0.0, 0.0, 0.0),
            vec3(0.0, 3.0, -4.0),
            vec3(0.0, 3.0, -10.0),
        ])
    }

    #[test]
    fn test_arc_length() {
        assert!((arc().arc_length() - 11.0).abs() < 1e-5);
        assert_eq!(ArcTrajectory::default().arc_length(), 0.0);
    }

    #[test]
    fn test_normalized_position_interpolation() {
        let arc = arc();
        assert_eq!(arc.point_at_normalized_position(0.0), Some(vec3(0.0, 0.0, 0.0)));
        assert_eq!(arc.point_at_normalized_position(1.0), Some(vec3(0.0, 3.0, -10.0)));
        assert_eq!(arc.point_at_normalized_position(0.25), Some(vec3(0.0, 1.5, -2.0)));
        assert_eq!(arc.point_at_normalized_position(7.0), Some(vec3(0.0, 3.0, -10.0)));
        assert_eq!(ArcTrajectory::default().point_at_normalized_position(0.5), None);
    }

    #[test]
    fn test_line_segments_pair_neighbours() {
        let segments = arc().line_segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], (vec3(0.0, 3.0, -4.0), vec3(0.0, 3.0, -10.0)));
    }
}
