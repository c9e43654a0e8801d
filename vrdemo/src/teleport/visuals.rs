use cgmath::{Matrix4, Vector3, Zero, vec3};

use super::{ArcTrajectory, TeleportCandidate};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeleportVisualStyle {
    pub arc_color: Vector3<f32>,
    pub marker_color: Vector3<f32>,
    pub landing_scale: Vector3<f32>,
    pub landing_height_offset: f32,
}

impl Default for TeleportVisualStyle {
    fn default() -> Self {
        Self {
            arc_color: vec3(0.0, 0.8, 1.0),
            marker_color: vec3(0.1, 0.9, 1.0),
            landing_scale: vec3(60.0, 2.0, 60.0),
            landing_height_offset: 2.0,
        }
    }
}

/// The landing indicator shown under a valid destination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DestinationMarker {
    pub visible: bool,
    pub position: Vector3<f32>,
}

impl Default for DestinationMarker {
    fn default() -> Self {
        Self {
            visible: false,
            position: Vector3::zero(),
        }
    }
}

impl DestinationMarker {
    /// World transform for a flat marker mesh, lifted slightly off the floor.
    pub fn transform(&self, style: &TeleportVisualStyle) -> Matrix4<f32> {
        let translation = Matrix4::from_translation(
            self.position + vec3(0.0, style.landing_height_offset, 0.0),
        );
        let scale = Matrix4::from_nonuniform_scale(
            style.landing_scale.x,
            style.landing_scale.y,
            style.landing_scale.z,
        );
        translation * scale
    }
}

/// Marker and path curve driven by the latest [`TeleportCandidate`].
#[derive(Clone, Debug, Default)]
pub struct TeleportVisuals {
    pub marker: DestinationMarker,
    pub path_curve: ArcTrajectory,
    pub style: TeleportVisualStyle,
}

impl TeleportVisuals {
    pub fn new(style: TeleportVisualStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Show the marker and curve for a valid candidate; hide both otherwise.
    ///
    /// A hidden marker keeps its last position, only `visible` changes.
    pub fn apply(&mut self, candidate: &TeleportCandidate) {
        match candidate.valid_destination() {
            Some(destination) => {
                self.marker.visible = true;
                self.marker.position = destination;
                self.path_curve.points.clone_from(&candidate.path);
            }
            None => {
                self.marker.visible = false;
                self.path_curve.clear();
            }
        }
    }

    pub fn hide(&mut self) {
        self.marker.visible = false;
        self.path_curve.clear();
    }

    pub fn marker_transform(&self) -> Option<Matrix4<f32>> {
        self.marker
            .visible
            .then(|| self.marker.transform(&self.style))
    }

    /// Line-list vertices for the path curve.
    pub fn arc_lines(&self) -> Vec<(Vector3<f32>, Vector3<f32>)> {
        self.path_curve.line_segments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teleport::TargetFailure;
    use cgmath::{Transform, point3};

    fn valid_candidate() -> TeleportCandidate {
        TeleportCandidate::valid(
            vec3(0.0, 0.0, -300.0),
            vec![vec3(0.0, 120.0, 0.0), vec3(0.0, 80.0, -150.0), vec3(0.0, 10.0, -300.0)],
        )
    }

    #[test]
    fn test_new_visuals_start_hidden() {
        let visuals = TeleportVisuals::new(TeleportVisualStyle::default());

        assert_eq!(visuals.marker, DestinationMarker::default());
        assert!(!visuals.marker.visible);
        assert_eq!(visuals.marker.position, vec3(0.0, 0.0, 0.0));
        assert!(visuals.path_curve.is_empty());
        assert_eq!(visuals.marker_transform(), None);
    }

    #[test]
    fn test_valid_candidate_shows_marker_and_curve() {
        let mut visuals = TeleportVisuals::default();
        visuals.apply(&valid_candidate());

        assert!(visuals.marker.visible);
        assert_eq!(visuals.marker.position, vec3(0.0, 0.0, -300.0));
        assert_eq!(visuals.path_curve.points.len(), 3);
        assert_eq!(visuals.arc_lines().len(), 2);
    }

    #[test]
    fn test_invalid_candidate_hides_everything() {
        let mut visuals = TeleportVisuals::default();
        visuals.apply(&valid_candidate());

        let miss = TeleportCandidate::invalid(TargetFailure::NoHit, valid_candidate().path);
        visuals.apply(&miss);

        assert!(!visuals.marker.visible);
        assert!(visuals.path_curve.is_empty());
        assert!(visuals.marker_transform().is_none());
    }

    #[test]
    fn test_marker_transform_lifts_off_floor() {
        let mut visuals = TeleportVisuals::default();
        visuals.apply(&valid_candidate());

        let transform = visuals.marker_transform().unwrap();
        let centre = transform.transform_point(point3(0.0, 0.0, 0.0));
        assert_eq!(centre, point3(0.0, 2.0, -300.0));
    }
}
