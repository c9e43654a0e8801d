use cgmath::{InnerSpace, Vector3, Zero};
use engine::teleport_log;

use crate::{
    config::{TargetingMode, TeleportConfig},
    navigation::{NavigableSurface, within_extent},
    physics::{CollisionGateway, ProjectileQuery},
    tracking::DevicePose,
};

/// Why a frame produced no usable destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetFailure {
    /// Nothing was hit within range or the simulation horizon
    NoHit,
    /// Something was hit, but it isn't (close enough to) walkable ground
    OffNavMesh,
}

/// This frame's teleport prediction. Rebuilt every tick.
///
/// When `is_valid` is false the destination and path must not be used; the
/// path is still filled in for a parabolic miss so it can be inspected.
#[derive(Clone, Debug, PartialEq)]
pub struct TeleportCandidate {
    pub is_valid: bool,
    pub destination: Vector3<f32>,
    pub path: Vec<Vector3<f32>>,
    pub failure: Option<TargetFailure>,
}

impl TeleportCandidate {
    pub fn valid(destination: Vector3<f32>, path: Vec<Vector3<f32>>) -> Self {
        Self {
            is_valid: true,
            destination,
            path,
            failure: None,
        }
    }

    pub fn invalid(failure: TargetFailure, path: Vec<Vector3<f32>>) -> Self {
        Self {
            is_valid: false,
            destination: Vector3::zero(),
            path,
            failure: Some(failure),
        }
    }

    pub fn valid_destination(&self) -> Option<Vector3<f32>> {
        self.is_valid.then_some(self.destination)
    }
}

impl Default for TeleportCandidate {
    fn default() -> Self {
        TeleportCandidate::invalid(TargetFailure::NoHit, Vec::new())
    }
}

/// Predict where a teleport aimed from `aim` would land, using whichever
/// targeting mode `config` selects.
pub fn compute_teleport_candidate(
    aim: &DevicePose,
    config: &TeleportConfig,
    collision: &dyn CollisionGateway,
    navigation: &dyn NavigableSurface,
) -> TeleportCandidate {
    let candidate = match config.mode {
        TargetingMode::Ray => ray_candidate(aim, config, collision, navigation),
        TargetingMode::Parabolic => parabolic_candidate(aim, config, collision, navigation),
    };

    if let Some(failure) = candidate.failure {
        teleport_log!(TRACE, "no teleport destination: {:?}", failure);
    }
    candidate
}

/// Straight trace along the aim direction. The path stays empty; a straight
/// pointer is implied.
pub fn ray_candidate(
    aim: &DevicePose,
    config: &TeleportConfig,
    collision: &dyn CollisionGateway,
    navigation: &dyn NavigableSurface,
) -> TeleportCandidate {
    let Some(hit) = collision.cast_ray(aim.position, aim.forward(), config.max_distance) else {
        return TeleportCandidate::invalid(TargetFailure::NoHit, Vec::new());
    };

    match snap_to_navigable(hit.point, config.projection_extent, navigation) {
        Some(destination) => TeleportCandidate::valid(destination, Vec::new()),
        None => TeleportCandidate::invalid(TargetFailure::OffNavMesh, Vec::new()),
    }
}

/// Launch a simulated projectile from the aim pose and land it on the nav mesh.
pub fn parabolic_candidate(
    aim: &DevicePose,
    config: &TeleportConfig,
    collision: &dyn CollisionGateway,
    navigation: &dyn NavigableSurface,
) -> TeleportCandidate {
    let direction = aim.forward();
    if direction.magnitude2() <= f32::EPSILON {
        return TeleportCandidate::invalid(TargetFailure::NoHit, Vec::new());
    }

    let query = ProjectileQuery {
        origin: aim.position,
        initial_velocity: direction.normalize() * config.projectile_speed,
        horizon_time: config.simulation_time,
        sweep_radius: config.projectile_radius,
        sim_frequency: config.sim_frequency,
        exclude_self: true,
    };
    let prediction = collision.predict_projectile_path(&query);

    let Some(hit) = prediction.hit else {
        return TeleportCandidate::invalid(TargetFailure::NoHit, prediction.points);
    };

    match snap_to_navigable(hit.point, config.projection_extent, navigation) {
        Some(destination) => TeleportCandidate::valid(destination, prediction.points),
        None => TeleportCandidate::invalid(TargetFailure::OffNavMesh, prediction.points),
    }
}

/// Project a hit onto walkable ground. The result is rejected when it moved
/// the hit further than `extent` on any axis, whatever the nav query claims.
fn snap_to_navigable(
    hit_point: Vector3<f32>,
    extent: Vector3<f32>,
    navigation: &dyn NavigableSurface,
) -> Option<Vector3<f32>> {
    let projected = navigation.project_point(hit_point, extent)?;
    if !within_extent(projected - hit_point, extent) {
        teleport_log!(
            DEBUG,
            "nav projection {:?} strayed too far from hit {:?}",
            projected,
            hit_point
        );
        return None;
    }
    Some(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{ProjectilePath, SurfaceHit};
    use cgmath::{Deg, Quaternion, Rotation3, vec3};
    use std::cell::RefCell;

    /// Collision stub that reports fixed answers and remembers the last query.
    struct StubCollision {
        ray_hit: Option<SurfaceHit>,
        projectile: ProjectilePath,
        last_query: RefCell<Option<ProjectileQuery>>,
        last_ray: RefCell<Option<(Vector3<f32>, Vector3<f32>, f32)>>,
    }

    impl StubCollision {
        fn new(ray_hit: Option<SurfaceHit>, projectile: ProjectilePath) -> Self {
            Self {
                ray_hit,
                projectile,
                last_query: RefCell::new(None),
                last_ray: RefCell::new(None),
            }
        }
    }

    impl CollisionGateway for StubCollision {
        fn cast_ray(
            &self,
            origin: Vector3<f32>,
            direction: Vector3<f32>,
            max_distance: f32,
        ) -> Option<SurfaceHit> {
            *self.last_ray.borrow_mut() = Some((origin, direction, max_distance));
            self.ray_hit
        }

        fn predict_projectile_path(&self, query: &ProjectileQuery) -> ProjectilePath {
            *self.last_query.borrow_mut() = Some(*query);
            self.projectile.clone()
        }
    }

    /// Nav stub that always answers with the same point (or nothing).
    struct StubNav(Option<Vector3<f32>>);

    impl NavigableSurface for StubNav {
        fn project_point(&self, _point: Vector3<f32>, _extent: Vector3<f32>) -> Option<Vector3<f32>> {
            self.0
        }
    }

    fn hit_at(point: Vector3<f32>) -> SurfaceHit {
        SurfaceHit {
            point,
            normal: vec3(0.0, 1.0, 0.0),
        }
    }

    fn ray_config() -> TeleportConfig {
        TeleportConfig {
            mode: TargetingMode::Ray,
            ..Default::default()
        }
    }

    fn hand() -> DevicePose {
        DevicePose::at(vec3(0.0, 120.0, 0.0))
    }

    #[test]
    fn test_ray_destination_is_projected_point() {
        let collision = StubCollision::new(Some(hit_at(vec3(0.0, 3.0, -400.0))), ProjectilePath::default());
        let nav = StubNav(Some(vec3(0.0, 0.0, -400.0)));

        let candidate = compute_teleport_candidate(&hand(), &ray_config(), &collision, &nav);

        assert!(candidate.is_valid);
        assert_eq!(candidate.destination, vec3(0.0, 0.0, -400.0));
        assert!(candidate.path.is_empty());
    }

    #[test]
    fn test_ray_uses_aim_and_max_distance() {
        let collision = StubCollision::new(None, ProjectilePath::default());
        let nav = StubNav(None);
        let aim = DevicePose::new(vec3(5.0, 120.0, 0.0), Quaternion::from_angle_y(Deg(90.0)));

        compute_teleport_candidate(&aim, &ray_config(), &collision, &nav);

        let (origin, direction, max_distance) = collision.last_ray.borrow().unwrap();
        assert_eq!(origin, vec3(5.0, 120.0, 0.0));
        assert!((direction - vec3(-1.0, 0.0, 0.0)).magnitude() < 1e-5);
        assert_eq!(max_distance, 1000.0);
    }

    #[test]
    fn test_ray_miss_is_invalid() {
        let collision = StubCollision::new(None, ProjectilePath::default());
        let nav = StubNav(Some(vec3(0.0, 0.0, 0.0)));

        let candidate = compute_teleport_candidate(&hand(), &ray_config(), &collision, &nav);

        assert!(!candidate.is_valid);
        assert_eq!(candidate.failure, Some(TargetFailure::NoHit));
        assert_eq!(candidate.valid_destination(), None);
    }

    #[test]
    fn test_off_nav_mesh_hit_is_invalid() {
        let collision = StubCollision::new(Some(hit_at(vec3(0.0, 150.0, -400.0))), ProjectilePath::default());
        let nav = StubNav(None);

        let candidate = compute_teleport_candidate(&hand(), &ray_config(), &collision, &nav);

        assert!(!candidate.is_valid);
        assert_eq!(candidate.failure, Some(TargetFailure::OffNavMesh));
    }

    #[test]
    fn test_projection_outside_extent_is_rejected() {
        // A nav query that ignores the extent and snaps to the floor far below the hit
        let collision = StubCollision::new(Some(hit_at(vec3(0.0, 300.0, -400.0))), ProjectilePath::default());
        let nav = StubNav(Some(vec3(0.0, 0.0, -400.0)));

        let candidate = compute_teleport_candidate(&hand(), &ray_config(), &collision, &nav);

        assert!(!candidate.is_valid);
        assert_eq!(candidate.failure, Some(TargetFailure::OffNavMesh));
    }

    #[test]
    fn test_parabolic_launch_parameters() {
        let collision = StubCollision::new(None, ProjectilePath::default());
        let nav = StubNav(None);
        let config = TeleportConfig::default();

        compute_teleport_candidate(&hand(), &config, &collision, &nav);

        let query = collision.last_query.borrow().unwrap();
        assert_eq!(query.origin, vec3(0.0, 120.0, 0.0));
        assert_eq!(query.initial_velocity, vec3(0.0, 0.0, -800.0));
        assert_eq!(query.horizon_time, 10.0);
        assert_eq!(query.sweep_radius, 10.0);
        assert!(query.exclude_self);
    }

    #[test]
    fn test_parabolic_hit_keeps_full_path() {
        let points = vec![
            vec3(0.0, 120.0, 0.0),
            vec3(0.0, 110.0, -53.0),
            vec3(0.0, 80.0, -106.0),
            vec3(0.0, 10.0, -170.0),
        ];
        let collision = StubCollision::new(
            None,
            ProjectilePath {
                hit: Some(hit_at(vec3(0.0, 10.0, -170.0))),
                points: points.clone(),
            },
        );
        let nav = StubNav(Some(vec3(0.0, 0.0, -170.0)));

        let candidate = compute_teleport_candidate(&hand(), &TeleportConfig::default(), &collision, &nav);

        assert!(candidate.is_valid);
        assert_eq!(candidate.destination, vec3(0.0, 0.0, -170.0));
        assert_eq!(candidate.path, points);
    }

    #[test]
    fn test_parabolic_miss_still_returns_samples() {
        let points: Vec<_> = (0..20).map(|i| vec3(0.0, 120.0 - i as f32, -(i as f32) * 50.0)).collect();
        let collision = StubCollision::new(
            None,
            ProjectilePath {
                hit: None,
                points: points.clone(),
            },
        );
        let nav = StubNav(Some(vec3(0.0, 0.0, 0.0)));

        let candidate = compute_teleport_candidate(&hand(), &TeleportConfig::default(), &collision, &nav);

        assert!(!candidate.is_valid);
        assert_eq!(candidate.failure, Some(TargetFailure::NoHit));
        assert_eq!(candidate.path, points);
    }
}
