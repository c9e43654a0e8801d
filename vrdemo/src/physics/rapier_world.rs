use cgmath::{InnerSpace, Vector3};
use engine::physics_log;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::parry::shape::Ball;
use rapier3d::prelude::*;

use super::{
    CollisionGateway, ProjectilePath, ProjectileQuery, SurfaceHit, ballistic,
    util::{nvec_to_cgmath, npoint_to_cgvec, vec_to_npoint, vec_to_nvec},
};

/// Static scene collision plus the player's own capsule, queried through rapier.
pub struct RapierCollisionWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    islands: IslandManager,
    query_pipeline: QueryPipeline,
    gravity: Vector3<f32>,
    self_collider: Option<ColliderHandle>,
}

impl RapierCollisionWorld {
    pub fn new(gravity: Vector3<f32>) -> Self {
        RapierCollisionWorld {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            islands: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            gravity,
            self_collider: None,
        }
    }

    pub fn add_static_box(
        &mut self,
        center: Vector3<f32>,
        half_extents: Vector3<f32>,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vec_to_nvec(center))
            .build();
        let handle = self.colliders.insert(collider);
        self.refresh();
        handle
    }

    /// Register the character's own capsule. Queries with `exclude_self` ignore it.
    pub fn set_self_capsule(
        &mut self,
        center: Vector3<f32>,
        half_height: f32,
        radius: f32,
    ) -> ColliderHandle {
        if let Some(previous) = self.self_collider.take() {
            self.colliders
                .remove(previous, &mut self.islands, &mut self.bodies, false);
        }

        let segment_half_height = (half_height - radius).max(0.0);
        let collider = ColliderBuilder::capsule_y(segment_half_height, radius)
            .translation(vec_to_nvec(center))
            .build();
        let handle = self.colliders.insert(collider);
        self.self_collider = Some(handle);
        self.refresh();
        handle
    }

    pub fn move_self(&mut self, center: Vector3<f32>) {
        let Some(handle) = self.self_collider else {
            return;
        };

        if let Some(collider) = self.colliders.get_mut(handle) {
            collider.set_translation(vec_to_nvec(center));
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.query_pipeline.update(&self.bodies, &self.colliders);
    }

    fn filter(&self, exclude_self: bool) -> QueryFilter<'static> {
        match (exclude_self, self.self_collider) {
            (true, Some(handle)) => QueryFilter::default().exclude_collider(handle),
            _ => QueryFilter::default(),
        }
    }

    fn ray_hit(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
        exclude_self: bool,
    ) -> Option<SurfaceHit> {
        if direction.magnitude2() <= f32::EPSILON || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(vec_to_npoint(origin), vec_to_nvec(direction.normalize()));
        let (_handle, intersection) = self.query_pipeline.cast_ray_and_get_normal(
            &self.bodies,
            &self.colliders,
            &ray,
            max_distance,
            true,
            self.filter(exclude_self),
        )?;

        Some(SurfaceHit {
            point: npoint_to_cgvec(ray.point_at(intersection.time_of_impact)),
            normal: nvec_to_cgmath(intersection.normal),
        })
    }

    /// Sweep a ball from `from` to `to`. The hit point is the ball centre at impact.
    fn sweep_segment(
        &self,
        from: Vector3<f32>,
        to: Vector3<f32>,
        radius: f32,
        exclude_self: bool,
    ) -> Option<SurfaceHit> {
        let delta = to - from;
        let length = delta.magnitude();
        if length <= f32::EPSILON {
            return None;
        }

        if radius <= 0.0 {
            return self.ray_hit(from, delta, length, exclude_self);
        }

        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(from.x, from.y, from.z);
        let (_handle, hit) = self.query_pipeline.cast_shape(
            &self.bodies,
            &self.colliders,
            &shape_pos,
            &vec_to_nvec(delta),
            &shape,
            ShapeCastOptions::with_max_time_of_impact(1.0),
            self.filter(exclude_self),
        )?;

        Some(SurfaceHit {
            point: from + delta * hit.time_of_impact,
            normal: nvec_to_cgmath(hit.normal1.into_inner()),
        })
    }
}

impl CollisionGateway for RapierCollisionWorld {
    fn cast_ray(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<SurfaceHit> {
        self.ray_hit(origin, direction, max_distance, true)
    }

    fn predict_projectile_path(&self, query: &ProjectileQuery) -> ProjectilePath {
        let times = ballistic::sample_times(query.horizon_time, query.sim_frequency);
        let mut points = Vec::with_capacity(times.len());
        points.push(query.origin);

        let mut previous = query.origin;
        for &time in times.iter().skip(1) {
            let next =
                ballistic::position_at(query.origin, query.initial_velocity, self.gravity, time);

            if let Some(hit) =
                self.sweep_segment(previous, next, query.sweep_radius, query.exclude_self)
            {
                points.push(hit.point);
                physics_log!(
                    TRACE,
                    "projectile hit at {:?} after {} samples",
                    hit.point,
                    points.len()
                );
                return ProjectilePath {
                    hit: Some(hit),
                    points,
                };
            }

            points.push(next);
            previous = next;
        }

        ProjectilePath { hit: None, points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    fn world_with_floor() -> RapierCollisionWorld {
        let mut world = RapierCollisionWorld::new(vec3(0.0, -980.0, 0.0));
        world.add_static_box(vec3(0.0, -10.0, 0.0), vec3(5000.0, 10.0, 5000.0));
        world
    }

    fn query(origin: Vector3<f32>, velocity: Vector3<f32>) -> ProjectileQuery {
        ProjectileQuery {
            origin,
            initial_velocity: velocity,
            horizon_time: 10.0,
            sweep_radius: 10.0,
            sim_frequency: 15.0,
            exclude_self: true,
        }
    }

    #[test]
    fn test_ray_hits_floor() {
        let world = world_with_floor();
        let hit = world
            .cast_ray(vec3(0.0, 170.0, 0.0), vec3(0.0, -1.0, 0.0), 1000.0)
            .expect("ray should hit the floor");

        assert!(hit.point.y.abs() < 1e-3);
        assert!((hit.normal - vec3(0.0, 1.0, 0.0)).magnitude() < 1e-3);
    }

    #[test]
    fn test_ray_respects_max_distance() {
        let world = world_with_floor();
        assert!(world
            .cast_ray(vec3(0.0, 170.0, 0.0), vec3(0.0, -1.0, 0.0), 100.0)
            .is_none());
    }

    #[test]
    fn test_projectile_lands_on_floor() {
        let world = world_with_floor();
        let path = world.predict_projectile_path(&query(vec3(0.0, 150.0, 0.0), vec3(0.0, 0.0, -800.0)));

        let hit = path.hit.expect("projectile should land");
        assert!((hit.point.y - 10.0).abs() < 0.5);
        assert!(hit.point.z < 0.0);
        assert_eq!(path.points.first(), Some(&vec3(0.0, 150.0, 0.0)));
        assert_eq!(path.points.last(), Some(&hit.point));
    }

    #[test]
    fn test_projectile_miss_returns_full_horizon() {
        let world = RapierCollisionWorld::new(vec3(0.0, -980.0, 0.0));
        let path = world.predict_projectile_path(&query(vec3(0.0, 150.0, 0.0), vec3(0.0, 0.0, -800.0)));

        assert!(path.hit.is_none());
        // 10 seconds at 15 samples per second, plus the launch point
        assert_eq!(path.points.len(), 151);
    }

    /// Capsule standing 3m ahead of the launch point, in the arc's way.
    fn world_with_capsule_ahead() -> RapierCollisionWorld {
        let mut world = world_with_floor();
        world.set_self_capsule(vec3(0.0, 96.0, -300.0), 96.0, 40.0);
        world
    }

    #[test]
    fn test_projectile_passes_through_own_capsule() {
        let world = world_with_capsule_ahead();

        let path = world.predict_projectile_path(&query(vec3(0.0, 96.0, 0.0), vec3(0.0, 0.0, -800.0)));

        let hit = path.hit.expect("projectile should pass the capsule and land");
        assert!((hit.point.y - 10.0).abs() < 0.5);
        assert!(hit.point.z < -300.0);
    }

    #[test]
    fn test_projectile_hits_capsule_when_not_excluded() {
        let world = world_with_capsule_ahead();

        let mut included = query(vec3(0.0, 96.0, 0.0), vec3(0.0, 0.0, -800.0));
        included.exclude_self = false;
        let path = world.predict_projectile_path(&included);

        // Sphere of radius 10 touches the capsule's side at 50 from its axis
        let hit = path.hit.expect("capsule is in the way");
        assert!((hit.point.z + 250.0).abs() < 1.0);
        assert!(hit.point.y > 40.0 && hit.point.y < 152.0);
    }

    #[test]
    fn test_ray_ignores_own_capsule() {
        let world = world_with_capsule_ahead();

        let hit = world
            .cast_ray(vec3(0.0, 96.0, 0.0), vec3(0.0, -0.2, -1.0), 1000.0)
            .expect("ray should reach the floor behind the capsule");
        assert!(hit.point.y.abs() < 1e-3);
        assert!(hit.point.z < -300.0);
    }
}
