//! Scene collision queries used by teleport targeting.
//!
//! The targeting code only talks to [`CollisionGateway`]; [`RapierCollisionWorld`]
//! is the in-tree implementation backed by a rapier query pipeline.

pub mod ballistic;
pub mod rapier_world;
pub mod util;

use cgmath::Vector3;

pub use rapier_world::RapierCollisionWorld;

/// Where a query touched scene geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub point: Vector3<f32>,
    pub normal: Vector3<f32>,
}

/// Parameters for a swept-sphere ballistic path prediction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileQuery {
    pub origin: Vector3<f32>,
    pub initial_velocity: Vector3<f32>,
    /// Seconds of flight to simulate before giving up
    pub horizon_time: f32,
    pub sweep_radius: f32,
    /// Samples per simulated second
    pub sim_frequency: f32,
    /// Skip the querying character's own collision
    pub exclude_self: bool,
}

/// Sampled flight of a projectile, launch first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectilePath {
    /// Set when the sweep hit something inside the horizon. The last point is the hit location.
    pub hit: Option<SurfaceHit>,
    pub points: Vec<Vector3<f32>>,
}

pub trait CollisionGateway {
    /// Trace a line from `origin` along `direction`, at most `max_distance` long.
    fn cast_ray(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<SurfaceHit>;

    fn predict_projectile_path(&self, query: &ProjectileQuery) -> ProjectilePath;
}
