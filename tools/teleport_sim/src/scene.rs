use std::{fs, path::Path};

use anyhow::Context;
use cgmath::{Vector3, vec3};
use serde::Deserialize;
use vrdemo::{navigation::NavMesh, physics::RapierCollisionWorld};

#[derive(Debug, Deserialize)]
pub struct SceneBox {
    pub center: Vector3<f32>,
    pub half_extents: Vector3<f32>,
}

/// Static level geometry plus where the player starts and how they stand.
#[derive(Debug, Deserialize)]
pub struct SceneFile {
    #[serde(default = "default_gravity")]
    pub gravity: Vector3<f32>,
    pub boxes: Vec<SceneBox>,
    pub nav_mesh: NavMesh,
    /// Floor point the player spawns on
    pub start: Vector3<f32>,
    /// Tracking-space head position
    #[serde(default = "default_head")]
    pub head: Vector3<f32>,
    /// Tracking-space right hand position
    #[serde(default = "default_hand")]
    pub hand: Vector3<f32>,
}

fn default_gravity() -> Vector3<f32> {
    vec3(0.0, -980.0, 0.0)
}

fn default_head() -> Vector3<f32> {
    vec3(0.0, 170.0, 0.0)
}

fn default_hand() -> Vector3<f32> {
    vec3(20.0, 120.0, -20.0)
}

impl SceneFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn build_world(&self) -> RapierCollisionWorld {
        let mut world = RapierCollisionWorld::new(self.gravity);
        for scene_box in &self.boxes {
            world.add_static_box(scene_box.center, scene_box.half_extents);
        }
        world
    }
}
