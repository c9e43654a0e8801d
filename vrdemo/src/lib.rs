//! Locomotion for a seated or standing VR player: teleport targeting with a
//! fade-out/fade-in sequence, smooth thumbstick movement, room-scale
//! recentering and a speed-driven comfort vignette.

pub mod character;
pub mod comfort;
pub mod config;
pub mod error;
pub mod input;
pub mod movement;
pub mod navigation;
pub mod physics;
pub mod pose;
pub mod recenter;
pub mod screen;
pub mod teleport;
pub mod tracking;

pub use character::{FrameContext, Lifecycle, VrCharacter};
pub use config::{AimSource, LocomotionConfig, TargetingMode};
pub use error::ConfigError;
