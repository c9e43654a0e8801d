// VR Teleport Movement System
//
// Point a hand at the floor, release the teleport button, and the view fades
// out, the player is moved to the predicted spot, and the view fades back in.

pub mod targeting;
pub mod teleport_system;
pub mod trajectory;
pub mod visuals;

pub use targeting::{TargetFailure, TeleportCandidate, compute_teleport_candidate};
pub use teleport_system::{TeleportFadeState, TeleportOutcome, TeleportSystem, TeleportTask};
pub use trajectory::ArcTrajectory;
pub use visuals::{DestinationMarker, TeleportVisualStyle, TeleportVisuals};
