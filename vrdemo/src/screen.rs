use cgmath::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Linear RGBA color used for full-screen fades.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FadeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl FadeColor {
    pub const BLACK: FadeColor = FadeColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
}

impl Default for FadeColor {
    fn default() -> Self {
        FadeColor::BLACK
    }
}

/// World-to-screen projection for the local player's viewport.
pub trait ScreenProjector {
    /// Project a world point to pixel coordinates, or `None` if it can't be projected.
    fn world_to_screen(&self, point: Vector3<f32>) -> Option<Vector2<f32>>;

    /// Viewport size in pixels.
    fn viewport_size(&self) -> (u32, u32);
}

/// Camera fade requests, forwarded to whatever composites the screen overlay.
pub trait ScreenFader {
    fn fade_screen(&mut self, from_alpha: f32, to_alpha: f32, duration: f32, color: FadeColor);
}

/// A fade request as issued, kept by recorders and the CLI report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeRequest {
    pub from_alpha: f32,
    pub to_alpha: f32,
    pub duration: f32,
    pub color: FadeColor,
}

/// Fader that records every request instead of drawing anything.
#[derive(Default, Debug)]
pub struct RecordingFader {
    pub requests: Vec<FadeRequest>,
}

impl ScreenFader for RecordingFader {
    fn fade_screen(&mut self, from_alpha: f32, to_alpha: f32, duration: f32, color: FadeColor) {
        self.requests.push(FadeRequest {
            from_alpha,
            to_alpha,
            duration,
            color,
        });
    }
}
