//! Peripheral-vision comfort: a vignette that tightens with speed and keeps
//! its focus on the direction of travel.

pub mod response_curve;
pub mod vignette;

pub use response_curve::{CurveKey, ResponseCurve};
pub use vignette::{ComfortVignette, SCREEN_CENTER, update_vignette};
