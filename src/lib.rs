//! Piecewise-linear color gradients discretized into a fixed lookup table,
//! and the luminance lookup used to recolor images with them.

pub mod color;
mod config;
mod error;
mod gradient;
mod lookup;
mod strip;

pub use color::Color;
pub use config::GradientConfig;
pub use error::GradientError;
pub use gradient::{ControlPoint, Gradient, RESOLUTION};
pub use lookup::{lookup, lookup_red, map_rgba8};
