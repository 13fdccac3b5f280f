use crate::color::Color;
use crate::gradient::{Gradient, RESOLUTION};

/// Maps a luminance onto the table. The index is `trunc(luminance *
/// RESOLUTION)` clamped into the table, so this never fails.
pub fn lookup(table: &Gradient, luminance: f64) -> Color {
    let index = if luminance.is_nan() {
        0
    } else {
        (luminance * RESOLUTION as f64).clamp(0.0, RESOLUTION as f64) as usize
    };
    table[index]
}

/// Replacement color for a pixel whose red channel is `red`. Dark pixels map
/// to the end of the gradient, light pixels to its start.
pub fn lookup_red(table: &Gradient, red: f64) -> Color {
    lookup(table, 1.0 - red)
}

pub fn map_rgba8(table: &Gradient, pixel: [u8; 4]) -> [u8; 4] {
    lookup_red(table, pixel[0] as f64 / 255.0).to_rgba8()
}
