use image::{Rgba, RgbaImage};

use crate::gradient::Gradient;

impl Gradient {
    /// Renders the table as a strip one column per entry wide and `height`
    /// rows tall. Encoding the image is left to the caller.
    pub fn strip(&self, height: u32) -> RgbaImage {
        let width = self.len() as u32;
        RgbaImage::from_fn(width, height, |x, _| Rgba(self[x as usize].to_rgba8()))
    }
}
