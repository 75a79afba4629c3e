//! Composites placed glyphs into the four-channel atlas image.

use image::{GrayImage, RgbaImage};

use crate::error::BakeError;
use crate::glyph::PlacedGlyph;

/// Four independent greyscale planes, one per RGBA channel.
///
/// Pure data: built from a slice of [`PlacedGlyph`]s by [`AtlasImage::composite`]
/// and otherwise unaware of fonts, packing, or the metadata writer.
pub struct AtlasImage {
    width: u32,
    height: u32,
    channels: [GrayImage; 4],
}

impl AtlasImage {
    /// Paint every glyph with a bitmap into its assigned channel at its
    /// assigned `(x, y)`. Glyphs with no bitmap (missing-glyph placeholders)
    /// contribute nothing — their channel pixels stay zero.
    pub fn composite(width: u32, height: u32, glyphs: &[PlacedGlyph]) -> Self {
        let mut channels = [
            GrayImage::new(width, height),
            GrayImage::new(width, height),
            GrayImage::new(width, height),
            GrayImage::new(width, height),
        ];

        for placed in glyphs {
            let Some(bitmap) = &placed.glyph.bitmap else { continue };
            let channel = &mut channels[placed.z as usize];
            let w = u32::from(placed.glyph.width);
            for row in 0..u32::from(placed.glyph.height) {
                for col in 0..w {
                    let value = bitmap[(row * w + col) as usize];
                    channel.put_pixel(placed.x + col, placed.y + row, image::Luma([value]));
                }
            }
        }

        Self { width, height, channels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Stack the four channels into an RGBA image, R = channel 0 … A = channel 3.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut rgba = RgbaImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let pixel = [
                    self.channels[0].get_pixel(x, y).0[0],
                    self.channels[1].get_pixel(x, y).0[0],
                    self.channels[2].get_pixel(x, y).0[0],
                    self.channels[3].get_pixel(x, y).0[0],
                ];
                rgba.put_pixel(x, y, image::Rgba(pixel));
            }
        }
        rgba
    }

    /// Encode and write the composited atlas as a PNG.
    ///
    /// ```ignore
    /// let atlas = AtlasImage::composite(packed.width, packed.height, &packed.glyphs);
    /// atlas.save_png("atlas.png")?;
    /// ```
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> Result<(), BakeError> {
        self.to_rgba().save_with_format(path, image::ImageFormat::Png).map_err(|err| match err {
            image::ImageError::IoError(io) => BakeError::Io(io),
            other => BakeError::Io(std::io::Error::new(std::io::ErrorKind::Other, other)),
        })
    }
}
