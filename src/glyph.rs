//! Value objects produced by rasterisation and consumed by the packer.

use crate::geom::HasSize;

/// Typographic metrics for a single glyph, all in 26.6 fixed point, carried
/// verbatim from the font engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GlyphMetrics {
    pub hori_bearing_x: i32,
    pub hori_bearing_y: i32,
    pub hori_advance: i32,
    pub vert_bearing_x: i32,
    pub vert_bearing_y: i32,
    pub vert_advance: i32,
}

/// A single rasterised glyph: a code point, its bitmap (if any), and its
/// metrics (if any). Immutable once built.
///
/// A code point the font has no glyph for (or whose glyph has no visible
/// ink) is represented as `width == height == 0`, `bitmap: None`,
/// `metrics: None` — not an error (see `BakeError` — missing glyphs are
/// logged as a notice, not failed).
#[derive(Clone, Debug)]
pub struct RasterGlyph {
    pub code: u32,
    pub width: u8,
    pub height: u8,
    /// Row-major 8-bit greyscale, `height * width` bytes. `None` iff
    /// `width * height == 0`.
    pub bitmap: Option<Vec<u8>>,
    pub metrics: Option<GlyphMetrics>,
}

impl RasterGlyph {
    /// A glyph the font has no outline for.
    pub fn missing(code: u32) -> Self {
        Self {
            code,
            width: 0,
            height: 0,
            bitmap: None,
            metrics: None,
        }
    }

    pub fn has_ink(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl HasSize for RasterGlyph {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }
}

/// Identifies a `(font name, pixel size)` pair within one bake.
///
/// The index into the sorted, deduplicated list of those pairs — assigned
/// by [`crate::pack::Packer`], never constructed directly by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontId(pub u32);

impl nohash_hasher::IsEnabled for FontId {}

/// A [`RasterGlyph`] placed at a specific position and layer in the atlas.
#[derive(Clone, Debug)]
pub struct PlacedGlyph {
    pub glyph: RasterGlyph,
    pub font_id: FontId,
    pub x: u32,
    pub y: u32,
    /// Atlas channel: 0 = R, 1 = G, 2 = B, 3 = A.
    pub z: u8,
}

impl PlacedGlyph {
    pub fn code(&self) -> u32 {
        self.glyph.code
    }

    pub fn width(&self) -> u32 {
        self.glyph.width()
    }

    pub fn height(&self) -> u32 {
        self.glyph.height()
    }
}
