//! Font handles: a named, mutable-size wrapper around a [`GlyphSource`].

use crate::error::BakeError;
use crate::glyph::GlyphMetrics;

/// Rejects a name the writer's uint8-length-prefixed encoding can't hold.
/// Mirrors the original Python encoder's `b8string()`, which asserts
/// `length < 256` rather than silently truncating.
pub(crate) fn check_name_length(name: &str) -> Result<(), BakeError> {
    let len = name.as_bytes().len();
    if len > u8::MAX as usize {
        return Err(BakeError::NameTooLong(name.to_owned(), len));
    }
    Ok(())
}

/// Typographic DPI. The original source hard-codes this when calling
/// FreeType's `set_char_size`; at 72dpi, 1px == 1pt, which is what lets the
/// rest of this format talk about "pixel size" without a separate DPI
/// parameter anywhere else.
pub const TYPOGRAPHIC_DPI: u16 = 72;

/// A bitmap and metrics freshly rasterised from a [`GlyphSource`].
pub struct RasterizedBitmap {
    pub width: u32,
    pub height: u32,
    /// Bytes per row. Negative pitch is rejected by `render` before this
    /// struct is ever built from it (see `BakeError::UnsupportedBitmap`).
    pub pitch: i32,
    /// `height * pitch.unsigned_abs()` bytes, per the source font engine's
    /// native layout (8-bit greyscale, or 1-bit packed MSB-first for
    /// monochrome rasterisation).
    pub buffer: Vec<u8>,
    pub monochrome: bool,
    pub metrics: GlyphMetrics,
}

/// The seam behind which any scalable-font engine can sit.
///
/// The ambient, fully-built implementation (`freetype_source::FreeTypeFace`)
/// wraps the `freetype` crate, whose vocabulary (`pitch`, `horiBearingX`,
/// 26.6 fixed point) this trait and the wire format both inherit directly.
pub trait GlyphSource {
    /// Select the current rasterisation size. `size_fp266` is a 26.6
    /// fixed-point pixel size; `dpi` is almost always [`TYPOGRAPHIC_DPI`].
    fn set_pixel_size(&mut self, size_fp266: i32, dpi: u16) -> Result<(), BakeError>;

    fn has_glyph(&self, code: u32) -> bool;

    /// Rasterise `code` at the currently selected size. Returns `None` when
    /// `has_glyph` would return `false` for this code point.
    fn load_glyph(&mut self, code: u32, antialias: bool) -> Result<Option<RasterizedBitmap>, BakeError>;

    fn is_scalable(&self) -> bool;
    fn has_horizontal(&self) -> bool;
    fn has_vertical(&self) -> bool;

    /// The font's family name (e.g. "DejaVu Sans"), distinct from the
    /// caller-assigned [`Font::name`] a bake job refers to it by. Empty if
    /// the font engine has none on file.
    fn family_name(&self) -> String;

    fn units_per_em(&self) -> u16;

    /// Font-unit (unscaled) line height, i.e. `face.height`.
    fn line_height_unscaled(&self) -> i32;
    fn underline_position_unscaled(&self) -> i32;
    fn underline_thickness_unscaled(&self) -> i32;
}

/// A named font face.
///
/// Invariant (enforced by [`crate::pack::Packer`], which sees every `Font`
/// used in a bake): names are unique within one bake.
pub struct Font {
    name: String,
    face: Box<dyn GlyphSource>,
}

impl Font {
    /// Fails with [`BakeError::NameTooLong`] if `name`'s UTF-8 encoding is
    /// over 255 bytes — the wire format's name fields are uint8-length-
    /// prefixed, so anything longer can't be written at all.
    pub fn new(name: impl Into<String>, face: Box<dyn GlyphSource>) -> Result<Self, BakeError> {
        let name = name.into();
        check_name_length(&name)?;
        Ok(Self { name, face })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn face(&self) -> &dyn GlyphSource {
        self.face.as_ref()
    }

    pub fn face_mut(&mut self) -> &mut dyn GlyphSource {
        self.face.as_mut()
    }

    /// Convert a font-unit value to pixels at the given 26.6 pixel size.
    pub fn font_units_to_pixels(&self, value: i32, size_fp266: i32) -> f64 {
        let size_px = crate::fixed::from_fp266(size_fp266);
        f64::from(value) * size_px / f64::from(self.face.units_per_em())
    }
}
