//! Turns a `(Font, size, CharSet, antialias)` render task into a list of
//! [`RasterGlyph`]s.

use crate::charset::CharSet;
use crate::error::BakeError;
use crate::fixed::to_fp266;
use crate::font::{Font, TYPOGRAPHIC_DPI};
use crate::glyph::RasterGlyph;

/// One `(font, size, charset, antialias)` unit of rasterisation work.
pub struct RenderTask<'a> {
    pub font: &'a mut Font,
    pub size: f64,
    pub charset: &'a CharSet,
    pub antialias: bool,
}

/// An owned, font-by-name [`RenderTask`] — what [`crate::bake`] and
/// [`crate::config::BakeManifest::resolve`] produce before a `Font` is
/// looked up and borrowed for the actual render call.
pub struct TaskSpec {
    pub font_name: String,
    pub size: f64,
    pub antialias: bool,
    pub charset: CharSet,
}

/// The glyphs produced by one [`RenderTask`], plus enough of the font's
/// state at render time for [`crate::pack::pack`] to emit a font-table
/// record without re-touching the `GlyphSource`.
pub struct RenderResult {
    pub font_name: String,
    pub family_name: String,
    pub size_fp266: i32,
    pub antialias: bool,
    pub has_horizontal: bool,
    pub has_vertical: bool,
    pub line_height_fp266: i32,
    pub underline_position_fp266: i32,
    pub underline_thickness_fp266: i32,
    pub glyphs: Vec<RasterGlyph>,
}

/// The largest glyph dimension the wire format's `uint8` width/height
/// fields can hold.
const MAX_GLYPH_DIMENSION: u32 = 255;

/// Rasterise every code point in `task.charset` at `task.size`.
///
/// Glyph order in the result is unspecified (the charset is unordered).
/// A code point the font has no outline for yields a zero-sized
/// [`RasterGlyph`] and an informational log line — not an error.
pub fn render(task: RenderTask<'_>) -> Result<RenderResult, BakeError> {
    if !(1.0 < task.size && task.size < 255.0) {
        return Err(BakeError::SizeOutOfRange(task.size));
    }
    if !task.font.face().is_scalable() {
        return Err(BakeError::UnsupportedFont(task.font.name().to_owned()));
    }

    let size_fp266 = to_fp266(task.size);
    task.font.face_mut().set_pixel_size(size_fp266, TYPOGRAPHIC_DPI)?;

    let line_height_fp266 = to_fp266(task.font.font_units_to_pixels(task.font.face().line_height_unscaled(), size_fp266));
    let underline_position_fp266 =
        to_fp266(task.font.font_units_to_pixels(task.font.face().underline_position_unscaled(), size_fp266));
    let underline_thickness_fp266 =
        to_fp266(task.font.font_units_to_pixels(task.font.face().underline_thickness_unscaled(), size_fp266));
    let has_horizontal = task.font.face().has_horizontal();
    let has_vertical = task.font.face().has_vertical();
    let family_name = task.font.face().family_name();
    crate::font::check_name_length(&family_name)?;

    let mut glyphs = Vec::with_capacity(task.charset.len());
    for code in task.charset.chars() {
        glyphs.push(render_one(task.font, code, task.antialias)?);
    }

    Ok(RenderResult {
        font_name: task.font.name().to_owned(),
        family_name,
        size_fp266,
        antialias: task.antialias,
        has_horizontal,
        has_vertical,
        line_height_fp266,
        underline_position_fp266,
        underline_thickness_fp266,
        glyphs,
    })
}

fn render_one(font: &mut Font, code: u32, antialias: bool) -> Result<RasterGlyph, BakeError> {
    if !font.face().has_glyph(code) {
        #[cfg(feature = "log")]
        log::info!(
            "no glyph in font {:?} at code point {:#x} ({:?})",
            font.name(),
            code,
            char::from_u32(code)
        );
        return Ok(RasterGlyph::missing(code));
    }

    let Some(raster) = font.face_mut().load_glyph(code, antialias)? else {
        return Ok(RasterGlyph::missing(code));
    };

    if raster.width == 0 || raster.height == 0 {
        return Ok(RasterGlyph::missing(code));
    }

    if raster.pitch < 0 {
        return Err(BakeError::UnsupportedBitmap(code, "negative bitmap pitch is not supported"));
    }
    if raster.width > MAX_GLYPH_DIMENSION || raster.height > MAX_GLYPH_DIMENSION {
        return Err(BakeError::UnsupportedBitmap(
            code,
            "glyph exceeds the 255px the wire format's uint8 fields allow",
        ));
    }

    let width = raster.width as usize;
    let height = raster.height as usize;
    let pitch = raster.pitch as usize;
    let mut bitmap = vec![0u8; width * height];

    if raster.monochrome {
        for y in 0..height {
            for x in 0..width {
                let byte = raster.buffer[x / 8 + y * pitch];
                let mask = 0x80u8 >> (x % 8);
                bitmap[y * width + x] = if byte & mask != 0 { 255 } else { 0 };
            }
        }
    } else {
        for y in 0..height {
            for x in 0..width {
                bitmap[y * width + x] = raster.buffer[x + y * pitch];
            }
        }
    }

    Ok(RasterGlyph {
        code,
        width: raster.width as u8,
        height: raster.height as u8,
        bitmap: Some(bitmap),
        metrics: Some(raster.metrics),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::RasterizedBitmap;
    use crate::glyph::GlyphMetrics;

    /// A `GlyphSource` test double with one glyph per ASCII letter, each an
    /// `n x n` solid block where `n` is the letter's distance from `a`.
    struct FakeFace {
        current_size: i32,
    }

    impl crate::font::GlyphSource for FakeFace {
        fn set_pixel_size(&mut self, size_fp266: i32, _dpi: u16) -> Result<(), BakeError> {
            self.current_size = size_fp266;
            Ok(())
        }

        fn has_glyph(&self, code: u32) -> bool {
            (b'a' as u32..=b'z' as u32).contains(&code)
        }

        fn load_glyph(&mut self, code: u32, antialias: bool) -> Result<Option<RasterizedBitmap>, BakeError> {
            if !self.has_glyph(code) {
                return Ok(None);
            }
            let n = (code - b'a' as u32 + 1) as u32;
            Ok(Some(RasterizedBitmap {
                width: n,
                height: n,
                pitch: if antialias { n as i32 } else { ((n + 7) / 8) as i32 },
                buffer: if antialias {
                    vec![200u8; (n * n) as usize]
                } else {
                    vec![0xFFu8; ((n + 7) / 8 * n) as usize]
                },
                monochrome: !antialias,
                metrics: GlyphMetrics::default(),
            }))
        }

        fn is_scalable(&self) -> bool {
            true
        }
        fn has_horizontal(&self) -> bool {
            true
        }
        fn has_vertical(&self) -> bool {
            false
        }
        fn family_name(&self) -> String {
            "Fake Sans".to_owned()
        }
        fn units_per_em(&self) -> u16 {
            2048
        }
        fn line_height_unscaled(&self) -> i32 {
            2458
        }
        fn underline_position_unscaled(&self) -> i32 {
            -150
        }
        fn underline_thickness_unscaled(&self) -> i32 {
            100
        }
    }

    fn fake_font() -> Font {
        Font::new("fake", Box::new(FakeFace { current_size: 0 })).unwrap()
    }

    #[test]
    fn missing_glyph_is_zero_sized_not_an_error() {
        let mut font = fake_font();
        let charset = CharSet::new(vec!['1'.into()]).unwrap();
        let result = render(RenderTask { font: &mut font, size: 12.0, charset: &charset, antialias: true }).unwrap();
        assert_eq!(result.glyphs.len(), 1);
        assert!(!result.glyphs[0].has_ink());
    }

    #[test]
    fn antialiased_bitmap_is_direct_copy() {
        let mut font = fake_font();
        let charset = CharSet::new(vec!['a'.into()]).unwrap();
        let result = render(RenderTask { font: &mut font, size: 12.0, charset: &charset, antialias: true }).unwrap();
        let g = &result.glyphs[0];
        assert_eq!((g.width, g.height), (1, 1));
        assert_eq!(g.bitmap.as_deref(), Some(&[200u8][..]));
    }

    #[test]
    fn monochrome_bits_unpack_to_0_or_255() {
        let mut font = fake_font();
        let charset = CharSet::new(vec!['b'.into()]).unwrap();
        let result = render(RenderTask { font: &mut font, size: 12.0, charset: &charset, antialias: false }).unwrap();
        let g = &result.glyphs[0];
        assert_eq!((g.width, g.height), (2, 2));
        assert_eq!(g.bitmap.as_deref(), Some(&[255u8, 255, 255, 255][..]));
    }

    #[test]
    fn out_of_range_size_is_rejected() {
        let mut font = fake_font();
        let charset = CharSet::new(vec![]).unwrap();
        let err = render(RenderTask { font: &mut font, size: 300.0, charset: &charset, antialias: true }).unwrap_err();
        assert!(matches!(err, BakeError::SizeOutOfRange(_)));
    }

    #[test]
    fn size_is_encoded_as_fp266() {
        let mut font = fake_font();
        let charset = CharSet::new(vec![]).unwrap();
        let result = render(RenderTask { font: &mut font, size: 11.5, charset: &charset, antialias: true }).unwrap();
        assert_eq!(result.size_fp266, 736);
    }

    #[test]
    fn family_name_is_carried_through_distinct_from_the_assigned_name() {
        let mut font = fake_font();
        let charset = CharSet::new(vec![]).unwrap();
        let result = render(RenderTask { font: &mut font, size: 12.0, charset: &charset, antialias: true }).unwrap();
        assert_eq!(font.name(), "fake");
        assert_eq!(result.family_name, "Fake Sans");
    }

    #[test]
    fn oversized_font_name_is_rejected_at_construction() {
        let name = "x".repeat(256);
        let err = Font::new(name, Box::new(FakeFace { current_size: 0 })).unwrap_err();
        assert!(matches!(err, BakeError::NameTooLong(_, 256)));
    }
}
