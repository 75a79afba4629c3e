//! [`GlyphSource`] backed by the `freetype` crate (FreeType bindings).
//!
//! This is the ambient, fully-built implementation of the rasterisation
//! seam; the packing/writer core never imports `freetype` directly.

use freetype::face::LoadFlag;
use freetype::{Face, Library};

use crate::error::BakeError;
use crate::font::{GlyphSource, RasterizedBitmap};
use crate::glyph::GlyphMetrics;

/// A FreeType face loaded from a font file.
pub struct FreeTypeFace {
    face: Face,
}

impl FreeTypeFace {
    /// Load a scalable font face from `path` using a private FreeType
    /// library instance.
    ///
    /// Each face gets its own [`Library`] handle; FreeType libraries are
    /// cheap and this avoids any shared mutable state between fonts loaded
    /// concurrently by the caller before baking begins.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, BakeError> {
        let library = Library::init()?;
        let face = library.new_face(path.as_ref(), 0)?;
        Ok(Self { face })
    }

    /// Load a scalable font face from an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, BakeError> {
        let library = Library::init()?;
        let face = library.new_memory_face(bytes, 0)?;
        Ok(Self { face })
    }
}

impl GlyphSource for FreeTypeFace {
    fn set_pixel_size(&mut self, size_fp266: i32, dpi: u16) -> Result<(), BakeError> {
        self.face.set_char_size(isize::try_from(size_fp266).unwrap_or(0), 0, u32::from(dpi), 0)?;
        Ok(())
    }

    fn has_glyph(&self, code: u32) -> bool {
        self.face.get_char_index(code as usize).is_some()
    }

    fn load_glyph(&mut self, code: u32, antialias: bool) -> Result<Option<RasterizedBitmap>, BakeError> {
        let Some(_index) = self.face.get_char_index(code as usize) else {
            return Ok(None);
        };

        let flags = if antialias {
            LoadFlag::RENDER
        } else {
            LoadFlag::RENDER | LoadFlag::TARGET_MONO | LoadFlag::FORCE_AUTOHINT
        };
        self.face.load_char(code as usize, flags)?;

        let glyph = self.face.glyph();
        let bitmap = glyph.bitmap();
        let metrics = glyph.metrics();

        Ok(Some(RasterizedBitmap {
            width: bitmap.width() as u32,
            height: bitmap.rows() as u32,
            pitch: bitmap.pitch(),
            buffer: bitmap.buffer().to_vec(),
            monochrome: !antialias,
            metrics: GlyphMetrics {
                hori_bearing_x: metrics.horiBearingX as i32,
                hori_bearing_y: metrics.horiBearingY as i32,
                hori_advance: metrics.horiAdvance as i32,
                vert_bearing_x: metrics.vertBearingX as i32,
                vert_bearing_y: metrics.vertBearingY as i32,
                vert_advance: metrics.vertAdvance as i32,
            },
        }))
    }

    fn is_scalable(&self) -> bool {
        self.face.is_scalable()
    }

    fn has_horizontal(&self) -> bool {
        self.face.has_horizontal()
    }

    fn has_vertical(&self) -> bool {
        self.face.has_vertical()
    }

    fn family_name(&self) -> String {
        self.face.family_name().unwrap_or_default()
    }

    fn units_per_em(&self) -> u16 {
        self.face.em_size() as u16
    }

    fn line_height_unscaled(&self) -> i32 {
        i32::from(self.face.height())
    }

    fn underline_position_unscaled(&self) -> i32 {
        i32::from(self.face.underline_position())
    }

    fn underline_thickness_unscaled(&self) -> i32 {
        i32::from(self.face.underline_thickness())
    }
}
