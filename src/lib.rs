//! An offline font-atlas baker: turns a set of scalable fonts and rendering
//! tasks into an RGBA texture atlas plus a little-endian binary metadata
//! file, suitable for a GPU text renderer that samples one channel per
//! glyph.
//!
//! ## Coordinate system
//! The atlas is `(width, height, depth)` with `depth` fixed at 4 — one
//! independent greyscale sub-atlas per RGBA channel. Glyph positions are in
//! pixels, origin top-left.
//!
//! ## Pipeline
//! [`render::render`] rasterises a `(font, size, charset, antialias)` task
//! into [`glyph::RasterGlyph`]s; [`pack::pack`] dedupes, sorts, and places
//! them into a cuboid via [`tritree::TriTree`]; [`atlas_image::AtlasImage`]
//! and [`writer::write`] turn the result into the two output artifacts.
//! [`bake`] wires the three stages together for the common case.
//!
//! ## Feature flags
//! - `log`: emit bake progress and notices via the [`log`](https://docs.rs/log) crate.
//! - `config`: a declarative TOML description of a bake job ([`config::BakeManifest`]).

pub mod atlas_image;
pub mod charset;
pub mod error;
pub mod fixed;
pub mod font;
pub mod freetype_source;
pub mod geom;
pub mod glyph;
pub mod pack;
pub mod render;
pub mod tritree;
pub mod writer;

#[cfg(feature = "config")]
pub mod config;

pub use atlas_image::AtlasImage;
pub use error::BakeError;
pub use font::{Font, GlyphSource};
pub use glyph::{FontId, PlacedGlyph, RasterGlyph};
pub use pack::{CandidateSizes, FontRecord, PackResult};
pub use render::{RenderResult, RenderTask};

/// Everything a single bake produces: the composited atlas and the binary
/// metadata bytes ready to write out.
pub struct BakeOutput {
    pub atlas: AtlasImage,
    pub metadata: Vec<u8>,
}

/// Render every task, pack the results, and composite+serialise the
/// outputs — the common case wired end to end.
///
/// `fonts` is indexed by name: each [`RenderTask`] in `tasks` must name a
/// font present in `fonts` (by [`Font::name`]). `candidate_sizes` is tried
/// in order; see [`pack::pack`].
pub fn bake(
    fonts: &mut [Font],
    tasks: Vec<render::TaskSpec>,
    candidate_sizes: impl Iterator<Item = (u32, u32)>,
) -> Result<BakeOutput, BakeError> {
    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        let font = fonts
            .iter_mut()
            .find(|f| f.name() == task.font_name)
            .ok_or_else(|| BakeError::UnsupportedFont(task.font_name.clone()))?;
        results.push(render::render(render::RenderTask {
            font,
            size: task.size,
            charset: &task.charset,
            antialias: task.antialias,
        })?);
    }

    let packed = pack::pack(&results, candidate_sizes)?;
    let atlas = AtlasImage::composite(packed.width, packed.height, &packed.glyphs);
    let metadata = writer::write(&packed);

    Ok(BakeOutput { atlas, metadata })
}
