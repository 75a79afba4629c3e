//! Deduplicates, sorts, and packs rendered glyphs into an atlas-shaped
//! cuboid.

use nohash_hasher::IntMap;

use crate::error::BakeError;
use crate::geom::BBox;
use crate::glyph::{FontId, PlacedGlyph, RasterGlyph};
use crate::render::RenderResult;
use crate::tritree::TriTree;

/// Atlas depth: four independent greyscale channels (R, G, B, A).
const ATLAS_DEPTH: u32 = 4;

/// The candidate atlas sizes tried in order, doubling from `start` to `max`
/// inclusive.
///
/// `Packer::pack`'s default is `CandidateSizes::new(64, 32768)`. Exhaustion
/// is not itself an error — `BakeError::NoFit` is only raised once the
/// caller's iterator runs out.
#[derive(Clone, Debug)]
pub struct CandidateSizes {
    next: u32,
    max: u32,
}

impl CandidateSizes {
    pub fn new(start: u32, max: u32) -> Self {
        Self { next: start, max }
    }
}

impl Default for CandidateSizes {
    fn default() -> Self {
        Self::new(64, 32768)
    }
}

impl Iterator for CandidateSizes {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.max {
            return None;
        }
        let size = self.next;
        self.next = self.next.saturating_mul(2);
        Some((size, size))
    }
}

/// Per-`FontId` metadata snapshot, carried through to the font table.
///
/// `bbox` and `max_advance` are placeholders (always zero): the wire format
/// reserves space for them but nothing in this pipeline computes them yet.
#[derive(Clone, Debug)]
pub struct FontRecord {
    pub name: String,
    pub family_name: String,
    pub font_id: FontId,
    pub size_fp266: i32,
    pub antialias: bool,
    pub has_horizontal: bool,
    pub has_vertical: bool,
    pub line_height_fp266: i32,
    pub underline_position_fp266: i32,
    pub underline_thickness_fp266: i32,
}

/// The outcome of a successful [`pack`].
pub struct PackResult {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Unique by `(FontId, code)`, sorted per-font ascending by code point
    /// within the overall height-descending pack order.
    pub glyphs: Vec<PlacedGlyph>,
    /// Sorted ascending by `FontId` — `FontId(i)` is `fonts[i]`.
    pub fonts: Vec<FontRecord>,
}

struct DedupedGlyph {
    font_id: FontId,
    glyph: RasterGlyph,
}

/// Pack every glyph from `results` into the first candidate size from
/// `candidate_sizes` that fits all of them.
///
/// Deterministic: given the same `results` and `candidate_sizes`, two calls
/// produce byte-identical `PackResult`s (font interning sorts
/// lexicographically, dedup keeps first-seen, the height sort is stable,
/// and `TriTree::fit` explores children in a fixed order).
pub fn pack(results: &[RenderResult], candidate_sizes: impl Iterator<Item = (u32, u32)>) -> Result<PackResult, BakeError> {
    let fonts = intern_fonts(results)?;

    let mut seen: IntMap<u64, usize> = IntMap::default();
    let mut deduped: Vec<DedupedGlyph> = Vec::new();
    for result in results {
        let font_id = fonts
            .iter()
            .position(|f| f.name == result.font_name && f.size_fp266 == result.size_fp266)
            .map(|i| FontId(i as u32))
            .expect("every RenderResult's (name, size) was interned above");
        for glyph in &result.glyphs {
            let key = dedup_key(font_id, glyph.code);
            seen.entry(key).or_insert_with(|| {
                deduped.push(DedupedGlyph { font_id, glyph: glyph.clone() });
                deduped.len() - 1
            });
        }
    }

    // Height-descending, ties broken by (FontId, code) ascending for a
    // deterministic, stable order.
    deduped.sort_by(|a, b| {
        b.glyph
            .height
            .cmp(&a.glyph.height)
            .then_with(|| a.font_id.cmp(&b.font_id))
            .then_with(|| a.glyph.code.cmp(&b.glyph.code))
    });

    let total_glyphs = deduped.len();
    let total_area: u64 = deduped.iter().map(|d| u64::from(d.glyph.width) * u64::from(d.glyph.height)).sum();

    for (w, h) in candidate_sizes {
        if total_area > u64::from(w) * u64::from(h) * u64::from(ATLAS_DEPTH) {
            #[cfg(feature = "log")]
            log::debug!("candidate size {w}x{h} fails the area pre-check, skipping");
            continue;
        }

        if let Some(placed) = try_pack(&deduped, w, h) {
            return Ok(PackResult { width: w, height: h, depth: ATLAS_DEPTH, glyphs: placed, fonts });
        }
    }

    Err(BakeError::NoFit(total_glyphs))
}

fn try_pack(deduped: &[DedupedGlyph], width: u32, height: u32) -> Option<Vec<PlacedGlyph>> {
    let mut tree = TriTree::new(BBox::new(0, 0, 0, width, height, ATLAS_DEPTH));
    let mut placed = Vec::with_capacity(deduped.len());

    for item in deduped {
        if !item.glyph.has_ink() {
            placed.push(PlacedGlyph { glyph: item.glyph.clone(), font_id: item.font_id, x: 0, y: 0, z: 0 });
            continue;
        }

        let bbox = tree.fit(&item.glyph)?;
        placed.push(PlacedGlyph {
            glyph: item.glyph.clone(),
            font_id: item.font_id,
            x: bbox.x0,
            y: bbox.y0,
            // Layer inversion: glyphs fill the alpha channel first, so a
            // viewer looking only at RGB sees content, not emptiness.
            z: (ATLAS_DEPTH - 1 - bbox.z0) as u8,
        });
    }

    Some(placed)
}

fn dedup_key(font_id: FontId, code: u32) -> u64 {
    u64::from(code) | (u64::from(font_id.0) << 32)
}

fn intern_fonts(results: &[RenderResult]) -> Result<Vec<FontRecord>, BakeError> {
    let mut fonts: Vec<FontRecord> = Vec::new();
    for result in results {
        if fonts.iter().any(|f| f.name == result.font_name && f.size_fp266 == result.size_fp266) {
            continue;
        }
        // `render()` already checks names reaching it this way, but `pack`
        // is public and callable directly on hand-built `RenderResult`s, so
        // the wire format's uint8-length-prefixed name encoding is
        // re-checked at this boundary too.
        crate::font::check_name_length(&result.font_name)?;
        crate::font::check_name_length(&result.family_name)?;
        fonts.push(FontRecord {
            name: result.font_name.clone(),
            family_name: result.family_name.clone(),
            font_id: FontId(0), // patched below, after sorting
            size_fp266: result.size_fp266,
            antialias: result.antialias,
            has_horizontal: result.has_horizontal,
            has_vertical: result.has_vertical,
            line_height_fp266: result.line_height_fp266,
            underline_position_fp266: result.underline_position_fp266,
            underline_thickness_fp266: result.underline_thickness_fp266,
        });
    }
    fonts.sort_by(|a, b| (&a.name, a.size_fp266).cmp(&(&b.name, b.size_fp266)));
    for (i, record) in fonts.iter_mut().enumerate() {
        record.font_id = FontId(i as u32);
    }
    Ok(fonts)
}
