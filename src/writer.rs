//! Emits the little-endian binary atlas metadata file described in the
//! external interface section of the design docs.
//!
//! Layout, all little-endian: a 48-byte header, a font table, a glyph
//! section, and a (currently always empty) kerning section. The header's
//! offsets and sizes are back-patched after the variable-length sections
//! are laid out, mirroring a two-pass "measure, then patch" builder.

use crate::pack::{FontRecord, PackResult};

const MAGIC: &[u8; 12] = b"BAKEFONTv3r0";
const FONT_TABLE_MARKER: &[u8; 8] = b"FONTDATA";
const GLYPH_SECTION_MARKER: &[u8; 8] = b"GSETDATA";
const GSET_MARKER: &[u8; 4] = b"GSET";
const GLYPH_RECORD_SIZE: u32 = 36;
const HEADER_SIZE: u32 = 48;

/// Serialise `pack` into the atlas metadata file format.
///
/// Kerning is always written as an empty section: emission of kerning
/// pairs is out of scope for this bake pipeline, but the format reserves
/// the bytes so a future writer can fill them in without a format bump.
pub fn write(pack: &PackResult) -> Vec<u8> {
    let font_table = write_font_table(&pack.fonts);
    let glyph_section = write_glyph_section(pack);

    let font_table_offset = HEADER_SIZE;
    let glyph_section_offset = font_table_offset + font_table.len() as u32;
    let kerning_offset = glyph_section_offset + glyph_section.len() as u32;

    let mut out = Vec::with_capacity(kerning_offset as usize);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&(pack.width as u16).to_le_bytes());
    out.extend_from_slice(&(pack.height as u16).to_le_bytes());
    out.extend_from_slice(&font_table_offset.to_le_bytes());
    out.extend_from_slice(&(font_table.len() as u32).to_le_bytes());
    out.extend_from_slice(&glyph_section_offset.to_le_bytes());
    out.extend_from_slice(&(glyph_section.len() as u32).to_le_bytes());
    out.extend_from_slice(&kerning_offset.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&[0u8; 8]);

    debug_assert_eq!(out.len() as u32, HEADER_SIZE);
    out.extend_from_slice(&font_table);
    out.extend_from_slice(&glyph_section);
    out
}

fn write_font_table(fonts: &[FontRecord]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(FONT_TABLE_MARKER);
    out.extend_from_slice(&(fonts.len() as u32).to_le_bytes());

    for font in fonts {
        let record = write_font_record(font);
        out.extend_from_slice(&(record.len() as u32).to_le_bytes());
        out.extend_from_slice(&record);
    }
    out
}

fn write_font_record(font: &FontRecord) -> Vec<u8> {
    let mut record = Vec::new();
    write_name(&mut record, &font.name);
    write_name(&mut record, &font.family_name);

    record.extend_from_slice(&font.font_id.0.to_le_bytes());

    // Monospace and kerning detection are unreliable across font engines,
    // so both are always written off, matching the original bakefont3
    // source's own documented behavior.
    record.push(b'm');
    record.push(b'k');
    record.push(if font.has_horizontal { b'H' } else { b'h' });
    record.push(if font.has_vertical { b'V' } else { b'v' });
    record.push(if font.antialias { b'A' } else { b'a' });
    record.extend_from_slice(&[0u8; 3]);

    record.extend_from_slice(&font.line_height_fp266.to_le_bytes());
    // bbox xMin, yMin, xMax, yMax: reserved, not computed by this pipeline.
    record.extend_from_slice(&[0i16, 0, 0, 0].iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<_>>());
    // max advance width, max advance height: reserved.
    record.extend_from_slice(&[0i16, 0].iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<_>>());

    record.extend_from_slice(&font.underline_position_fp266.to_le_bytes());
    record.extend_from_slice(&font.underline_thickness_fp266.to_le_bytes());

    record
}

fn write_name(out: &mut Vec<u8>, name: &str) {
    let bytes = name.as_bytes();
    debug_assert!(bytes.len() <= u8::MAX as usize, "name length must be validated before reaching the writer");
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
    out.push(0);
}

fn write_glyph_section(pack: &PackResult) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(GLYPH_SECTION_MARKER);
    out.extend_from_slice(&GLYPH_RECORD_SIZE.to_le_bytes());

    for font in &pack.fonts {
        let mut glyphs: Vec<_> = pack.glyphs.iter().filter(|g| g.font_id == font.font_id).collect();
        glyphs.sort_by_key(|g| g.code());

        out.extend_from_slice(GSET_MARKER);
        out.extend_from_slice(&font.font_id.0.to_le_bytes());
        out.extend_from_slice(&(glyphs.len() as u32).to_le_bytes());

        for placed in glyphs {
            out.extend_from_slice(&placed.code().to_le_bytes());
            out.extend_from_slice(&(placed.x as u16).to_le_bytes());
            out.extend_from_slice(&(placed.y as u16).to_le_bytes());
            out.push(placed.z);
            out.push(placed.glyph.width);
            out.push(placed.glyph.height);
            out.push(0);

            let metrics = placed.glyph.metrics.unwrap_or_default();
            for value in [
                metrics.hori_bearing_x,
                metrics.hori_bearing_y,
                metrics.hori_advance,
                metrics.vert_bearing_x,
                metrics.vert_bearing_y,
                metrics.vert_advance,
            ] {
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
    }

    out
}
