//! End-to-end scenarios over the pure pack/composite/write pipeline, using
//! synthetic glyphs so no real font file or FreeType installation is
//! required.

use fontbake::atlas_image::AtlasImage;
use fontbake::glyph::RasterGlyph;
use fontbake::pack::{pack, CandidateSizes};
use fontbake::render::RenderResult;
use fontbake::writer::write;

fn glyph(code: char, width: u8, height: u8) -> RasterGlyph {
    RasterGlyph {
        code: code as u32,
        width,
        height,
        bitmap: Some(vec![0x80; width as usize * height as usize]),
        metrics: None,
    }
}

fn result(name: &str, size_fp266: i32, glyphs: Vec<RasterGlyph>) -> RenderResult {
    RenderResult {
        font_name: name.to_owned(),
        family_name: name.to_owned(),
        size_fp266,
        antialias: true,
        has_horizontal: true,
        has_vertical: false,
        line_height_fp266: 1536,
        underline_position_fp266: -64,
        underline_thickness_fp266: 64,
        glyphs,
    }
}

#[test]
fn empty_input_produces_a_minimal_valid_file() {
    let packed = pack(&[], CandidateSizes::default()).unwrap();
    assert!(packed.glyphs.is_empty());

    let atlas = AtlasImage::composite(packed.width, packed.height, &packed.glyphs);
    assert_eq!((atlas.width(), atlas.height()), (64, 64));
    assert!(atlas.to_rgba().pixels().all(|p| p.0 == [0, 0, 0, 0]));

    let bytes = write(&packed);
    assert_eq!(&bytes[0..12], b"BAKEFONTv3r0");
    assert_eq!(&bytes[48..56], b"FONTDATA");
    assert_eq!(u32::from_le_bytes(bytes[56..60].try_into().unwrap()), 0, "zero fonts");
}

#[test]
fn single_glyph_retries_past_an_infeasible_candidate() {
    let results = vec![result("mono", 640, vec![glyph('x', 10, 10)])];
    let packed = pack(&results, vec![(8, 8), (16, 16)].into_iter()).unwrap();
    assert_eq!((packed.width, packed.height), (16, 16));
    assert_eq!(packed.glyphs[0].z, 3);
}

#[test]
fn dedup_across_overlapping_render_tasks_keeps_the_union() {
    let results = vec![
        result("mono", 640, vec![glyph('a', 4, 4), glyph('b', 4, 4)]),
        result("mono", 640, vec![glyph('b', 4, 4), glyph('c', 4, 4)]),
    ];
    let packed = pack(&results, CandidateSizes::default()).unwrap();
    assert_eq!(packed.glyphs.len(), 3);
}

#[test]
fn fractional_size_round_trips_through_fp266() {
    use fontbake::fixed::{from_fp266, to_fp266};
    let encoded = to_fp266(11.5);
    assert_eq!(encoded, 736);
    assert_eq!(from_fp266(encoded), 11.5);
}

#[test]
fn header_offsets_and_sizes_describe_the_actual_layout() {
    let results = vec![
        result("a", 640, vec![glyph('x', 6, 6), glyph('y', 4, 4)]),
        result("b", 1280, vec![glyph('x', 8, 8)]),
    ];
    let packed = pack(&results, CandidateSizes::default()).unwrap();
    let bytes = write(&packed);

    let font_table_offset = u32::from_le_bytes(bytes[16..20].try_into().unwrap());
    let font_table_size = u32::from_le_bytes(bytes[20..24].try_into().unwrap());
    let glyph_section_offset = u32::from_le_bytes(bytes[24..28].try_into().unwrap());
    let glyph_section_size = u32::from_le_bytes(bytes[28..32].try_into().unwrap());
    let kerning_offset = u32::from_le_bytes(bytes[32..36].try_into().unwrap());
    let kerning_size = u32::from_le_bytes(bytes[36..40].try_into().unwrap());

    assert_eq!(font_table_offset, 48);
    assert_eq!(&bytes[font_table_offset as usize..][..8], b"FONTDATA");
    assert_eq!(glyph_section_offset, font_table_offset + font_table_size);
    assert_eq!(&bytes[glyph_section_offset as usize..][..8], b"GSETDATA");
    assert_eq!(kerning_offset, glyph_section_offset + glyph_section_size);
    assert_eq!(kerning_size, 0);
    assert_eq!(bytes.len() as u32, kerning_offset + kerning_size);
}

#[test]
fn glyph_records_within_a_gset_are_sorted_ascending_by_code_point() {
    let results = vec![result("mono", 640, vec![glyph('z', 2, 2), glyph('a', 2, 2), glyph('m', 2, 2)])];
    let packed = pack(&results, CandidateSizes::default()).unwrap();
    let bytes = write(&packed);

    let glyph_section_offset = u32::from_le_bytes(bytes[24..28].try_into().unwrap()) as usize;
    // marker(8) + record size(4) + GSET marker(4) + FontId(4) + count(4)
    let first_record = glyph_section_offset + 8 + 4 + 4 + 4 + 4;
    let codes: Vec<u32> = (0..3)
        .map(|i| u32::from_le_bytes(bytes[first_record + i * 36..first_record + i * 36 + 4].try_into().unwrap()))
        .collect();
    assert_eq!(codes, vec!['a' as u32, 'm' as u32, 'z' as u32]);
}

#[test]
fn two_runs_on_identical_input_are_byte_identical() {
    let make = || vec![result("mono", 640, vec![glyph('a', 5, 5), glyph('b', 9, 3)])];
    let first = write(&pack(&make(), CandidateSizes::default()).unwrap());
    let second = write(&pack(&make(), CandidateSizes::default()).unwrap());
    assert_eq!(first, second);
}
