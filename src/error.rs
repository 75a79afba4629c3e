use thiserror::Error;

/// Everything that can go wrong while building a font atlas.
#[derive(Error, Debug)]
pub enum BakeError {
    /// A [`crate::charset::CharSet`] range argument had an endpoint outside
    /// the Unicode scalar value range.
    #[error("invalid charset range argument: {0:#x} is not a valid code point")]
    InvalidRangeArg(u32),

    /// A render task's pixel size was not in the open interval `(1.0, 255.0)`.
    #[error("font size {0} out of range: must satisfy 1.0 < size < 255.0")]
    SizeOutOfRange(f64),

    /// The font face is not a scalable outline font.
    #[error("font {0:?} is not scalable")]
    UnsupportedFont(String),

    /// The font engine returned a bitmap with negative pitch, or one wider
    /// or taller than the 255px the wire format's `uint8` fields allow.
    #[error("unsupported glyph bitmap for code point {0:#x}: {1}")]
    UnsupportedBitmap(u32, &'static str),

    /// No candidate atlas size in the given sequence could fit every glyph.
    #[error("no candidate atlas size could fit all {0} glyphs")]
    NoFit(usize),

    /// A font or family name is longer than the 255 bytes the wire format's
    /// uint8-length-prefixed name encoding can hold.
    #[error("name {0:?} is {1} bytes, over the 255 byte limit the name encoding allows")]
    NameTooLong(String, usize),

    /// I/O failure while loading a font file or saving output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The FreeType engine rejected a font file or a rasterisation request.
    #[error("FreeType error: {0}")]
    FreeType(#[from] freetype::Error),

    /// A `BakeManifest` TOML document failed to parse.
    #[cfg(feature = "config")]
    #[error("invalid bake manifest: {0}")]
    Config(#[from] toml::de::Error),
}
