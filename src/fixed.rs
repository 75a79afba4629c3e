//! 26.6 fixed-point codec.
//!
//! FreeType (and this format) represents many quantities — pixel sizes,
//! bearings, advances — as a signed integer where the low 6 bits are the
//! fractional part. Divide by 64.0 to recover the real value.

/// Either side of a value that still needs encoding to 26.6.
///
/// Mirrors the original Python encoder's dispatch on `isinstance(x, int)`:
/// an integer input is scaled exactly (`x * 64`), a fractional input is
/// scaled and truncated toward zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fp266Input {
    Int(i32),
    Float(f64),
}

impl From<i32> for Fp266Input {
    fn from(x: i32) -> Self {
        Self::Int(x)
    }
}

impl From<f64> for Fp266Input {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

/// Encode a value as a 26.6 fixed-point `i32`.
pub fn to_fp266(x: impl Into<Fp266Input>) -> i32 {
    match x.into() {
        Fp266Input::Int(n) => n * 64,
        Fp266Input::Float(f) => (f * 64.0).trunc() as i32,
    }
}

/// Decode a 26.6 fixed-point `i32` back to a real value.
pub fn from_fp266(n: i32) -> f64 {
    f64::from(n) / 64.0
}
