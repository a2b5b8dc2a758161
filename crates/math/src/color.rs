//! Hex color parsing into unit-range vectors.

use crate::{MathError, Vector3};

/// Parse `RRGGBB` or `#RRGGBB` into a vector with components in `[0, 1]`.
pub fn hex_to_vector(hex: &str) -> Result<Vector3, MathError> {
    let digits = match hex.len() {
        7 => hex
            .strip_prefix('#')
            .ok_or_else(|| MathError::HexFormat(hex.to_string()))?,
        6 => hex,
        _ => return Err(MathError::HexFormat(hex.to_string())),
    };
    if !digits.is_ascii() {
        return Err(MathError::HexFormat(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        let pair = &digits[range];
        let invalid = || MathError::HexDigits {
            color: hex.to_string(),
            digits: pair.to_string(),
        };
        // from_str_radix tolerates a leading '+', so check digits first.
        if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u8::from_str_radix(pair, 16).map_err(|_| invalid())
    };
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;

    Ok(Vector3::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    ))
}
