/// Errors from constructing math values out of untrusted input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("matrix needs exactly 16 values, got {0}")]
    MatrixLength(usize),
    #[error("invalid hex color {0:?}: expected RRGGBB or #RRGGBB")]
    HexFormat(String),
    #[error("invalid hex digits {digits:?} in color {color:?}")]
    HexDigits { color: String, digits: String },
}
