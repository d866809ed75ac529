//! Image file IO at the task boundary: decode color inputs, encode RGBA PNG outputs.

/// Color image decoding.
pub mod decode;
/// Lossless RGBA PNG encoding.
pub mod encode;
