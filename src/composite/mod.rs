/// Pixel-level mask compositing.
pub mod pixel;
