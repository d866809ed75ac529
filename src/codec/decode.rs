use std::path::Path;

use anyhow::Context;

use crate::foundation::error::TorqueResult;

/// Read and decode a color image, normalized to 8-bit RGB.
///
/// Grayscale, alpha-bearing and 16-bit inputs are converted; an existing alpha channel is dropped
/// because the mask defines the output alpha.
pub fn load_rgb(path: &Path) -> TorqueResult<image::RgbImage> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff image format '{}'", path.display()))?;
    let dyn_img = reader
        .decode()
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(dyn_img.to_rgb8())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/decode.rs"]
mod tests;
