//! Mask-to-alpha channel composition.
//!
//! The hot loop works on `[u8; 3]` source pixels and `[u8; 4]` destination pixels with a
//! branch-free alpha rule so LLVM can vectorize it. No blending happens here: color bytes are
//! copied, and alpha is either `0` or `255`.

use crate::foundation::core::RgbaFrame;
use crate::foundation::error::{TorqueError, TorqueResult};
use crate::mask::volume::{MaskPlane, foreground_byte};

/// Byte order of a packed 3-channel source buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    /// `R, G, B` (what the `image` crate decodes to).
    #[default]
    Rgb,
    /// `B, G, R` (OpenCV-style buffers).
    Bgr,
}

/// Composite a decoded RGB8 image with a mask plane of the same dimensions.
pub fn composite_image(rgb: &image::RgbImage, mask: MaskPlane<'_>) -> TorqueResult<RgbaFrame> {
    let (width, height) = rgb.dimensions();
    let dims = mask.dimensions();
    if dims.width != width || dims.height != height {
        return Err(TorqueError::validation(format!(
            "image dimensions ({width}x{height}) don't match mask ({dims})"
        )));
    }
    composite_buffer(rgb.as_raw(), ChannelOrder::Rgb, mask)
}

/// Composite a packed 3-channel buffer (`height * width * 3` bytes) with a mask plane.
pub fn composite_buffer(
    src: &[u8],
    order: ChannelOrder,
    mask: MaskPlane<'_>,
) -> TorqueResult<RgbaFrame> {
    let dims = mask.dimensions();
    let px = dims.pixel_count();
    if src.len() != px * 3 {
        return Err(TorqueError::validation(format!(
            "color buffer for {dims} needs {} bytes, got {}",
            px * 3,
            src.len()
        )));
    }

    let mut data = vec![0u8; px * 4];
    composite_into(src, order, mask.as_bytes(), &mut data);
    Ok(RgbaFrame {
        width: dims.width,
        height: dims.height,
        data,
    })
}

/// Write `src` color plus mask-derived alpha into `dst`.
///
/// Processes `min(src.len() / 3, mask.len(), dst.len() / 4)` pixels; callers size the buffers.
pub fn composite_into(src: &[u8], order: ChannelOrder, mask: &[u8], dst: &mut [u8]) {
    let (src_px, _) = src.as_chunks::<3>();
    let (dst_px, _) = dst.as_chunks_mut::<4>();
    match order {
        ChannelOrder::Rgb => {
            for ((d, s), &m) in dst_px.iter_mut().zip(src_px).zip(mask) {
                *d = [s[0], s[1], s[2], foreground_byte(m)];
            }
        }
        ChannelOrder::Bgr => {
            for ((d, s), &m) in dst_px.iter_mut().zip(src_px).zip(mask) {
                *d = [s[2], s[1], s[0], foreground_byte(m)];
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/pixel.rs"]
mod tests;
