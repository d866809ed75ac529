use std::path::Path;

use anyhow::Context;

use crate::foundation::error::TorqueResult;
use crate::mask::volume::{MaskBuf, MaskVolume};

/// Decode a mask image file into an 8-bit single-channel plane.
///
/// Color or alpha-bearing inputs are reduced to luma; any non-zero luma counts as foreground.
pub fn load_mask_plane(path: &Path) -> TorqueResult<MaskBuf> {
    let img = image::open(path).with_context(|| format!("open mask '{}'", path.display()))?;
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    MaskBuf::new(luma.into_raw(), width, height)
}

/// Decode one mask file per path and stack them into a volume.
pub fn load_mask_volume<P: AsRef<Path>>(paths: &[P]) -> TorqueResult<MaskVolume> {
    let planes = paths
        .iter()
        .map(|p| load_mask_plane(p.as_ref()))
        .collect::<TorqueResult<Vec<_>>>()?;
    MaskVolume::from_planes(planes)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/load.rs"]
mod tests;
