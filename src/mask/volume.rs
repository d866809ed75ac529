use rayon::prelude::*;

use crate::foundation::core::Dimensions;
use crate::foundation::error::{TorqueError, TorqueResult};

/// A stack of single-channel mask planes shaped `[planes, height, width]`, row-major.
///
/// Every plane shares one set of dimensions. A byte `> 0` marks foreground.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskVolume {
    data: Vec<u8>,
    planes: usize,
    dims: Dimensions,
}

impl MaskVolume {
    /// Wrap a contiguous `[planes, height, width]` byte buffer.
    ///
    /// Fails when `data.len()` is not exactly `planes * height * width`.
    pub fn new(data: Vec<u8>, planes: usize, width: u32, height: u32) -> TorqueResult<Self> {
        let dims = Dimensions::new(width, height)?;
        let expected = planes.checked_mul(dims.pixel_count()).ok_or_else(|| {
            TorqueError::validation("mask volume shape overflows addressable memory")
        })?;
        if data.len() != expected {
            return Err(TorqueError::validation(format!(
                "mask volume must have shape ({planes}, {height}, {width}) = {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self { data, planes, dims })
    }

    /// A volume where every byte of every plane is `value`.
    pub fn filled(planes: usize, width: u32, height: u32, value: u8) -> TorqueResult<Self> {
        let dims = Dimensions::new(width, height)?;
        Self::new(
            vec![value; planes.saturating_mul(dims.pixel_count())],
            planes,
            width,
            height,
        )
    }

    /// Stack owned planes into one volume. All planes must share dimensions.
    pub fn from_planes(planes: Vec<MaskBuf>) -> TorqueResult<Self> {
        let Some(first) = planes.first() else {
            return Err(TorqueError::validation(
                "cannot build a mask volume from zero planes",
            ));
        };
        let dims = first.dims;
        let mut data = Vec::with_capacity(planes.len().saturating_mul(dims.pixel_count()));
        for (i, p) in planes.iter().enumerate() {
            if p.dims != dims {
                return Err(TorqueError::validation(format!(
                    "mask plane {i} is {}, expected {dims} like plane 0",
                    p.dims
                )));
            }
            data.extend_from_slice(&p.data);
        }
        Self::new(data, planes.len(), dims.width, dims.height)
    }

    /// Number of planes (one per task).
    pub fn plane_count(&self) -> usize {
        self.planes
    }

    /// Shared plane dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Raw `[planes, height, width]` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Borrow plane `index`.
    pub fn plane(&self, index: usize) -> Option<MaskPlane<'_>> {
        if index >= self.planes {
            return None;
        }
        let len = self.dims.pixel_count();
        let start = index * len;
        Some(MaskPlane {
            data: &self.data[start..start + len],
            dims: self.dims,
        })
    }

    /// Iterate planes in order.
    pub fn planes(&self) -> impl ExactSizeIterator<Item = MaskPlane<'_>> + '_ {
        self.data
            .chunks_exact(self.dims.pixel_count())
            .map(move |data| MaskPlane {
                data,
                dims: self.dims,
            })
    }

    /// Indexed parallel iterator over planes, for zipping with per-task state.
    pub fn par_planes(&self) -> impl IndexedParallelIterator<Item = MaskPlane<'_>> + '_ {
        let dims = self.dims;
        self.data
            .par_chunks_exact(dims.pixel_count())
            .map(move |data| MaskPlane { data, dims })
    }

    /// Collapse all planes into one by logical OR: a pixel is foreground (255) if any plane marks
    /// it, background (0) otherwise.
    pub fn union_plane(&self) -> MaskBuf {
        let mut out = vec![0u8; self.dims.pixel_count()];
        for plane in self.planes() {
            for (o, &m) in out.iter_mut().zip(plane.data) {
                *o |= foreground_byte(m);
            }
        }
        MaskBuf {
            data: out,
            dims: self.dims,
        }
    }
}

/// Borrowed view of one mask plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskPlane<'a> {
    data: &'a [u8],
    dims: Dimensions,
}

impl<'a> MaskPlane<'a> {
    /// View `data` as a `height x width` plane. Fails on a length mismatch.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> TorqueResult<Self> {
        let dims = Dimensions::new(width, height)?;
        if data.len() != dims.pixel_count() {
            return Err(TorqueError::validation(format!(
                "mask plane {dims} needs {} bytes, got {}",
                dims.pixel_count(),
                data.len()
            )));
        }
        Ok(Self { data, dims })
    }

    /// Plane dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Raw row-major bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Number of foreground (`> 0`) pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&m| m > 0).count()
    }
}

/// An owned mask plane, e.g. decoded from a mask image file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskBuf {
    data: Vec<u8>,
    dims: Dimensions,
}

impl MaskBuf {
    /// Take ownership of a `height x width` buffer.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> TorqueResult<Self> {
        MaskPlane::new(&data, width, height)?;
        Ok(Self {
            data,
            dims: Dimensions { width, height },
        })
    }

    /// Borrow as a plane view.
    pub fn as_plane(&self) -> MaskPlane<'_> {
        MaskPlane {
            data: &self.data,
            dims: self.dims,
        }
    }

    /// Plane dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Release the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// `0` for background, `255` for any foreground byte.
#[inline(always)]
pub(crate) fn foreground_byte(m: u8) -> u8 {
    0u8.wrapping_sub(u8::from(m != 0))
}

#[cfg(test)]
#[path = "../../tests/unit/mask/volume.rs"]
mod tests;
