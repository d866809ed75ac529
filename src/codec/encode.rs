use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::foundation::core::RgbaFrame;
use crate::foundation::error::{TorqueError, TorqueResult};

/// zlib effort used for output PNGs. All levels are lossless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    /// Fastest encode, largest files.
    Fast,
    /// Balanced encode speed and size.
    #[default]
    Default,
    /// Smallest files, slowest encode.
    Best,
}

impl PngCompression {
    fn to_image(self) -> CompressionType {
        match self {
            Self::Fast => CompressionType::Fast,
            Self::Default => CompressionType::Default,
            Self::Best => CompressionType::Best,
        }
    }
}

impl std::str::FromStr for PngCompression {
    type Err = TorqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "default" => Ok(Self::Default),
            "best" => Ok(Self::Best),
            other => Err(TorqueError::validation(format!(
                "unknown png compression '{other}' (expected fast, default or best)"
            ))),
        }
    }
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> TorqueResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode `frame` as an 8-bit RGBA PNG at `path`.
///
/// `path` only appears once the whole file has been encoded and flushed; a failure at any step
/// leaves nothing at `path`.
pub fn write_png(frame: &RgbaFrame, path: &Path, compression: PngCompression) -> TorqueResult<()> {
    write_atomically(path, |out| {
        PngEncoder::new_with_quality(out, compression.to_image(), FilterType::Adaptive)
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    })
}

/// Sibling staging path for `path`: `<file name>.tmp` in the same directory.
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Run `write` against a staging file next to `path`, then rename it into place.
///
/// The staging file is removed when `write`, the flush or the rename fails.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> TorqueResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> TorqueResult<()>,
{
    let staging = staging_path(path);
    let result = stage_and_rename(&staging, path, write);
    if result.is_err() {
        let _ = std::fs::remove_file(&staging);
    }
    result
}

fn stage_and_rename<F>(staging: &Path, path: &Path, write: F) -> TorqueResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> TorqueResult<()>,
{
    let file = File::create(staging).with_context(|| format!("create '{}'", staging.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out)?;
    out.flush().with_context(|| format!("flush '{}'", staging.display()))?;
    drop(out);
    std::fs::rename(staging, path)
        .with_context(|| format!("rename '{}' to '{}'", staging.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/encode.rs"]
mod tests;
