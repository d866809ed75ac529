use std::path::{Path, PathBuf};

use crate::batch::opts::CompositeOpts;
use crate::codec::decode::load_rgb;
use crate::codec::encode::{PngCompression, ensure_parent_dir, write_png};
use crate::composite::pixel::{ChannelOrder, composite_buffer};
use crate::foundation::error::{TaskError, TorqueError, TorqueResult};
use crate::mask::volume::{MaskPlane, MaskVolume};

/// One unit of batch work: composite `input_path` with mask plane `slot_index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskDescriptor {
    /// Position in the caller's input list; also the mask plane and outcome slot index.
    pub slot_index: usize,
    /// Color image to read.
    pub input_path: PathBuf,
    /// Where the RGBA PNG is written.
    pub output_path: PathBuf,
}

/// Result of one task. `Ok` means the output file was written.
pub type TaskOutcome = Result<(), TaskError>;

/// Validate the batch shape and build one descriptor per input.
///
/// Every check here runs before any file is read or written.
pub fn build_tasks<I, O>(
    input_paths: &[I],
    masks: &MaskVolume,
    output_paths: &[O],
) -> TorqueResult<Vec<TaskDescriptor>>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let n = input_paths.len();
    if n == 0 {
        return Err(TorqueError::validation("no images provided"));
    }
    if output_paths.len() != n {
        return Err(TorqueError::validation(format!(
            "number of image paths ({n}) must match output paths ({})",
            output_paths.len()
        )));
    }
    if masks.plane_count() != n {
        let dims = masks.dimensions();
        return Err(TorqueError::validation(format!(
            "masks must have shape ({n}, height, width), got ({}, {}, {})",
            masks.plane_count(),
            dims.height,
            dims.width
        )));
    }

    Ok(input_paths
        .iter()
        .zip(output_paths)
        .enumerate()
        .map(|(slot_index, (input, output))| TaskDescriptor {
            slot_index,
            input_path: input.as_ref().to_path_buf(),
            output_path: output.as_ref().to_path_buf(),
        })
        .collect())
}

/// Executes one task on the calling thread.
///
/// Implementations must be shareable across worker threads. The scheduler owns slot and counter
/// bookkeeping; a runner only reports success or a [`TaskError`].
pub trait TaskRunner: Sync {
    /// Process `task` against its mask plane.
    fn run(&self, task: &TaskDescriptor, mask: MaskPlane<'_>) -> TaskOutcome;
}

/// The production runner: decode, validate, composite, write PNG.
#[derive(Clone, Debug)]
pub struct FileCompositor {
    compression: PngCompression,
    create_parent_dirs: bool,
}

impl FileCompositor {
    /// Build a runner from compositing options.
    pub fn new(opts: &CompositeOpts) -> Self {
        Self {
            compression: opts.png_compression,
            create_parent_dirs: opts.create_parent_dirs,
        }
    }
}

impl TaskRunner for FileCompositor {
    fn run(&self, task: &TaskDescriptor, mask: MaskPlane<'_>) -> TaskOutcome {
        let rgb = load_rgb(&task.input_path).map_err(|e| TaskError::Load {
            path: task.input_path.clone(),
            reason: format!("{e:#}"),
        })?;

        let (image_w, image_h) = rgb.dimensions();
        let dims = mask.dimensions();
        let mismatch = || TaskError::DimensionMismatch {
            path: task.input_path.clone(),
            image_w,
            image_h,
            mask_w: dims.width,
            mask_h: dims.height,
        };
        if image_w != dims.width || image_h != dims.height {
            return Err(mismatch());
        }

        let frame =
            composite_buffer(rgb.as_raw(), ChannelOrder::Rgb, mask).map_err(|_| mismatch())?;
        drop(rgb);

        let write_err = |e: TorqueError| TaskError::Write {
            path: task.output_path.clone(),
            reason: format!("{e:#}"),
        };
        if self.create_parent_dirs {
            ensure_parent_dir(&task.output_path).map_err(write_err)?;
        }
        write_png(&frame, &task.output_path, self.compression).map_err(write_err)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/task.rs"]
mod tests;
