use std::path::Path;

use crate::batch::opts::CompositeOpts;
use crate::batch::report::BatchReport;
use crate::batch::scheduler::{run_guarded, run_tasks};
use crate::batch::task::{FileCompositor, TaskDescriptor, TaskRunner, build_tasks};
use crate::foundation::error::TorqueResult;
use crate::mask::volume::{MaskPlane, MaskVolume};

/// Composite a batch of images with their mask planes and write RGBA PNGs.
///
/// `input_paths[i]` is paired with `masks.plane(i)` and written to `output_paths[i]`.
///
/// Returns `Err` only for fatal pre-flight problems (empty batch, mismatched lengths, mask shape,
/// invalid options); in that case nothing has been read or written. Per-image failures are
/// counted in [`BatchReport::errors`] and leave no output file.
#[tracing::instrument(skip_all, fields(images = input_paths.len()))]
pub fn batch_create_rgba<I, O>(
    input_paths: &[I],
    masks: &MaskVolume,
    output_paths: &[O],
    opts: &CompositeOpts,
) -> TorqueResult<BatchReport>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    opts.validate()?;
    let tasks = build_tasks(input_paths, masks, output_paths)?;
    let runner = FileCompositor::new(opts);
    batch_with_runner(&tasks, masks, &runner, opts.worker_count())
}

/// Schedule prepared tasks with a custom [`TaskRunner`] and aggregate the report.
pub fn batch_with_runner<R>(
    tasks: &[TaskDescriptor],
    masks: &MaskVolume,
    runner: &R,
    workers: usize,
) -> TorqueResult<BatchReport>
where
    R: TaskRunner + ?Sized,
{
    let outcome = run_tasks(tasks, masks, runner, workers)?;
    let report = BatchReport::aggregate(outcome, masks.dimensions());

    tracing::info!(
        processed = report.processed,
        total = tasks.len(),
        errors = report.errors,
        time_ms = report.processing_time_ms,
        per_image_ms = report.avg_time_per_image_ms,
        mpix_per_sec = report.throughput_mpix_per_sec,
        threads = report.threads_used,
        "rgba batch complete"
    );
    Ok(report)
}

/// Composite one image on the calling thread.
///
/// Same decode, validation, composition and PNG output as one batch task. Any failure, including
/// a panic inside the task, returns `false` and leaves no output file.
pub fn create_rgba_single(
    input_path: &Path,
    mask: MaskPlane<'_>,
    output_path: &Path,
    opts: &CompositeOpts,
) -> bool {
    let task = TaskDescriptor {
        slot_index: 0,
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
    };
    match run_guarded(&FileCompositor::new(opts), &task, mask) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(input = %input_path.display(), kind = err.kind(), "{err}");
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/pipeline.rs"]
mod tests;
