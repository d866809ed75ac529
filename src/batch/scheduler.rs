use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::batch::task::{TaskDescriptor, TaskOutcome, TaskRunner};
use crate::foundation::error::{TaskError, TorqueError, TorqueResult};
use crate::mask::volume::{MaskPlane, MaskVolume};

/// Raw scheduling output, before aggregation.
///
/// `slots[i]` is `Some(output_path)` exactly when task `i` succeeded.
#[derive(Debug)]
pub struct ScheduleOutcome {
    /// One entry per task, indexed by slot.
    pub slots: Vec<Option<PathBuf>>,
    /// Tasks that wrote their output.
    pub processed: u64,
    /// Tasks that failed at any step.
    pub errors: u64,
    /// Wall-clock duration of the scheduling phase.
    pub elapsed: Duration,
    /// Worker threads in the pool.
    pub threads_used: usize,
}

/// Run every task on a dedicated pool of `workers` threads.
///
/// Tasks are claimed one at a time by whichever worker is idle. Each task owns its slot through a
/// disjoint `&mut`, so the only shared writes are the two atomic counters. A failed or panicking
/// task is counted and skipped; it never stops other tasks.
pub fn run_tasks<R>(
    tasks: &[TaskDescriptor],
    masks: &MaskVolume,
    runner: &R,
    workers: usize,
) -> TorqueResult<ScheduleOutcome>
where
    R: TaskRunner + ?Sized,
{
    if tasks.len() != masks.plane_count() {
        return Err(TorqueError::validation(format!(
            "{} tasks but {} mask planes",
            tasks.len(),
            masks.plane_count()
        )));
    }
    if let Some((i, t)) = tasks
        .iter()
        .enumerate()
        .find(|(i, t)| t.slot_index != *i)
    {
        return Err(TorqueError::validation(format!(
            "task at position {i} carries slot index {}",
            t.slot_index
        )));
    }

    let pool = build_thread_pool(workers)?;
    let processed = AtomicU64::new(0);
    let errors = AtomicU64::new(0);
    let mut slots: Vec<Option<PathBuf>> = vec![None; tasks.len()];

    let start = Instant::now();
    pool.install(|| {
        slots
            .par_iter_mut()
            .zip(tasks.par_iter())
            .zip(masks.par_planes())
            .with_max_len(1)
            .for_each(|((slot, task), mask)| match run_guarded(runner, task, mask) {
                Ok(()) => {
                    *slot = Some(task.output_path.clone());
                    processed.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        slot = task.slot_index,
                        output = %task.output_path.display(),
                        "task done"
                    );
                }
                Err(err) => {
                    errors.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        slot = task.slot_index,
                        input = %task.input_path.display(),
                        kind = err.kind(),
                        "{err}"
                    );
                }
            });
    });
    let elapsed = start.elapsed();

    Ok(ScheduleOutcome {
        slots,
        processed: processed.into_inner(),
        errors: errors.into_inner(),
        elapsed,
        threads_used: pool.current_num_threads(),
    })
}

/// Run one task, converting a panic into [`TaskError::Panicked`].
pub(crate) fn run_guarded<R>(runner: &R, task: &TaskDescriptor, mask: MaskPlane<'_>) -> TaskOutcome
where
    R: TaskRunner + ?Sized,
{
    match catch_unwind(AssertUnwindSafe(|| runner.run(task, mask))) {
        Ok(outcome) => outcome,
        Err(payload) => Err(TaskError::Panicked {
            slot: task.slot_index,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn build_thread_pool(threads: usize) -> TorqueResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(TorqueError::validation("worker count must be >= 1"));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("torque-rgba-{i}"))
        .build()
        .map_err(|e| TorqueError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/scheduler.rs"]
mod tests;
