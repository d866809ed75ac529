use std::path::PathBuf;
use std::time::Duration;

use crate::batch::scheduler::ScheduleOutcome;
use crate::foundation::core::Dimensions;

/// Summary of one batch call.
///
/// Field names are a wire contract with the orchestration layer; they serialize verbatim.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BatchReport {
    /// Tasks whose RGBA output was written.
    pub processed: u64,
    /// Tasks that failed (load, dimension mismatch, write, or panic).
    pub errors: u64,
    /// Written outputs in input order. `len() == processed`.
    pub output_files: Vec<PathBuf>,
    /// Wall-clock milliseconds spent scheduling and running all tasks.
    pub processing_time_ms: f64,
    /// `processing_time_ms / processed`, or `0` when nothing succeeded.
    pub avg_time_per_image_ms: f64,
    /// Megapixels of successful output per second of wall-clock time.
    pub throughput_mpix_per_sec: f64,
    /// Worker threads used.
    pub threads_used: usize,
}

impl BatchReport {
    /// Compact scheduler output into a report. Pure; performs no IO.
    pub fn aggregate(outcome: ScheduleOutcome, dims: Dimensions) -> Self {
        let ScheduleOutcome {
            slots,
            processed,
            errors,
            elapsed,
            threads_used,
        } = outcome;

        let output_files = slots.into_iter().flatten().collect::<Vec<_>>();
        let processing_time_ms = duration_ms(elapsed);
        let pixels = processed as f64 * dims.pixel_count() as f64;

        Self {
            processed,
            errors,
            output_files,
            processing_time_ms,
            avg_time_per_image_ms: per_item(processing_time_ms, processed),
            throughput_mpix_per_sec: throughput_mpix(pixels, elapsed),
            threads_used,
        }
    }

    /// Number of tasks in the batch.
    pub fn total(&self) -> u64 {
        self.processed + self.errors
    }

    /// `true` when every task succeeded.
    pub fn is_complete(&self) -> bool {
        self.errors == 0
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn per_item(total_ms: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_ms / count as f64
    }
}

fn throughput_mpix(pixels: f64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if pixels <= 0.0 || secs <= 0.0 {
        return 0.0;
    }
    pixels / 1e6 / secs
}

#[cfg(test)]
#[path = "../../tests/unit/batch/report.rs"]
mod tests;
