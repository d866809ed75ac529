//! Batch compositing: task construction, the worker pool, and report aggregation.

/// Compositing options.
pub mod opts;
/// Batch and single-image entry points.
pub mod pipeline;
/// Batch report aggregation.
pub mod report;
/// Worker pool scheduling.
pub mod scheduler;
/// Task descriptors and runners.
pub mod task;
