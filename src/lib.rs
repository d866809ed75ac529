//! torque-rgba turns color frames plus binary segmentation masks into transparent-background
//! RGBA PNGs.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: input paths, output paths and the [`MaskVolume`] must agree on the task count
//!    (fatal [`TorqueError`] otherwise, before any file is touched).
//! 2. **Schedule**: tasks fan out to a bounded rayon pool; idle workers claim the next task.
//! 3. **Composite**: each task decodes its frame, checks it against its mask plane, copies RGB and
//!    derives alpha (`255` where mask `> 0`, else `0`), then writes a lossless PNG.
//! 4. **Aggregate**: per-slot outcomes are compacted in input order into a [`BatchReport`].
//!
//! Per-image failures (unreadable input, dimension mismatch, write failure, panics) are counted
//! in [`BatchReport::errors`] and never abort the batch.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Batch scheduling, options, and reports.
pub mod batch;
/// Image decode/encode at the task boundary.
pub mod codec;
/// Pixel-level compositing.
pub mod composite;
/// Job directory planning.
pub mod job;
/// Mask volumes, planes, and mask file loading.
pub mod mask;
/// Runtime capability probe.
pub mod system;

pub use batch::opts::{CompositeOpts, DEFAULT_MAX_WORKERS};
pub use batch::pipeline::{batch_create_rgba, batch_with_runner, create_rgba_single};
pub use batch::report::BatchReport;
pub use batch::scheduler::{ScheduleOutcome, run_tasks};
pub use batch::task::{FileCompositor, TaskDescriptor, TaskOutcome, TaskRunner, build_tasks};
pub use codec::encode::PngCompression;
pub use composite::pixel::{ChannelOrder, composite_buffer, composite_image, composite_into};
pub use foundation::core::{Dimensions, RgbaFrame};
pub use foundation::error::{TaskError, TorqueError, TorqueResult};
pub use job::layout::{JobPlan, plan_job_dir, rgba_output_path};
pub use mask::load::{load_mask_plane, load_mask_volume};
pub use mask::volume::{MaskBuf, MaskPlane, MaskVolume};
pub use system::probe::{CapabilityInfo, SimdLevel, optimization_info};
