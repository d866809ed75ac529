use std::path::Path;

use anyhow::Context;

use crate::codec::encode::PngCompression;
use crate::foundation::error::{TorqueError, TorqueResult};
use crate::system::probe::hardware_parallelism;

/// Default upper bound on concurrently running tasks.
///
/// Each in-flight task holds a decoded image plus its RGBA output, so the cap bounds peak memory.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Options for batch and single-image compositing.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "max_workers": 8, "png_compression": "fast", "create_parent_dirs": false }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositeOpts {
    /// Worker cap; the pool uses `min(max_workers, available hardware parallelism)` threads.
    pub max_workers: usize,
    /// zlib effort for output PNGs.
    pub png_compression: PngCompression,
    /// Create missing parent directories of output paths.
    pub create_parent_dirs: bool,
}

impl Default for CompositeOpts {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            png_compression: PngCompression::Default,
            create_parent_dirs: true,
        }
    }
}

impl CompositeOpts {
    /// Parse options from a JSON string.
    pub fn from_json_str(s: &str) -> TorqueResult<Self> {
        let opts: Self = serde_json::from_str(s).map_err(|e| TorqueError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read and parse a JSON options file.
    pub fn from_json_path(path: &Path) -> TorqueResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read options '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Reject option values that cannot run.
    pub fn validate(&self) -> TorqueResult<()> {
        if self.max_workers == 0 {
            return Err(TorqueError::validation("max_workers must be >= 1"));
        }
        Ok(())
    }

    /// Worker count the batch path will use on this machine.
    pub fn worker_count(&self) -> usize {
        self.max_workers.min(hardware_parallelism()).max(1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/opts.rs"]
mod tests;
