use std::path::PathBuf;

/// Convenience result type used across torque-rgba.
pub type TorqueResult<T> = Result<T, TorqueError>;

/// Fatal error taxonomy for engine entry points.
///
/// Anything returned as a `TorqueError` aborts the whole call before the worker pool starts.
/// Per-image failures never surface here; see [`TaskError`].
#[derive(thiserror::Error, Debug)]
pub enum TorqueError {
    /// Invalid caller-provided input (empty batch, mismatched lengths, bad mask shape, bad opts).
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem errors outside of per-task processing (directory listing, options files).
    #[error("io error: {0}")]
    Io(String),

    /// Errors when serializing or deserializing options and reports.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TorqueError {
    /// Build a [`TorqueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TorqueError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`TorqueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Recoverable failure of a single compositing task.
///
/// These are counted in `BatchReport::errors` and never propagate past the task boundary.
#[derive(thiserror::Error, Debug)]
pub enum TaskError {
    /// The input image could not be read or decoded.
    #[error("could not load image '{path}': {reason}")]
    Load {
        /// Input image path.
        path: PathBuf,
        /// Decoder or IO message.
        reason: String,
    },

    /// Image and mask plane disagree on width/height.
    #[error(
        "image dimensions ({image_w}x{image_h}) don't match mask ({mask_w}x{mask_h}): '{path}'"
    )]
    DimensionMismatch {
        /// Input image path.
        path: PathBuf,
        /// Decoded image width.
        image_w: u32,
        /// Decoded image height.
        image_h: u32,
        /// Mask plane width.
        mask_w: u32,
        /// Mask plane height.
        mask_h: u32,
    },

    /// The RGBA output could not be encoded or written.
    #[error("could not save rgba image '{path}': {reason}")]
    Write {
        /// Output path.
        path: PathBuf,
        /// Encoder or IO message.
        reason: String,
    },

    /// The task panicked; the panic was caught at the task boundary.
    #[error("task {slot} panicked: {message}")]
    Panicked {
        /// Slot index of the faulting task.
        slot: usize,
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl TaskError {
    /// Short stable label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::DimensionMismatch { .. } => "dimension_mismatch",
            Self::Write { .. } => "write",
            Self::Panicked { .. } => "panicked",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
