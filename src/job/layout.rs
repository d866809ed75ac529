use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{TorqueError, TorqueResult};

/// File extensions treated as input frames (matched case-insensitively).
///
/// `heic` frames are listed so the job shape matches the capture layout, but the `image` decoder
/// has no HEIC support: each one fails as a per-task load error unless converted beforehand.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "heic"];

/// Suffix appended to an input's file stem to name its output.
pub const OUTPUT_SUFFIX: &str = "_rgba";

/// Paths for compositing one job directory. All vectors are parallel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobPlan {
    /// Input frames, sorted by file name.
    pub inputs: Vec<PathBuf>,
    /// One output path per input.
    pub outputs: Vec<PathBuf>,
    /// One mask file per input, when a masks directory was given.
    pub masks: Vec<PathBuf>,
}

impl JobPlan {
    /// Number of frames in the plan.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// `true` when the images directory held no frames.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// `true` if `path` has one of [`IMAGE_EXTENSIONS`].
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        })
}

/// List image files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> TorqueResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(TorqueError::io(format!(
            "images directory not found: '{}'",
            dir.display()
        )));
    }
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))? {
        let path = entry
            .with_context(|| format!("read dir entry in '{}'", dir.display()))?
            .path();
        if path.is_file() && is_image_file(&path) {
            out.push(path);
        }
    }
    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

/// `output_dir/<stem>_rgba.png` for an input frame.
pub fn rgba_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{stem}{OUTPUT_SUFFIX}.png"))
}

/// Plan a job: every frame in `images_dir`, its output in `output_dir`, and (optionally) its mask
/// `masks_dir/<stem>.png`.
///
/// A missing images directory or a frame without a mask file is fatal.
pub fn plan_job_dir(
    images_dir: &Path,
    masks_dir: Option<&Path>,
    output_dir: &Path,
) -> TorqueResult<JobPlan> {
    let inputs = list_images(images_dir)?;
    let outputs = inputs
        .iter()
        .map(|p| rgba_output_path(p, output_dir))
        .collect::<Vec<_>>();

    let masks = match masks_dir {
        None => Vec::new(),
        Some(dir) => inputs
            .iter()
            .map(|p| {
                let stem = p.file_stem().unwrap_or_default().to_string_lossy();
                let mask = dir.join(format!("{stem}.png"));
                if mask.is_file() {
                    Ok(mask)
                } else {
                    Err(TorqueError::validation(format!(
                        "no mask '{}' for frame '{}'",
                        mask.display(),
                        p.display()
                    )))
                }
            })
            .collect::<TorqueResult<Vec<_>>>()?,
    };

    Ok(JobPlan {
        inputs,
        outputs,
        masks,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/job/layout.rs"]
mod tests;
