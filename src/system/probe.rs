use crate::batch::opts::{CompositeOpts, DEFAULT_MAX_WORKERS};

/// Widest vector instruction set detected at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SimdLevel {
    /// No vector extension detected (or an unsupported architecture).
    #[serde(rename = "basic")]
    Basic,
    /// x86 SSE4.2.
    #[serde(rename = "SSE4.2")]
    Sse42,
    /// x86 AVX.
    #[serde(rename = "AVX")]
    Avx,
    /// x86 AVX2.
    #[serde(rename = "AVX2")]
    Avx2,
    /// x86 AVX-512 (foundation + byte/word).
    #[serde(rename = "AVX-512")]
    Avx512,
    /// aarch64 Advanced SIMD.
    #[serde(rename = "NEON")]
    Neon,
}

impl SimdLevel {
    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Sse42 => "SSE4.2",
            Self::Avx => "AVX",
            Self::Avx2 => "AVX2",
            Self::Avx512 => "AVX-512",
            Self::Neon => "NEON",
        }
    }
}

impl std::fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime concurrency and vectorization report. Informational only.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CapabilityInfo {
    /// `std::thread::available_parallelism`, or `1` when unknown.
    pub hardware_concurrency: usize,
    /// Default worker cap for batch calls.
    pub default_max_workers: usize,
    /// Workers a default batch call would use here.
    pub effective_workers: usize,
    /// Threads in rayon's global pool.
    pub global_pool_threads: usize,
    /// Detected vector instruction level.
    pub simd_level: SimdLevel,
    /// Whether this build has debug assertions off.
    pub optimized_build: bool,
    /// Compile target architecture.
    pub target_arch: &'static str,
}

/// Hardware threads available to this process.
pub fn hardware_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

/// Detect the widest usable vector extension.
pub fn detect_simd_level() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if std::arch::is_x86_feature_detected!("avx512f")
            && std::arch::is_x86_feature_detected!("avx512bw")
        {
            return SimdLevel::Avx512;
        }
        if std::arch::is_x86_feature_detected!("avx2") {
            return SimdLevel::Avx2;
        }
        if std::arch::is_x86_feature_detected!("avx") {
            return SimdLevel::Avx;
        }
        if std::arch::is_x86_feature_detected!("sse4.2") {
            return SimdLevel::Sse42;
        }
        SimdLevel::Basic
    }
    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            return SimdLevel::Neon;
        }
        SimdLevel::Basic
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        SimdLevel::Basic
    }
}

/// Snapshot the runtime's capabilities. Stateless and side-effect free.
pub fn optimization_info() -> CapabilityInfo {
    let hardware_concurrency = hardware_parallelism();
    CapabilityInfo {
        hardware_concurrency,
        default_max_workers: DEFAULT_MAX_WORKERS,
        effective_workers: CompositeOpts::default().worker_count(),
        global_pool_threads: rayon::current_num_threads(),
        simd_level: detect_simd_level(),
        optimized_build: !cfg!(debug_assertions),
        target_arch: std::env::consts::ARCH,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/system/probe.rs"]
mod tests;
