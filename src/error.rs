use thiserror::Error;

/// Invalid tracker or stabilizer configuration. Returned when constructing
/// a tracker, since these values invalidate assumptions made by the algorithms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("buffer size must be a power of two, got {0}")]
    BufferSizeNotPowerOfTwo(usize),
    #[error("buffer size must be at least 8 samples, got {0}")]
    BufferTooSmall(usize),
    #[error("sample rate must be finite and positive, got {0}")]
    InvalidSampleRate(f32),
    #[error("{name} must be in [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    #[error("gain range must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidGainRange { min: f32, max: f32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("frequency range must satisfy 0 < min < max, got [{min}, {max}]")]
    InvalidFrequencyRange { min: f32, max: f32 },
    #[error("miss threshold must be at least 1, got {0}")]
    InvalidMissThreshold(u32),
}
