use serde::{Deserialize, Serialize};

use crate::agc::AgcOptions;
use crate::error::ConfigError;
use crate::util::{validate_buffer_size, validate_non_negative, validate_unit_interval};
use crate::yin::{DEFAULT_PROBABILITY_THRESHOLD, DEFAULT_YIN_THRESHOLD};

/// Pitch tracking engine options, fixed for the lifetime of a session.
///
/// Field names serialize in camelCase and every field falls back to its
/// default, so hosts may provide partial configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// The number of samples per analyzed frame. Must be a power of two.
    pub buffer_size: usize,
    /// CMND threshold for the YIN absolute threshold search.
    pub yin_threshold: f32,
    /// Estimates with a lower probability are reported as no pitch.
    pub probability_threshold: f32,
    /// Frames with a lower RMS level skip pitch estimation entirely.
    pub rms_threshold: f32,
    pub target_rms: f32,
    /// Seconds.
    pub smoothing_time: f32,
    pub min_gain: f32,
    pub max_gain: f32,
    /// Seconds.
    pub gain_slew: f32,
    pub epsilon: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let agc = AgcOptions::default();
        TrackerConfig {
            buffer_size: 2048,
            yin_threshold: DEFAULT_YIN_THRESHOLD,
            probability_threshold: DEFAULT_PROBABILITY_THRESHOLD,
            rms_threshold: 0.01,
            target_rms: agc.target_rms,
            smoothing_time: agc.smoothing_time,
            min_gain: agc.min_gain,
            max_gain: agc.max_gain,
            gain_slew: agc.gain_slew,
            epsilon: agc.epsilon,
        }
    }
}

impl TrackerConfig {
    pub fn agc_options(&self) -> AgcOptions {
        AgcOptions {
            target_rms: self.target_rms,
            smoothing_time: self.smoothing_time,
            min_gain: self.min_gain,
            max_gain: self.max_gain,
            gain_slew: self.gain_slew,
            epsilon: self.epsilon,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_buffer_size(self.buffer_size)?;
        validate_unit_interval("yin threshold", self.yin_threshold)?;
        validate_unit_interval("probability threshold", self.probability_threshold)?;
        validate_non_negative("rms threshold", self.rms_threshold)?;
        self.agc_options().validate()
    }
}

/// Temporal stabilizer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StabilizerConfig {
    /// Accepted frequencies are clamped to `[min_valid_freq, max_valid_freq]` Hz.
    pub min_valid_freq: f32,
    pub max_valid_freq: f32,
    /// Readings further than this from the last accepted frequency are discarded,
    /// unless more than `max_gap_ms` has passed since it was accepted.
    pub max_jump_hz: f32,
    pub max_gap_ms: f32,
    /// The number of consecutive frames without pitch after which lock is lost.
    pub miss_threshold: u32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        StabilizerConfig {
            min_valid_freq: 180.0,
            max_valid_freq: 4000.0,
            max_jump_hz: 200.0,
            max_gap_ms: 250.0,
            miss_threshold: 4,
        }
    }
}

impl StabilizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_valid_freq, self.max_valid_freq);
        if !(min > 0.0 && min < max && max.is_finite()) {
            return Err(ConfigError::InvalidFrequencyRange { min, max });
        }
        validate_non_negative("max jump", self.max_jump_hz)?;
        validate_non_negative("max gap", self.max_gap_ms)?;
        if self.miss_threshold == 0 {
            return Err(ConfigError::InvalidMissThreshold(self.miss_threshold));
        }
        Ok(())
    }
}
