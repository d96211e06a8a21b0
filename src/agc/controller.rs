use serde::{Deserialize, Serialize};

use crate::agc::slew::{approach, smoothing_coefficient};
use crate::error::ConfigError;
use crate::util::validate_non_negative;

/// Automatic gain control parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgcOptions {
    /// The RMS level the gain aims to normalize the signal to.
    pub target_rms: f32,
    /// Time constant of the RMS smoothing, in seconds.
    pub smoothing_time: f32,
    pub min_gain: f32,
    pub max_gain: f32,
    /// Time constant of the approach towards a new gain, in seconds.
    pub gain_slew: f32,
    /// Added to the smoothed RMS before dividing, to avoid division by zero on silence.
    pub epsilon: f32,
}

impl Default for AgcOptions {
    fn default() -> Self {
        AgcOptions {
            target_rms: 0.2,
            smoothing_time: 0.6,
            min_gain: 0.5,
            max_gain: 200.0,
            gain_slew: 0.1,
            epsilon: 1e-6,
        }
    }
}

impl AgcOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_gain > 0.0 && self.min_gain <= self.max_gain && self.max_gain.is_finite()) {
            return Err(ConfigError::InvalidGainRange {
                min: self.min_gain,
                max: self.max_gain,
            });
        }
        validate_non_negative("target rms", self.target_rms)?;
        validate_non_negative("smoothing time", self.smoothing_time)?;
        validate_non_negative("gain slew", self.gain_slew)?;
        validate_non_negative("epsilon", self.epsilon)?;
        Ok(())
    }
}

/// The mutable state of a [`GainController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainState {
    /// `None` until the first finite RMS value has been seen.
    pub smoothed_rms: Option<f32>,
    /// The gain currently in effect. Always within `[min_gain, max_gain]`.
    pub current_gain: f32,
    pub last_update_time: Option<f64>,
}

/// The output of a gain update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GainReading {
    /// The smoothed RMS level, 0 before any update.
    pub smoothed_rms: f32,
    /// The gain in effect after the update.
    pub gain: f32,
}

/// Tracks a smoothed RMS level and computes a gain that normalizes the signal
/// towards a target RMS. Gain changes are slew limited by an exponential approach
/// so the gain in effect never jumps between consecutive frames.
pub struct GainController {
    options: AgcOptions,
    state: GainState,
}

impl GainController {
    pub fn new() -> Self {
        GainController {
            options: AgcOptions::default(),
            state: GainController::initial_state(&AgcOptions::default()),
        }
    }

    pub fn from_options(options: AgcOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(GainController {
            options,
            state: GainController::initial_state(&options),
        })
    }

    fn initial_state(options: &AgcOptions) -> GainState {
        GainState {
            smoothed_rms: None,
            current_gain: 1.0_f32.clamp(options.min_gain, options.max_gain),
            last_update_time: None,
        }
    }

    /// Feeds the RMS level of a new frame observed at `now_seconds` on a monotonic clock.
    /// A non-finite `rms` leaves the state untouched and returns the last reading.
    pub fn update(&mut self, rms: f32, now_seconds: f64) -> GainReading {
        if !rms.is_finite() {
            log::trace!("Ignoring non-finite rms {}", rms);
            return self.reading();
        }

        let options = &self.options;
        let (smoothed_rms, current_gain) = match (self.state.smoothed_rms, self.state.last_update_time) {
            (Some(previous_rms), Some(last_update_time)) => {
                let dt = (now_seconds - last_update_time).max(0.0) as f32;
                let alpha = smoothing_coefficient(dt, options.smoothing_time);
                let smoothed_rms = previous_rms + alpha * (rms - previous_rms);
                let target_gain = self.desired_gain(smoothed_rms);
                let gain = approach(self.state.current_gain, target_gain, dt, options.gain_slew);
                (smoothed_rms, gain)
            }
            // The first measurement seeds both the level and the gain directly.
            // Slewing starts with the second update, once there is a time delta.
            _ => (rms, self.desired_gain(rms)),
        };

        self.state = GainState {
            smoothed_rms: Some(smoothed_rms),
            current_gain: current_gain.clamp(self.options.min_gain, self.options.max_gain),
            last_update_time: Some(now_seconds),
        };
        self.reading()
    }

    /// The gain that would bring `smoothed_rms` to the target level, clamped to the gain range.
    pub fn desired_gain(&self, smoothed_rms: f32) -> f32 {
        let options = &self.options;
        (options.target_rms / (smoothed_rms + options.epsilon)).clamp(options.min_gain, options.max_gain)
    }

    /// Multiplies `input` by the gain in effect, writing the result to `output`.
    pub fn apply(&self, input: &[f32], output: &mut [f32]) {
        if input.len() != output.len() {
            panic!("Gain input and output buffers must have the same size");
        }
        let gain = self.state.current_gain;
        for (out, sample) in output.iter_mut().zip(input.iter()) {
            *out = gain * sample;
        }
    }

    pub fn reading(&self) -> GainReading {
        GainReading {
            smoothed_rms: self.state.smoothed_rms.unwrap_or(0.0),
            gain: self.state.current_gain,
        }
    }

    pub fn state(&self) -> &GainState {
        &self.state
    }

    pub fn options(&self) -> &AgcOptions {
        &self.options
    }

    /// Discards all accumulated state.
    pub fn reset(&mut self) {
        self.state = GainController::initial_state(&self.options);
    }
}

impl Default for GainController {
    fn default() -> Self {
        GainController::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_seeds_level() {
        let mut agc = GainController::new();
        let reading = agc.update(0.05, 1.0);
        assert_eq!(reading.smoothed_rms, 0.05);
        assert!((reading.gain - 0.2 / (0.05 + 1e-6)).abs() <= 1e-3);
    }

    #[test]
    fn test_rms_convergence() {
        let smoothing_time = 0.6;
        let dt = 0.02;
        let mut agc = GainController::new();
        agc.update(0.5, 0.0);
        for step in 1..=100 {
            let now = step as f64 * dt;
            let reading = agc.update(0.1, now);
            let bound = 0.4 * (-(now as f32) / smoothing_time).exp();
            assert!((reading.smoothed_rms - 0.1).abs() <= bound + 1e-5);
        }
        assert!((agc.reading().smoothed_rms - 0.1).abs() <= 0.4 * (-2.0_f32 / 0.6).exp() + 1e-5);
    }

    #[test]
    fn test_gain_range() {
        let mut agc = GainController::new();
        let mut now = 0.0;
        for exponent in -90..10 {
            let rms = 10f32.powf(exponent as f32 / 10.0);
            let reading = agc.update(rms, now);
            assert!(reading.gain >= 0.5 && reading.gain <= 200.0);
            now += 0.02;
        }
        // Silence asks for far more than the maximum gain.
        let reading = agc.update(0.0, now + 10.0);
        assert!((reading.gain - 200.0).abs() <= 1e-3);
    }

    #[test]
    fn test_non_finite_rms_is_ignored() {
        let mut agc = GainController::new();
        let before = agc.update(0.1, 0.0);
        assert_eq!(agc.update(f32::NAN, 0.02), before);
        assert_eq!(agc.update(f32::INFINITY, 0.04), before);
        assert_eq!(agc.state().last_update_time, Some(0.0));

        let mut fresh = GainController::new();
        let reading = fresh.update(f32::NAN, 0.0);
        assert_eq!(reading.smoothed_rms, 0.0);
        assert_eq!(fresh.state().smoothed_rms, None);
    }

    #[test]
    fn test_coincident_timestamps() {
        let mut agc = GainController::new();
        agc.update(0.1, 1.0);
        let gain_before = agc.reading().gain;
        // The level takes the new value at once but the gain cannot move in zero time.
        let reading = agc.update(0.4, 1.0);
        assert!((reading.smoothed_rms - 0.4).abs() <= 1e-6);
        assert_eq!(reading.gain, gain_before);
    }

    #[test]
    fn test_gain_is_slew_limited() {
        let mut agc = GainController::new();
        agc.update(0.2, 0.0);
        assert!((agc.reading().gain - 1.0).abs() <= 1e-3);

        // A sudden drop in level raises the target gain to 2, reached gradually.
        let mut now = 0.0;
        let mut previous_gain = agc.reading().gain;
        for _ in 0..5 {
            now += 0.02;
            let reading = agc.update(0.1, now);
            assert!(reading.gain > previous_gain);
            assert!(reading.gain < agc.desired_gain(reading.smoothed_rms));
            previous_gain = reading.gain;
        }
    }

    #[test]
    fn test_apply_and_reset() {
        let mut agc = GainController::new();
        agc.update(0.1, 0.0);
        let input = [0.1_f32, -0.2, 0.0];
        let mut output = [0.0_f32; 3];
        agc.apply(&input, &mut output);
        let gain = agc.reading().gain;
        assert!((output[1] - gain * -0.2).abs() <= f32::EPSILON);

        agc.reset();
        assert_eq!(agc.state().smoothed_rms, None);
        assert_eq!(agc.reading().gain, 1.0);
    }

    #[test]
    fn test_invalid_options() {
        let options = AgcOptions {
            min_gain: 10.0,
            max_gain: 1.0,
            ..AgcOptions::default()
        };
        assert!(matches!(
            GainController::from_options(options),
            Err(ConfigError::InvalidGainRange { .. })
        ));
        let options = AgcOptions {
            smoothing_time: -1.0,
            ..AgcOptions::default()
        };
        assert!(matches!(
            GainController::from_options(options),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }
}
