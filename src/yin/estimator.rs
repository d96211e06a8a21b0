use crate::error::ConfigError;
use crate::util::{validate_buffer_size, validate_sample_rate, validate_unit_interval};
use crate::yin::util::{
    absolute_threshold, cumulative_mean_normalized_difference, difference,
    parabolic_interpolation,
};

/// Default CMND threshold used by the absolute threshold search.
pub const DEFAULT_YIN_THRESHOLD: f32 = 0.1;
/// Default minimum probability for an estimate to be reported.
pub const DEFAULT_PROBABILITY_THRESHOLD: f32 = 0.15;

/// A fundamental frequency estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchEstimate {
    /// The estimated fundamental frequency in Hz. Always finite and positive.
    pub frequency: f32,
    /// `1 - cmnd[tau]` at the selected integer lag, in `[0, 1]`.
    pub probability: f32,
    /// The estimated period in samples, refined to sub sample precision.
    pub period: f32,
}

/// Estimates the fundamental frequency of fixed size sample frames.
///
/// Keeps preallocated scratch buffers of half the frame size, so no memory is
/// allocated after construction. Apart from these buffers no state is carried
/// between calls to [`estimate`](YinEstimator::estimate), which means that
/// estimating the same frame twice gives identical results.
pub struct YinEstimator {
    sample_rate: f32,
    buffer_size: usize,
    threshold: f32,
    probability_threshold: f32,
    difference: Box<[f32]>,
    cmnd: Box<[f32]>,
}

impl YinEstimator {
    pub fn new(sample_rate: f32, buffer_size: usize) -> Result<Self, ConfigError> {
        YinEstimator::from_options(
            sample_rate,
            buffer_size,
            DEFAULT_YIN_THRESHOLD,
            DEFAULT_PROBABILITY_THRESHOLD,
        )
    }

    pub fn from_options(
        sample_rate: f32,
        buffer_size: usize,
        threshold: f32,
        probability_threshold: f32,
    ) -> Result<Self, ConfigError> {
        validate_sample_rate(sample_rate)?;
        validate_buffer_size(buffer_size)?;
        validate_unit_interval("yin threshold", threshold)?;
        validate_unit_interval("probability threshold", probability_threshold)?;

        let half = buffer_size / 2;
        Ok(YinEstimator {
            sample_rate,
            buffer_size,
            threshold,
            probability_threshold,
            difference: vec![0.0; half].into_boxed_slice(),
            cmnd: vec![0.0; half].into_boxed_slice(),
        })
    }

    /// Estimates the fundamental frequency of `frame`, which must contain
    /// exactly `buffer_size` samples. Returns `None` if no periodic structure
    /// was found or if the probability is below the probability threshold.
    pub fn estimate(&mut self, frame: &[f32]) -> Option<PitchEstimate> {
        if frame.len() != self.buffer_size {
            panic!(
                "Got frame of length {}, expected {}",
                frame.len(),
                self.buffer_size
            )
        }

        difference(frame, &mut self.difference);
        cumulative_mean_normalized_difference(&self.difference, &mut self.cmnd);

        let tau = absolute_threshold(&self.cmnd, self.threshold)?;
        let probability = (1.0 - self.cmnd[tau]).clamp(0.0, 1.0);
        if probability < self.probability_threshold {
            log::debug!(
                "Rejected estimate at lag {} with probability {:.3} (threshold {:.3})",
                tau,
                probability,
                self.probability_threshold
            );
            return None;
        }

        let period = parabolic_interpolation(&self.cmnd, tau);
        let frequency = self.sample_rate / period;
        if !frequency.is_finite() || frequency <= 0.0 {
            return None;
        }

        Some(PitchEstimate {
            frequency,
            probability,
            period,
        })
    }

    /// The cumulative mean normalized difference computed by the most recent call to
    /// [`estimate`](YinEstimator::estimate).
    pub fn cmnd(&self) -> &[f32] {
        &self.cmnd
    }

    /// Returns the fixed number of samples in a frame.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn probability_threshold(&self) -> f32 {
        self.probability_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_sine(sample_rate: f32, frequency: f32, sample_count: usize) -> Vec<f32> {
        (0..sample_count)
            .map(|i| (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_sine_detection() {
        let sample_rate: f32 = 44100.0;
        let buffer_size = 2048;
        let mut estimator = YinEstimator::new(sample_rate, buffer_size).unwrap();

        for frequency in [180.0_f32, 196.0, 293.66, 440.0, 659.25, 1318.5, 2637.0, 4000.0] {
            let frame = generate_sine(sample_rate, frequency, buffer_size);
            let estimate = estimator.estimate(&frame).unwrap();
            assert!((estimate.frequency - frequency).abs() / frequency <= 0.01);
            assert!(estimate.probability > DEFAULT_PROBABILITY_THRESHOLD);
        }
    }

    #[test]
    fn test_quiet_sine_detection() {
        // The CMND is independent of the signal level.
        let mut estimator = YinEstimator::new(48000.0, 2048).unwrap();
        let frame: Vec<f32> = generate_sine(48000.0, 523.25, 2048).iter().map(|s| 0.001 * s).collect();
        let estimate = estimator.estimate(&frame).unwrap();
        assert!((estimate.frequency - 523.25).abs() / 523.25 <= 0.01);
    }

    #[test]
    fn test_silence() {
        let mut estimator = YinEstimator::new(44100.0, 1024).unwrap();
        let frame = vec![0.0; 1024];
        assert!(estimator.estimate(&frame).is_none());
        assert!(estimator.cmnd().iter().all(|v| *v == 1.0));
    }

    #[test]
    fn test_probability_threshold_rejects() {
        // A probability threshold of 1 can only be met by a perfect period.
        let sample_rate = 44100.0;
        let mut estimator = YinEstimator::from_options(sample_rate, 2048, 0.5, 1.0).unwrap();
        let frame = generate_sine(sample_rate, 441.7, 2048);
        assert!(estimator.estimate(&frame).is_none());
    }

    #[test]
    fn test_identical_results() {
        let mut estimator = YinEstimator::new(44100.0, 2048).unwrap();
        let frame = generate_sine(44100.0, 987.77, 2048);
        let first = estimator.estimate(&frame).unwrap();
        let second = estimator.estimate(&frame).unwrap();
        assert_eq!(first.frequency.to_bits(), second.frequency.to_bits());
        assert_eq!(first.probability.to_bits(), second.probability.to_bits());
    }

    #[test]
    fn test_invalid_options() {
        assert_eq!(
            YinEstimator::new(44100.0, 1000).err(),
            Some(ConfigError::BufferSizeNotPowerOfTwo(1000))
        );
        assert_eq!(YinEstimator::new(44100.0, 4).err(), Some(ConfigError::BufferTooSmall(4)));
        assert_eq!(YinEstimator::new(0.0, 2048).err(), Some(ConfigError::InvalidSampleRate(0.0)));
        assert!(matches!(
            YinEstimator::from_options(44100.0, 2048, 1.5, 0.15),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }

    #[test]
    #[should_panic]
    fn test_wrong_frame_length() {
        let mut estimator = YinEstimator::new(44100.0, 2048).unwrap();
        let frame = vec![0.0; 1024];
        estimator.estimate(&frame);
    }
}
