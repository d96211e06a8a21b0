//! `[f32]` extensions.

/// Loudness of a sample frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmplitudeReading {
    /// [Root mean square](https://en.wikipedia.org/wiki/Root_mean_square) level.
    pub rms: f32,
    /// Maximum absolute sample value.
    pub peak: f32,
}

/// `[f32]` extensions.
pub trait F32ArrayExt {
    /// Returns the maximum absolute value.
    fn peak_level(&self) -> f32;
    /// Returns the maximum absolute value in dB relative to 1,
    /// i.e 0 dB corresponds to a level of 1.
    fn peak_level_db(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level.
    fn rms_level(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level in dB relative to 1, i.e 0 dB corresponds to a level of 1.
    fn rms_level_db(&self) -> f32;
    /// Computes RMS and peak level in a single pass.
    fn amplitude(&self) -> AmplitudeReading;
}

impl F32ArrayExt for [f32] {
    fn peak_level(&self) -> f32 {
        self.amplitude().peak
    }

    fn peak_level_db(&self) -> f32 {
        20. * self.peak_level().log10()
    }

    fn rms_level(&self) -> f32 {
        self.amplitude().rms
    }

    fn rms_level_db(&self) -> f32 {
        20. * self.rms_level().log10()
    }

    fn amplitude(&self) -> AmplitudeReading {
        if self.is_empty() {
            return AmplitudeReading::default();
        };

        let mut sum_of_squares: f32 = 0.;
        let mut peak: f32 = 0.;
        for sample in self.iter() {
            sum_of_squares += sample * sample;
            let value = sample.abs();
            if value > peak {
                peak = value
            }
        }

        AmplitudeReading {
            rms: (sum_of_squares / (self.len() as f32)).sqrt(),
            peak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::F32ArrayExt;

    #[test]
    fn test_empty_window() {
        let window: [f32; 0] = [];
        assert!(window.rms_level() == 0.0);
        assert!(window.peak_level() == 0.0);
    }

    #[test]
    fn test_silent_window() {
        let window = [0.0_f32; 2048];
        let reading = window.amplitude();
        assert_eq!(reading.rms, 0.0);
        assert_eq!(reading.peak, 0.0);
    }

    #[test]
    fn test_square_wave_levels() {
        // A full scale square wave has rms == peak == amplitude.
        let window: Vec<f32> = (0..64).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        let reading = window.amplitude();
        assert!((reading.rms - 0.5).abs() <= f32::EPSILON);
        assert!((reading.peak - 0.5).abs() <= f32::EPSILON);
        assert!((window.peak_level_db() + 6.0206).abs() <= 1e-3);
    }

    #[test]
    fn test_peak_uses_magnitude() {
        let window = [0.1_f32, -0.9, 0.3];
        assert!((window.peak_level() - 0.9).abs() <= f32::EPSILON);
    }
}
