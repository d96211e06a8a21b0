use crate::error::ConfigError;
use crate::util::{validate_buffer_size, validate_sample_rate};

/// A provider of audio frames, e.g a capture stream from a mono input device
/// with OS level echo cancellation, noise suppression and gain control disabled.
pub trait AudioSource {
    /// Whether the source is currently delivering samples.
    fn is_active(&self) -> bool;
    /// The sample rate in Hz. Fixed for the lifetime of the source.
    fn sample_rate(&self) -> f32;
    /// The most recent frame, oldest sample first, or `None` if no complete frame
    /// is available yet.
    fn latest_frame(&self) -> Option<&[f32]>;
}

/// An [`AudioSource`] fed with chunks of arbitrary size, keeping the most
/// recent `buffer_size` samples.
pub struct RollingFrameSource {
    sample_rate: f32,
    frame: Box<[f32]>,
    /// The number of samples received, saturating at the frame size.
    received_sample_count: usize,
    active: bool,
}

impl RollingFrameSource {
    pub fn new(sample_rate: f32, buffer_size: usize) -> Result<Self, ConfigError> {
        validate_sample_rate(sample_rate)?;
        validate_buffer_size(buffer_size)?;
        Ok(RollingFrameSource {
            sample_rate,
            frame: vec![0.0; buffer_size].into_boxed_slice(),
            received_sample_count: 0,
            active: true,
        })
    }

    /// Appends `samples` to the end of the frame, discarding the oldest samples.
    pub fn push(&mut self, samples: &[f32]) {
        let frame_size = self.frame.len();
        if samples.len() >= frame_size {
            self.frame.copy_from_slice(&samples[samples.len() - frame_size..]);
        } else {
            self.frame.rotate_left(samples.len());
            self.frame[frame_size - samples.len()..].copy_from_slice(samples);
        }
        self.received_sample_count = (self.received_sample_count + samples.len()).min(frame_size);
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Forgets all received samples.
    pub fn clear(&mut self) {
        self.frame.iter_mut().for_each(|sample| *sample = 0.0);
        self.received_sample_count = 0;
    }

    pub fn buffer_size(&self) -> usize {
        self.frame.len()
    }
}

impl AudioSource for RollingFrameSource {
    fn is_active(&self) -> bool {
        self.active
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn latest_frame(&self) -> Option<&[f32]> {
        if self.received_sample_count < self.frame.len() {
            return None;
        }
        Some(&self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_not_ready_until_filled() {
        let mut source = RollingFrameSource::new(44100.0, 8).unwrap();
        assert!(source.latest_frame().is_none());
        source.push(&[1.0, 2.0, 3.0]);
        assert!(source.latest_frame().is_none());
        source.push(&[4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(source.latest_frame().unwrap(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_keeps_most_recent_samples() {
        let mut source = RollingFrameSource::new(44100.0, 8).unwrap();
        let samples: Vec<f32> = (0..20).map(|i| i as f32).collect();
        source.push(&samples[..5]);
        source.push(&samples[5..11]);
        assert_eq!(
            source.latest_frame().unwrap(),
            &[3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );

        // A chunk larger than the frame replaces it entirely.
        source.push(&samples);
        assert_eq!(
            source.latest_frame().unwrap(),
            &[12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0]
        );
    }

    #[test]
    fn test_active_and_clear() {
        let mut source = RollingFrameSource::new(48000.0, 8).unwrap();
        assert!(source.is_active());
        source.set_active(false);
        assert!(!source.is_active());

        source.push(&[1.0; 8]);
        assert!(source.latest_frame().is_some());
        source.clear();
        assert!(source.latest_frame().is_none());
    }

    #[test]
    fn test_invalid_buffer_size() {
        assert!(RollingFrameSource::new(44100.0, 100).is_err());
    }
}
