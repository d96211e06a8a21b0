use crate::agc::GainController;
use crate::common::F32ArrayExt;
use crate::error::ConfigError;
use crate::tracker::clock::Clock;
use crate::tracker::config::TrackerConfig;
use crate::tracker::source::AudioSource;
use crate::yin::YinEstimator;

/// The per frame output of a [`PitchTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerReading {
    /// The detected fundamental frequency in Hz, or `None` if the frame was
    /// gated as silent or no confident pitch was found.
    pub frequency: Option<f32>,
    /// Estimate probability, 0 when `frequency` is `None`.
    pub probability: f32,
    pub rms: f32,
    pub peak: f32,
    pub smoothed_rms: f32,
    pub gain: f32,
}

/// Runs amplitude analysis, gain control and pitch estimation on the newest
/// frame of an [`AudioSource`].
pub struct PitchTracker<S: AudioSource, C: Clock> {
    config: TrackerConfig,
    source: S,
    clock: C,
    agc: GainController,
    estimator: YinEstimator,
    /// The latest frame with the gain in effect applied.
    normalized_frame: Box<[f32]>,
    analyzed_frame_count: usize,
}

impl<S: AudioSource, C: Clock> PitchTracker<S, C> {
    pub fn new(config: TrackerConfig, source: S, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let estimator = YinEstimator::from_options(
            source.sample_rate(),
            config.buffer_size,
            config.yin_threshold,
            config.probability_threshold,
        )?;
        let agc = GainController::from_options(config.agc_options())?;
        log::debug!(
            "Created pitch tracker, buffer size {}, sample rate {} Hz",
            config.buffer_size,
            source.sample_rate()
        );

        Ok(PitchTracker {
            normalized_frame: vec![0.0; config.buffer_size].into_boxed_slice(),
            config,
            source,
            clock,
            agc,
            estimator,
            analyzed_frame_count: 0,
        })
    }

    /// Analyzes the newest frame at the current time of the tracker's clock.
    pub fn poll(&mut self) -> Option<TrackerReading> {
        let now = self.clock.now_seconds();
        self.poll_at(now)
    }

    /// Analyzes the newest frame, using `now_seconds` as the time of the analysis.
    /// Returns `None` if the source is inactive or has no complete frame.
    pub fn poll_at(&mut self, now_seconds: f64) -> Option<TrackerReading> {
        if !self.source.is_active() {
            return None;
        }
        let frame = self.source.latest_frame()?;
        if frame.len() != self.config.buffer_size {
            log::warn!(
                "Ignoring frame of length {}, expected {}",
                frame.len(),
                self.config.buffer_size
            );
            return None;
        }

        let amplitude = frame.amplitude();
        let gain = self.agc.update(amplitude.rms, now_seconds);
        self.agc.apply(frame, &mut self.normalized_frame);

        let mut reading = TrackerReading {
            frequency: None,
            probability: 0.0,
            rms: amplitude.rms,
            peak: amplitude.peak,
            smoothed_rms: gain.smoothed_rms,
            gain: gain.gain,
        };

        if amplitude.rms < self.config.rms_threshold {
            log::trace!(
                "Gated frame with rms {:.5} below {:.5}",
                amplitude.rms,
                self.config.rms_threshold
            );
            return Some(reading);
        }

        self.analyzed_frame_count += 1;
        if let Some(estimate) = self.estimator.estimate(frame) {
            reading.frequency = Some(estimate.frequency);
            reading.probability = estimate.probability;
        }
        Some(reading)
    }

    /// Discards all gain state.
    pub fn reset(&mut self) {
        self.agc.reset();
        self.normalized_frame.iter_mut().for_each(|sample| *sample = 0.0);
    }

    /// The latest analyzed frame multiplied by the gain in effect.
    pub fn normalized_frame(&self) -> &[f32] {
        &self.normalized_frame
    }

    /// Returns the number of frames passed to the pitch estimator since the
    /// tracker was created. Frames gated as silent are not counted.
    pub fn analyzed_frame_count(&self) -> usize {
        self.analyzed_frame_count
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn estimator(&self) -> &YinEstimator {
        &self.estimator
    }

    pub fn gain_controller(&self) -> &GainController {
        &self.agc
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
