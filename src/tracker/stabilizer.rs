use crate::common::{map_to_note, NoteDatum};
use crate::error::ConfigError;
use crate::tracker::config::StabilizerConfig;

/// Something downstream consumers should react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StabilizerEvent {
    /// A validated pitch.
    Note(NoteDatum),
    /// No pitch has been detected for `miss_threshold` consecutive readings.
    /// Emitted once per loss.
    LostLock,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StabilizerState {
    /// The number of consecutive readings without pitch.
    pub miss_counter: u32,
    pub last_accepted_frequency: Option<f32>,
    pub last_accepted_time: Option<f64>,
}

/// Validates a stream of per frame pitch readings polled at a fixed cadence.
///
/// Each reading passes through three gates in order: readings without pitch are
/// counted as misses, frequencies are clamped to the valid range, and frequencies
/// that jump too far from the last accepted one too soon after it are discarded.
/// A discarded reading is neither a miss nor an acceptance.
pub struct Stabilizer {
    config: StabilizerConfig,
    state: StabilizerState,
}

impl Stabilizer {
    pub fn new(config: StabilizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Stabilizer {
            config,
            state: StabilizerState::default(),
        })
    }

    /// Processes the frequency of one reading observed at `now_seconds`.
    pub fn process(&mut self, frequency: Option<f32>, now_seconds: f64) -> Option<StabilizerEvent> {
        match frequency {
            Some(frequency) if frequency.is_finite() && frequency > 0.0 => {
                self.process_frequency(frequency, now_seconds)
            }
            _ => self.process_miss(),
        }
    }

    fn process_miss(&mut self) -> Option<StabilizerEvent> {
        self.state.miss_counter = self.state.miss_counter.saturating_add(1);
        if self.state.miss_counter != self.config.miss_threshold {
            return None;
        }

        log::info!("Lost pitch lock after {} misses", self.state.miss_counter);
        Some(StabilizerEvent::LostLock)
    }

    fn process_frequency(&mut self, frequency: f32, now_seconds: f64) -> Option<StabilizerEvent> {
        let frequency = frequency.clamp(self.config.min_valid_freq, self.config.max_valid_freq);

        if let (Some(last_frequency), Some(last_time)) =
            (self.state.last_accepted_frequency, self.state.last_accepted_time)
        {
            let elapsed_ms = (now_seconds - last_time) * 1000.0;
            let jump = (frequency - last_frequency).abs();
            if elapsed_ms < self.config.max_gap_ms as f64 && jump > self.config.max_jump_hz {
                log::debug!(
                    "Discarded jump of {:.1} Hz after {:.0} ms ({:.1} -> {:.1} Hz)",
                    jump,
                    elapsed_ms,
                    last_frequency,
                    frequency
                );
                return None;
            }
        }

        self.state.miss_counter = 0;
        self.state.last_accepted_frequency = Some(frequency);
        self.state.last_accepted_time = Some(now_seconds);
        map_to_note(frequency).map(StabilizerEvent::Note)
    }

    /// Discards all state, e.g when a session is stopped.
    pub fn reset(&mut self) {
        self.state = StabilizerState::default();
    }

    pub fn state(&self) -> &StabilizerState {
        &self.state
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }
}
