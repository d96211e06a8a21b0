//! Real time pitch tracking.
//!
//! A [`PitchTracker`] analyzes the newest frame of an [`AudioSource`] each time it is polled:
//! * Frames with an RMS level below `rms_threshold` are reported as silent without
//!   running the pitch estimator.
//! * A [`GainController`](crate::agc::GainController) follows the signal level and keeps a
//!   normalized copy of the frame.
//! * The [YIN estimator](crate::yin) produces a frequency and a probability.
//!
//! A [`Stabilizer`] turns the resulting stream of readings into validated notes,
//! and a [`Session`] ties the two together with a single [`Clock`].
//!
//! # Example
//! ```
//! use yin_tuner::tracker::{
//!     ManualClock, RollingFrameSource, Session, StabilizerConfig, StabilizerEvent, TrackerConfig,
//! };
//!
//! let sample_rate = 44100.0;
//! let config = TrackerConfig::default();
//! let source = RollingFrameSource::new(sample_rate, config.buffer_size).unwrap();
//! let clock = ManualClock::new(0.0);
//! let mut session = Session::new(config, StabilizerConfig::default(), source, clock.clone()).unwrap();
//!
//! // Deliver a chunk of captured audio, a 440 Hz tone here.
//! let chunk: Vec<f32> = (0..4096)
//!     .map(|i| 0.2 * (2.0 * core::f32::consts::PI * 440.0 * (i as f32) / sample_rate).sin())
//!     .collect();
//! session.source_mut().push(&chunk);
//!
//! // Poll on a fixed cadence.
//! clock.advance(0.02);
//! if let Some(StabilizerEvent::Note(note)) = session.poll_and_stabilize() {
//!     assert_eq!(note.note_name(), "A4");
//! }
//! ```

mod clock;
mod config;
mod engine;
mod session;
mod source;
mod stabilizer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{StabilizerConfig, TrackerConfig};
pub use engine::{PitchTracker, TrackerReading};
pub use session::Session;
pub use source::{AudioSource, RollingFrameSource};
pub use stabilizer::{Stabilizer, StabilizerEvent, StabilizerState};
