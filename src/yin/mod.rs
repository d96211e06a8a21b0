//! An implementation of the YIN fundamental frequency estimation algorithm,
//! described in the paper [YIN, a fundamental frequency estimator for speech and music](http://recherche.ircam.fr/equipes/pcm/cheveign/ps/2002_JASA_YIN_proof.pdf)
//! by Alain de Cheveigné and Hideki Kawahara. The algorithm is used for detecting pitch in monophonic,
//! primarily musical, sounds. It cannot be used to detect multiple pitches at once, like in a musical chord.
//!
//! The estimator works entirely in the time domain:
//! * The squared difference function is computed directly for lags up to half the frame size.
//! * The cumulative mean normalized difference (CMND) makes the function independent
//!   of signal level, so a single threshold works for loud and quiet input.
//! * The first lag with a CMND below the threshold is followed down to its local minimum.
//! * Parabolic interpolation refines the lag to sub sample precision.
//!
//! No memory is allocated apart from two scratch buffers of half the frame size on initialization.
//!
//! # Example
//! ```
//! use yin_tuner::yin::YinEstimator;
//!
//! // Create a frame containing a pure tone at 440 Hz.
//! let sample_rate = 44100.0;
//! let sine_frequency = 440.0;
//! let frame: Vec<f32> = (0..2048)
//!     .map(|i| (2.0 * core::f32::consts::PI * sine_frequency * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let mut estimator = YinEstimator::new(sample_rate, frame.len()).unwrap();
//! let estimate = estimator.estimate(&frame).unwrap();
//! assert!((estimate.frequency - sine_frequency).abs() / sine_frequency <= 0.01);
//! ```
//! # A note on probability
//! The reported probability is one minus the CMND at the selected lag. Estimates
//! with a probability below the configured probability threshold are discarded,
//! i.e [`YinEstimator::estimate`] returns `None` rather than a low quality result.

mod estimator;
mod util;

pub use estimator::{PitchEstimate, YinEstimator, DEFAULT_PROBABILITY_THRESHOLD, DEFAULT_YIN_THRESHOLD};
