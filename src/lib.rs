//! Real time pitch tracking of monophonic sources, such as a sustained violin note.
//!
//! Fundamental frequency is estimated with the time domain [YIN](yin) algorithm,
//! described in the paper [YIN, a fundamental frequency estimator for speech and music](http://recherche.ircam.fr/equipes/pcm/cheveign/ps/2002_JASA_YIN_proof.pdf).
//! It cannot be used to detect multiple pitches at once, like in a musical chord.
//!
//! Features
//! * Amplitude gating, so silent frames never reach the estimator.
//! * [Automatic gain control](agc) with exponential level smoothing and slew limited gain.
//! * Temporal stabilization of the estimates: range clamping, jump rejection and
//!   loss of lock detection after consecutive dropouts.
//! * Conversion to equal tempered notes with cent deviations.
//! * No allocations after initialization when polling, suitable for real time use.
//!
//! The [`tracker`] module is the main entry point. Audio acquisition and rendering are
//! left to the host, which provides frames through [`tracker::AudioSource`] and polls a
//! [`tracker::Session`] on a fixed cadence.

pub mod agc;
pub mod common;
mod error;
pub mod tracker;
mod util;
pub mod yin;

pub use error::ConfigError;
