//! Automatic gain control.
//!
//! The controller keeps an exponentially smoothed RMS level and derives the gain that
//! brings it to a target level. The gain in effect follows that target through a
//! discrete time exponential approach, recomputed on every update from the elapsed time,
//! so it never steps between frames.

mod controller;
mod slew;

pub use controller::{AgcOptions, GainController, GainReading, GainState};
pub use slew::{approach, smoothing_coefficient};
