//! Common algorithms and utilities.

mod f32_array_ext;
mod midi;

pub use f32_array_ext::{AmplitudeReading, F32ArrayExt};
pub use midi::{freq_to_midi_note, map_to_note, midi_note_to_freq, NoteDatum, A4_FREQUENCY, A4_NOTE_NUMBER};
