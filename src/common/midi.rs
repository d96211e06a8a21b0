use core::fmt;

/// Reference pitch of A4 in Hz.
pub const A4_FREQUENCY: f32 = 440.0;
/// MIDI note number of A4.
pub const A4_NOTE_NUMBER: i32 = 69;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Converts a frequency in Hz to a [MIDI](https://en.wikipedia.org/wiki/MIDI) note number (with a fractional part).
pub fn freq_to_midi_note(freq: f32) -> f32 {
    A4_NOTE_NUMBER as f32 + 12.0 * (freq / A4_FREQUENCY).log2()
}

/// Converts a MIDI note number to its equal tempered frequency in Hz.
pub fn midi_note_to_freq(note_number: f32) -> f32 {
    A4_FREQUENCY * 2f32.powf((note_number - A4_NOTE_NUMBER as f32) / 12.0)
}

/// A frequency expressed as the nearest equal tempered note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteDatum {
    /// The mapped frequency in Hz.
    pub frequency: f32,
    /// Fractional MIDI note number.
    pub midi: f32,
    /// The MIDI note number of the nearest equal tempered note.
    pub nearest_midi: i32,
    /// Index into the chromatic scale starting at C, in `0..12`.
    pub note_index: usize,
    /// Octave in scientific pitch notation, i.e middle C is C4.
    pub octave: i32,
    /// Deviation from the nearest note in cents, in `(-50, 50]`.
    pub cents: f32,
    /// The frequency of the nearest equal tempered note in Hz.
    pub equal_frequency: f32,
}

impl NoteDatum {
    /// The note name without octave, e.g `"A#"`.
    pub fn pitch_class(&self) -> &'static str {
        NOTE_NAMES[self.note_index]
    }

    /// The note name including octave, e.g `"A#4"`.
    pub fn note_name(&self) -> String {
        format!("{}{}", self.pitch_class(), self.octave)
    }
}

impl fmt::Display for NoteDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents.round() as i32;
        let sign = if cents < 0 { "-" } else { "+" };
        write!(
            f,
            "{}{} {}{} cents ({:.2} Hz)",
            self.pitch_class(),
            self.octave,
            sign,
            cents.abs(),
            self.frequency
        )
    }
}

/// Maps a frequency to the nearest equal tempered note, referenced to A4 = 440 Hz.
/// Returns `None` if `frequency` is not finite and positive.
pub fn map_to_note(frequency: f32) -> Option<NoteDatum> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return None;
    }

    let midi = freq_to_midi_note(frequency);
    // Ties round down so that cents stays in (-50, 50].
    let nearest_midi = (midi - 0.5).ceil() as i32;
    let note_index = nearest_midi.rem_euclid(12) as usize;
    let octave = nearest_midi.div_euclid(12) - 1;
    let equal_frequency = midi_note_to_freq(nearest_midi as f32);
    let cents = 1200.0 * (frequency / equal_frequency).log2();

    Some(NoteDatum {
        frequency,
        midi,
        nearest_midi,
        note_index,
        octave,
        cents,
        equal_frequency,
    })
}
