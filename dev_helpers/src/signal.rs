use std::f32::consts::PI;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A pure tone.
pub fn sine(sample_rate: f32, frequency: f32, amplitude: f32, sample_count: usize) -> Vec<f32> {
    (0..sample_count)
        .map(|i| amplitude * (2.0 * PI * frequency * (i as f32) / sample_rate).sin())
        .collect()
}

/// A harmonically rich tone roughly resembling a bowed string: the first
/// `harmonic_count` harmonics with amplitudes falling off as 1 / k, normalized
/// so the peak amplitude is about `amplitude`.
pub fn bowed_tone(
    sample_rate: f32,
    frequency: f32,
    amplitude: f32,
    harmonic_count: usize,
    sample_count: usize,
) -> Vec<f32> {
    let mut buffer = vec![0.0; sample_count];
    for k in 1..=harmonic_count {
        let harmonic_frequency = frequency * (k as f32);
        if harmonic_frequency >= 0.5 * sample_rate {
            break;
        }
        let harmonic_amplitude = 1.0 / (k as f32);
        for (i, value) in buffer.iter_mut().enumerate() {
            *value += harmonic_amplitude * (2.0 * PI * harmonic_frequency * (i as f32) / sample_rate).sin();
        }
    }

    let peak = buffer.iter().fold(0.0_f32, |max, value| max.max(value.abs()));
    if peak > 0.0 {
        let scale = amplitude / peak;
        buffer.iter_mut().for_each(|value| *value *= scale);
    }
    buffer
}

pub fn silence(sample_count: usize) -> Vec<f32> {
    vec![0.0; sample_count]
}

/// Deterministic uniform white noise in [-amplitude, amplitude].
pub fn white_noise(amplitude: f32, sample_count: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..sample_count)
        .map(|_| rng.gen_range(-amplitude..=amplitude))
        .collect()
}
