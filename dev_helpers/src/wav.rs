use std::path::Path;

/// Reads a WAV file, mixing all channels down to mono. Returns the sample rate and the samples.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(u32, Vec<f32>), hound::Error> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = 1. / ((1_i64 << (spec.bits_per_sample - 1)) as f32);
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 * scale))
                .collect::<Result<_, _>>()?
        }
    };

    let channel_count = spec.channels.max(1) as usize;
    let samples = interleaved
        .chunks(channel_count)
        .map(|frame| frame.iter().sum::<f32>() / (frame.len() as f32))
        .collect();
    Ok((spec.sample_rate, samples))
}

/// Writes mono samples as a 16 bit WAV file, clamping to [-1, 1].
pub fn write_wav<P: AsRef<Path>>(path: P, sample_rate: u32, buffer: &[f32]) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    let amplitude = i16::MAX as f32;
    for sample in buffer.iter() {
        let clamped_sample = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped_sample * amplitude) as i16)?;
    }
    writer.finalize()
}
