//! Replays a WAV file through a pitch tracking session at a fixed poll cadence
//! and prints the stabilized notes.
//!
//! ```text
//! cargo run --example track_wav -- violin.wav --poll-interval-ms 20
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use yin_tuner::tracker::{
    Clock, ManualClock, RollingFrameSource, Session, StabilizerConfig, StabilizerEvent, TrackerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "track_wav", about = "Track the pitch of a monophonic WAV recording")]
struct Cli {
    /// Path to the WAV file to analyze. Multichannel files are mixed down to mono.
    input: PathBuf,
    /// Interval between polls in milliseconds.
    #[arg(long, default_value_t = 20)]
    poll_interval_ms: u32,
    /// Frame size in samples. Must be a power of two.
    #[arg(long, default_value_t = 2048)]
    buffer_size: usize,
    /// Frames with a lower RMS level are treated as silence.
    #[arg(long, default_value_t = 0.01)]
    rms_threshold: f32,
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let (sample_rate, samples) = dev_helpers::read_wav(&cli.input)?;
    log::info!(
        "Read {} samples at {} Hz from {}",
        samples.len(),
        sample_rate,
        cli.input.display()
    );

    let config = TrackerConfig {
        buffer_size: cli.buffer_size,
        rms_threshold: cli.rms_threshold,
        ..TrackerConfig::default()
    };
    let source = RollingFrameSource::new(sample_rate as f32, config.buffer_size)?;
    let clock = ManualClock::new(0.0);
    let mut session = Session::new(config, StabilizerConfig::default(), source, clock.clone())?;

    let poll_interval = cli.poll_interval_ms as f64 / 1000.0;
    let hop_size = ((sample_rate as f64) * poll_interval).round().max(1.0) as usize;
    for hop in samples.chunks(hop_size) {
        session.source_mut().push(hop);
        clock.advance(poll_interval);
        match session.poll_and_stabilize() {
            Some(StabilizerEvent::Note(note)) => {
                let probability = session.last_reading().map_or(0.0, |reading| reading.probability);
                println!(
                    "t = {:7.3} s | {} | probability {:.2}",
                    clock.now_seconds(),
                    note,
                    probability
                );
            }
            Some(StabilizerEvent::LostLock) => println!("t = {:7.3} s | --", clock.now_seconds()),
            None => {}
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
