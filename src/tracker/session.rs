use crate::error::ConfigError;
use crate::tracker::clock::Clock;
use crate::tracker::config::{StabilizerConfig, TrackerConfig};
use crate::tracker::engine::{PitchTracker, TrackerReading};
use crate::tracker::source::AudioSource;
use crate::tracker::stabilizer::{Stabilizer, StabilizerEvent};

/// A pitch tracking session. Owns all gain and stabilizer state, which lives from
/// creation until [`reset`](Session::reset) or until the session is dropped.
///
/// Not reentrant: meant to be polled from a single thread by a fixed cadence
/// scheduler, e.g every 20 ms.
pub struct Session<S: AudioSource, C: Clock> {
    tracker: PitchTracker<S, C>,
    stabilizer: Stabilizer,
    last_reading: Option<TrackerReading>,
}

impl<S: AudioSource, C: Clock> Session<S, C> {
    pub fn new(
        tracker_config: TrackerConfig,
        stabilizer_config: StabilizerConfig,
        source: S,
        clock: C,
    ) -> Result<Self, ConfigError> {
        let tracker = PitchTracker::new(tracker_config, source, clock)?;
        let stabilizer = Stabilizer::new(stabilizer_config)?;
        log::info!("Started pitch tracking session");
        Ok(Session {
            tracker,
            stabilizer,
            last_reading: None,
        })
    }

    /// Analyzes the newest frame without stabilization.
    pub fn poll(&mut self) -> Option<TrackerReading> {
        let reading = self.tracker.poll();
        if reading.is_some() {
            self.last_reading = reading;
        }
        reading
    }

    /// Analyzes the newest frame and passes the reading through the stabilizer.
    /// Returns `None` when there is nothing new to report: the source is inactive,
    /// the reading was discarded, or a miss did not complete a loss of lock.
    pub fn poll_and_stabilize(&mut self) -> Option<StabilizerEvent> {
        let now = self.tracker.clock().now_seconds();
        let reading = self.tracker.poll_at(now)?;
        self.last_reading = Some(reading);
        self.stabilizer.process(reading.frequency, now)
    }

    /// Discards all gain and stabilizer state.
    pub fn reset(&mut self) {
        log::info!("Reset pitch tracking session");
        self.tracker.reset();
        self.stabilizer.reset();
        self.last_reading = None;
    }

    /// The reading produced by the most recent poll that had a frame to analyze.
    pub fn last_reading(&self) -> Option<&TrackerReading> {
        self.last_reading.as_ref()
    }

    pub fn tracker(&self) -> &PitchTracker<S, C> {
        &self.tracker
    }

    pub fn stabilizer(&self) -> &Stabilizer {
        &self.stabilizer
    }

    pub fn source(&self) -> &S {
        self.tracker.source()
    }

    pub fn source_mut(&mut self) -> &mut S {
        self.tracker.source_mut()
    }

    pub fn clock(&self) -> &C {
        self.tracker.clock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::clock::ManualClock;
    use crate::tracker::source::RollingFrameSource;

    const SAMPLE_RATE: f32 = 48000.0;

    fn create_session() -> (Session<RollingFrameSource, ManualClock>, ManualClock) {
        let tracker_config = TrackerConfig::default();
        let source = RollingFrameSource::new(SAMPLE_RATE, tracker_config.buffer_size).unwrap();
        let clock = ManualClock::new(0.0);
        let session = Session::new(tracker_config, StabilizerConfig::default(), source, clock.clone()).unwrap();
        (session, clock)
    }

    fn generate_sine(frequency: f32, sample_count: usize) -> Vec<f32> {
        (0..sample_count)
            .map(|i| 0.3 * (2.0 * core::f32::consts::PI * frequency * (i as f32) / SAMPLE_RATE).sin())
            .collect()
    }

    #[test]
    fn test_note_then_lost_lock() {
        let (mut session, clock) = create_session();
        session.source_mut().push(&generate_sine(440.0, 2048));
        match session.poll_and_stabilize() {
            Some(StabilizerEvent::Note(note)) => {
                assert_eq!(note.note_name(), "A4");
                assert!(note.cents.abs() <= 17.0);
            }
            other => panic!("Expected a note, got {:?}", other),
        }

        session.source_mut().push(&vec![0.0; 2048]);
        let mut events = Vec::new();
        for _ in 0..5 {
            clock.advance(0.02);
            events.push(session.poll_and_stabilize());
        }
        assert_eq!(events, vec![None, None, None, Some(StabilizerEvent::LostLock), None]);
        assert_eq!(session.last_reading().unwrap().frequency, None);
    }

    #[test]
    fn test_inactive_source_leaves_stabilizer_alone() {
        let (mut session, clock) = create_session();
        session.source_mut().push(&vec![0.0; 2048]);
        session.poll_and_stabilize();
        assert_eq!(session.stabilizer().state().miss_counter, 1);

        session.source_mut().set_active(false);
        for _ in 0..10 {
            clock.advance(0.02);
            assert_eq!(session.poll_and_stabilize(), None);
        }
        assert_eq!(session.stabilizer().state().miss_counter, 1);
    }

    #[test]
    fn test_poll_does_not_stabilize() {
        let (mut session, _) = create_session();
        session.source_mut().push(&generate_sine(659.25, 2048));
        let reading = session.poll().unwrap();
        assert!(reading.frequency.is_some());
        assert_eq!(session.stabilizer().state().last_accepted_frequency, None);
    }

    #[test]
    fn test_reset() {
        let (mut session, _) = create_session();
        session.source_mut().push(&generate_sine(440.0, 2048));
        session.poll_and_stabilize();
        session.reset();
        assert!(session.last_reading().is_none());
        assert_eq!(session.stabilizer().state().last_accepted_frequency, None);
        assert_eq!(session.tracker().gain_controller().state().smoothed_rms, None);
    }
}
