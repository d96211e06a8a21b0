#[macro_use]
extern crate lazy_static;

use std::sync::Mutex;

use yin_tuner::common::NoteDatum;
use yin_tuner::tracker::{
    ManualClock, RollingFrameSource, Session, StabilizerConfig, StabilizerEvent, TrackerConfig,
    TrackerReading,
};

const POLL_NOTHING: i32 = 0;
const POLL_NOTE: i32 = 1;
const POLL_LOST_LOCK: i32 = 2;

struct TunerWrapper {
    session: Session<RollingFrameSource, ManualClock>,
    /// A handle to the session's clock, advanced by the host.
    clock: ManualClock,
    last_note: Option<NoteDatum>,
}

lazy_static! {
    static ref TUNER_WRAPPER: Mutex<Option<TunerWrapper>> = Mutex::new(None);
}

/// Runs `f` on the running tuner, or returns `default` if there is none.
fn with_tuner<R>(default: R, f: impl FnOnce(&mut TunerWrapper) -> R) -> R {
    let mut guard = match TUNER_WRAPPER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    match guard.as_mut() {
        Some(wrapper) => f(wrapper),
        None => default,
    }
}

fn last_reading_field(f: impl FnOnce(&TrackerReading) -> f32) -> f32 {
    with_tuner(0.0, |wrapper| wrapper.session.last_reading().map_or(0.0, f))
}

fn last_note_field<R: Copy>(default: R, f: impl FnOnce(&NoteDatum) -> R) -> R {
    with_tuner(default, |wrapper| wrapper.last_note.as_ref().map(f).unwrap_or(default))
}

/// Allocates a sample buffer the host can fill and pass to [`tuner_push_samples`].
/// Must be released with [`free_f32_array`] using the same `size`.
#[no_mangle]
pub extern "C" fn allocate_f32_array(size: usize) -> *mut f32 {
    let mut buffer = vec![0.0_f32; size].into_boxed_slice();
    let ptr = buffer.as_mut_ptr();
    std::mem::forget(buffer);
    ptr
}

/// Releases a buffer returned by [`allocate_f32_array`].
#[no_mangle]
pub extern "C" fn free_f32_array(ptr: *mut f32, size: usize) {
    if ptr.is_null() {
        return;
    }
    let buffer = unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, size)) };
    drop(buffer);
}

/// Starts a new session with default settings, replacing any running one.
/// Returns false if `sample_rate` or `buffer_size` is invalid.
#[no_mangle]
pub extern "C" fn tuner_start(sample_rate: f32, buffer_size: usize) -> bool {
    let config = TrackerConfig {
        buffer_size,
        ..TrackerConfig::default()
    };
    let clock = ManualClock::new(0.0);
    let session = RollingFrameSource::new(sample_rate, buffer_size).and_then(|source| {
        Session::new(config, StabilizerConfig::default(), source, clock.clone())
    });

    let mut guard = match TUNER_WRAPPER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    match session {
        Ok(session) => {
            *guard = Some(TunerWrapper {
                session,
                clock,
                last_note: None,
            });
            true
        }
        Err(error) => {
            log::error!("Could not start tuner: {}", error);
            *guard = None;
            false
        }
    }
}

/// Stops the running session and discards all its state.
#[no_mangle]
pub extern "C" fn tuner_stop() {
    let mut guard = match TUNER_WRAPPER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = None;
}

#[no_mangle]
pub extern "C" fn tuner_set_active(active: bool) {
    with_tuner((), |wrapper| wrapper.session.source_mut().set_active(active));
}

#[no_mangle]
pub extern "C" fn tuner_push_samples(raw_buffer: *const f32, buffer_size: usize) {
    if raw_buffer.is_null() {
        return;
    }
    let buffer: &[f32] = unsafe { std::slice::from_raw_parts(raw_buffer, buffer_size) };
    with_tuner((), |wrapper| wrapper.session.source_mut().push(buffer));
}

/// Sets the time, in seconds, used for the next poll.
#[no_mangle]
pub extern "C" fn tuner_set_time(seconds: f64) {
    with_tuner((), |wrapper| wrapper.clock.set(seconds));
}

/// Analyzes the newest frame. Returns 1 if a note was detected, 2 if pitch lock
/// was just lost and 0 otherwise.
#[no_mangle]
pub extern "C" fn tuner_poll() -> i32 {
    with_tuner(POLL_NOTHING, |wrapper| match wrapper.session.poll_and_stabilize() {
        Some(StabilizerEvent::Note(note)) => {
            wrapper.last_note = Some(note);
            POLL_NOTE
        }
        Some(StabilizerEvent::LostLock) => {
            wrapper.last_note = None;
            POLL_LOST_LOCK
        }
        None => POLL_NOTHING,
    })
}

#[no_mangle]
pub extern "C" fn tuner_get_frequency() -> f32 {
    last_note_field(0.0, |note| note.frequency)
}

#[no_mangle]
pub extern "C" fn tuner_get_cents() -> f32 {
    last_note_field(0.0, |note| note.cents)
}

/// The MIDI number of the nearest note, or -1 if there is no note.
#[no_mangle]
pub extern "C" fn tuner_get_nearest_midi_note_number() -> i32 {
    last_note_field(-1, |note| note.nearest_midi)
}

#[no_mangle]
pub extern "C" fn tuner_get_rms_level() -> f32 {
    last_reading_field(|reading| reading.rms)
}

#[no_mangle]
pub extern "C" fn tuner_get_peak_level() -> f32 {
    last_reading_field(|reading| reading.peak)
}

#[no_mangle]
pub extern "C" fn tuner_get_gain() -> f32 {
    last_reading_field(|reading| reading.gain)
}
