/// Moves `current` towards `target` along an exponential approach with time
/// constant `time_constant` seconds, after `dt` seconds have elapsed.
///
/// A non-positive time constant jumps straight to the target and a
/// non-positive `dt` leaves `current` unchanged.
pub fn approach(current: f32, target: f32, dt: f32, time_constant: f32) -> f32 {
    if time_constant <= 0.0 {
        return target;
    }
    if dt <= 0.0 {
        return current;
    }
    current + (target - current) * smoothing_coefficient(dt, time_constant)
}

/// The fraction of the remaining distance covered by an exponential approach
/// with time constant `time_constant` during `dt` seconds, i.e `1 - exp(-dt / time_constant)`.
/// Coincident timestamps (`dt == 0`) and a zero time constant both give 1, a full update.
pub fn smoothing_coefficient(dt: f32, time_constant: f32) -> f32 {
    if dt <= 0.0 || time_constant <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt / time_constant).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_time_constant() {
        let value = approach(0.0, 1.0, 0.1, 0.1);
        assert!((value - (1.0 - (-1.0_f32).exp())).abs() <= 1e-6);
    }

    #[test]
    fn test_split_steps_match_single_step() {
        // Two steps of dt/2 end up where a single step of dt does.
        let single = approach(10.0, 2.0, 0.05, 0.1);
        let half = approach(10.0, 2.0, 0.025, 0.1);
        let double = approach(half, 2.0, 0.025, 0.1);
        assert!((single - double).abs() <= 1e-5);
    }

    #[test]
    fn test_degenerate_arguments() {
        assert_eq!(approach(3.0, 5.0, 0.0, 0.1), 3.0);
        assert_eq!(approach(3.0, 5.0, -1.0, 0.1), 3.0);
        assert_eq!(approach(3.0, 5.0, 0.01, 0.0), 5.0);
        assert_eq!(smoothing_coefficient(0.0, 0.6), 1.0);
    }

    #[test]
    fn test_never_overshoots() {
        let mut value = 1.0;
        for _ in 0..1000 {
            value = approach(value, 200.0, 0.02, 0.1);
            assert!(value <= 200.0);
        }
        assert!((value - 200.0).abs() <= 1e-3);
    }
}
