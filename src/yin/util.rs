/// Computes the squared difference function, step 2 of the YIN paper,
/// `d[tau] = sum_{i=0}^{H-1} (x[i] - x[i + tau])^2` for `tau` in `0..H`,
/// where `H` is the length of `result`. `d[0]` is zero.
pub(crate) fn difference(window: &[f32], result: &mut [f32]) {
    let half = result.len();
    if window.len() < 2 * half {
        panic!("Window must hold at least twice as many samples as the difference buffer");
    }

    result[0] = 0.0;
    for tau in 1..half {
        let mut sum: f32 = 0.0;
        for (a, b) in window[..half].iter().zip(window[tau..tau + half].iter()) {
            let delta = a - b;
            sum += delta * delta;
        }
        result[tau] = sum;
    }
}

/// Computes the cumulative mean normalized difference, step 3 of the YIN paper.
/// `cmnd[0]` is 1 and lags where the running sum is still zero also map to 1.
pub(crate) fn cumulative_mean_normalized_difference(difference: &[f32], result: &mut [f32]) {
    if difference.len() != result.len() {
        panic!("Difference and CMND buffers must have the same length");
    }
    if result.is_empty() {
        return;
    }

    result[0] = 1.0;
    let mut running_sum: f32 = 0.0;
    for tau in 1..result.len() {
        running_sum += difference[tau];
        result[tau] = if running_sum != 0.0 {
            difference[tau] * (tau as f32) / running_sum
        } else {
            1.0
        };
    }
}

/// Absolute threshold search, step 4 of the YIN paper. Returns the lag of
/// the local minimum following the first CMND value below `threshold`,
/// starting at lag 2.
pub(crate) fn absolute_threshold(cmnd: &[f32], threshold: f32) -> Option<usize> {
    let len = cmnd.len();
    let mut tau = 2;
    while tau < len {
        if cmnd[tau] < threshold {
            while tau + 1 < len && cmnd[tau + 1] < cmnd[tau] {
                tau += 1;
            }
            return Some(tau);
        }
        tau += 1;
    }
    None
}

/// Refines an integer lag to sub sample precision using the vertex of
/// the parabola passing through the CMND values at `tau - 1`, `tau` and `tau + 1`.
/// Falls back to `tau` at the buffer edges or if the vertex is not finite.
pub(crate) fn parabolic_interpolation(cmnd: &[f32], tau: usize) -> f32 {
    if tau == 0 || tau + 1 >= cmnd.len() {
        return tau as f32;
    }

    let left = cmnd[tau - 1];
    let center = cmnd[tau];
    let right = cmnd[tau + 1];
    let refined = (tau as f32) + (right - left) / (2.0 * (2.0 * center - right - left));
    if refined.is_finite() {
        refined
    } else {
        tau as f32
    }
}
