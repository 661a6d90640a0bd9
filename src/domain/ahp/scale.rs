//! Saaty judgment scale and Random Index table.

use tracing::debug;

/// The discrete Saaty scale `{1/9, ..., 1/2, 1, 2, ..., 9}`, ascending.
pub const SAATY_SCALE: [f64; 17] = [
    1.0 / 9.0,
    1.0 / 8.0,
    1.0 / 7.0,
    1.0 / 6.0,
    1.0 / 5.0,
    1.0 / 4.0,
    1.0 / 3.0,
    1.0 / 2.0,
    1.0,
    2.0,
    3.0,
    4.0,
    5.0,
    6.0,
    7.0,
    8.0,
    9.0,
];

/// Saaty's Random Index for n = 1..=15 (index 0 is n = 1).
pub const RANDOM_INDEX: [f64; 15] = [
    0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

/// Acceptability threshold for the consistency ratio.
pub const CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Returns the Random Index for an `n`x`n` matrix.
///
/// Sizes beyond the table reuse the n = 15 value.
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
        n => {
            debug!(n, "matrix larger than Random Index table, using n = 15 value");
            RANDOM_INDEX[RANDOM_INDEX.len() - 1]
        }
    }
}

/// Snaps a positive ratio to the nearest Saaty scale value by log distance.
///
/// An exact tie resolves to the smaller scale value. Non-positive or
/// non-finite input snaps to 1 (no preference).
pub fn nearest_saaty_value(ratio: f64) -> f64 {
    if !(ratio.is_finite() && ratio > 0.0) {
        return 1.0;
    }
    let target = ratio.ln();
    let mut best = SAATY_SCALE[0];
    let mut best_distance = (best.ln() - target).abs();
    for &candidate in &SAATY_SCALE[1..] {
        let distance = (candidate.ln() - target).abs();
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}

/// Returns true if `value` is exactly one of the Saaty scale entries.
pub fn is_saaty_value(value: f64) -> bool {
    SAATY_SCALE.iter().any(|&s| s == value)
}
