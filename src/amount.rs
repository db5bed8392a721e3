// 🔢 Amount Model - Benford's Law amounts
// Realistic amounts follow the first-digit law; violations over-use 5 and 6

use rand::seq::SliceRandom;
use rand::Rng;

/// First-significant-digit frequencies (percent) for digits 1..=9
pub const BENFORD_WEIGHTS: [(u32, f64); 9] = [
    (1, 30.1),
    (2, 17.6),
    (3, 12.5),
    (4, 9.7),
    (5, 7.9),
    (6, 6.7),
    (7, 5.8),
    (8, 5.1),
    (9, 4.6),
];

/// Leading digits a violation amount may start with
pub const VIOLATION_DIGITS: [u32; 2] = [5, 6];

/// Compose `leading.dddddd` from a leading digit and six random decimals
fn compose<R: Rng + ?Sized>(rng: &mut R, leading: u32) -> f64 {
    let rest: u32 = rng.gen_range(0..=999_999);
    leading as f64 + rest as f64 / 1_000_000.0
}

/// Amount in [1, 10) whose leading digit follows Benford's Law
///
/// Callers scale the result (typically x1000) to reach ledger magnitudes.
pub fn benford_amount<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let leading = BENFORD_WEIGHTS
        .choose_weighted(rng, |&(_, weight)| weight)
        .map_or(1, |&(digit, _)| digit);
    compose(rng, leading)
}

/// Amount in [5, 7) - leading digit is always 5 or 6
pub fn benford_violation_amount<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let leading = *VIOLATION_DIGITS.choose(rng).unwrap_or(&5);
    compose(rng, leading)
}

/// Round to the nearest cent
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Drop sub-cent precision without rounding up (keeps the leading digit)
pub fn truncate_cents(amount: f64) -> f64 {
    (amount * 100.0).floor() / 100.0
}

/// Round to the nearest hundred
pub fn round_hundreds(amount: f64) -> f64 {
    (amount / 100.0).round() * 100.0
}

/// Leading significant digit of a positive amount (None for zero/negative/NaN)
pub fn leading_digit(amount: f64) -> Option<u32> {
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }
    let exponent = amount.log10().floor();
    let mut scaled = amount / 10f64.powf(exponent);
    // log10 can land one ulp off for exact powers of ten
    if scaled >= 10.0 {
        scaled /= 10.0;
    } else if scaled < 1.0 {
        scaled *= 10.0;
    }
    Some(scaled.trunc() as u32)
}

// ============================================================================
// TESTS
// ============================================================================
