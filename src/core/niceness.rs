//! Heuristic scoring of division magnitudes.
//!
//! A division magnitude is "nice" when it reads well as a tick interval:
//! 1, 2, 5 and their powers of ten beat 7 or 9. The table below is a fixed
//! contract shared with the division finder; changing an entry changes
//! which ticks the axis picks.

const TOLERANCE: f64 = 1e-9;

/// Scores a candidate division magnitude on a 0-100 scale.
///
/// The magnitude is decomposed into mantissa and power-of-ten exponent and
/// looked up by its one or two significant digits. Values needing more than
/// two significant digits, or with no table entry, score 0 - they are not
/// rejected outright, only unrewarded.
#[must_use]
pub fn niceness(magnitude: f64) -> f64 {
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return 0.0;
    }

    let mut exponent = magnitude.log10().floor() as i32;
    let mut mantissa = magnitude / 10f64.powi(exponent);
    // log10 rounding at exact powers of ten can leave the mantissa a hair
    // below 1 or at 10; renormalize before digit extraction.
    if mantissa >= 10.0 - TOLERANCE {
        mantissa /= 10.0;
        exponent += 1;
    } else if mantissa < 1.0 {
        mantissa *= 10.0;
        exponent -= 1;
    }

    let two_digits = (mantissa * 10.0).round();
    if (mantissa * 10.0 - two_digits).abs() > 1e-6 {
        // Needs three or more significant digits.
        return 0.0;
    }
    let two_digits = two_digits as u32;
    let leading = two_digits / 10;
    let trailing = two_digits % 10;

    if exponent <= -1 {
        // Sub-unity magnitudes: only the 0.1 - 0.5 family is tabled.
        return match (leading, trailing) {
            (1, 0) => 50.0,
            (2, 0) => 25.0,
            (3, 0) | (4, 0) => 10.0,
            (5, 0) => 40.0,
            _ => 0.0,
        };
    }

    if trailing == 0 {
        // Single significant digit, any power of ten: 20 reads as "2".
        return match leading {
            1 => 100.0,
            2 => 95.0,
            3 => 45.0,
            4 => 40.0,
            5 => 95.0,
            6 => 30.0,
            7 => 10.0,
            8 => 20.0,
            9 => 5.0,
            _ => 0.0,
        };
    }

    if exponent == 0 {
        // Fractional unit magnitudes: 1.5 and 2.5.
        return match (leading, trailing) {
            (1, 5) => 40.0,
            (2, 5) => 95.0,
            _ => 0.0,
        };
    }

    // Two significant digits at ten or above: 15, 25, 75 and their powers.
    match (leading, trailing) {
        (1, 5) => 40.0,
        (2, 5) => 95.0,
        (7, 5) => 30.0,
        _ => 0.0,
    }
}
