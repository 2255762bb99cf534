//! Rounding helpers for handicap arithmetic
//!
//! Averages and adjustments always round half up (toward +inf), never
//! half-to-even. The ratio form keeps the arithmetic exact for integer
//! inputs so values like 22/3 never drift across a .5 boundary.

/// Round half up: `floor(x + 0.5)`.
///
/// `2.5 -> 3`, `-2.5 -> -2`, `7.49 -> 7`. Non-finite input yields 0.
pub fn round_half_up(x: f64) -> i64 {
    if !x.is_finite() {
        return 0;
    }
    (x + 0.5).floor() as i64
}

/// Round half up of `numerator / denominator` using integer arithmetic.
///
/// Returns `None` when the denominator is zero.
pub fn round_half_up_ratio(numerator: i64, denominator: i64) -> Option<i64> {
    if denominator == 0 {
        return None;
    }
    // floor(n/d + 1/2) == floor((2n + d) / 2d), normalised to a positive divisor
    let (n, d) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };
    Some((2 * n + d).div_euclid(2 * d))
}

/// Half of `value`, rounded up: `ceil(value / 2)`.
pub fn half_rounded_up(value: i32) -> i32 {
    value.div_euclid(2) + value.rem_euclid(2)
}
