//! Number rounding and label formatting

use statchart_core::{ChartError, Result};

/// Decimal places kept by [`float_round`] when callers don't care.
pub const DEFAULT_ROUND_PRECISION: i32 = 4;

/// Decimal places shown by [`format_pretty`].
pub const PRETTY_PRECISION: i32 = 2;

/// Round `value` to `precision` decimal places. Ties go toward positive
/// infinity, so `-2.5` rounds to `-2`.
pub fn float_round(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor + 0.5).floor() / factor
}

/// Integers pass through, everything else is rounded to `precision` places.
pub fn pretty_number(value: f64, precision: i32) -> Result<f64> {
    if !value.is_finite() {
        return Err(ChartError::invalid_argument(format!(
            "cannot prettify non-finite number {value}"
        )));
    }
    if value.fract() == 0.0 {
        return Ok(value);
    }
    Ok(float_round(value, precision))
}

/// Display form of [`pretty_number`]: `3`, `0.5`, `12.35`.
pub fn format_pretty(value: f64) -> String {
    match pretty_number(value, PRETTY_PRECISION) {
        // `+ 0.0` folds negative zero.
        Ok(v) => (v + 0.0).to_string(),
        Err(_) => format_fixed(value, 0),
    }
}

pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    format!("{value:.decimals$}")
}

/// `(min, max)` of two numbers.
pub fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Inclusive membership test.
pub fn in_range<T: PartialOrd>(value: T, start: T, end: T) -> bool {
    start <= value && value <= end
}

/// Decimal places used for axis labels over a value range of `range`.
pub fn tick_precision_by_range(range: f64) -> usize {
    if range < 5.0 {
        2
    } else if range < 50.0 {
        1
    } else {
        0
    }
}

/// Axis label formatter with a fixed precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickFormatter {
    precision: usize,
}

impl TickFormatter {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// Pick the precision from the span of the axis values.
    pub fn for_range(range: f64) -> Self {
        Self::new(tick_precision_by_range(range))
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn format(&self, tick: f64) -> String {
        if self.precision > 0 {
            format_fixed(tick, self.precision)
        } else {
            format_fixed(tick.round() + 0.0, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_round_defaults_to_four_places() {
        assert_eq!(float_round(26.666_666, DEFAULT_ROUND_PRECISION), 26.6667);
        assert_eq!(float_round(0.1 + 0.2, DEFAULT_ROUND_PRECISION), 0.3);
        assert_eq!(float_round(12.345, 1), 12.3);
    }

    #[test]
    fn float_round_ties_go_up() {
        assert_eq!(float_round(2.5, 0), 3.0);
        assert_eq!(float_round(-2.5, 0), -2.0);
        assert_eq!(float_round(-1.25, 1), -1.2);
        assert_eq!(float_round(-2.51, 0), -3.0);
    }

    #[test]
    fn pretty_number_keeps_integers() {
        assert_eq!(pretty_number(90.0, 2).unwrap(), 90.0);
        assert_eq!(pretty_number(1.23456, 2).unwrap(), 1.23);
        assert!(pretty_number(f64::NAN, 2).is_err());
        assert!(pretty_number(f64::INFINITY, 2).is_err());
    }

    #[test]
    fn format_pretty_drops_trailing_zeros() {
        assert_eq!(format_pretty(3.0), "3");
        assert_eq!(format_pretty(0.5), "0.5");
        assert_eq!(format_pretty(12.345_6), "12.35");
        assert_eq!(format_pretty(-0.001), "0");
    }

    #[test]
    fn tick_precision_thresholds() {
        assert_eq!(tick_precision_by_range(1.0), 2);
        assert_eq!(tick_precision_by_range(4.99), 2);
        assert_eq!(tick_precision_by_range(5.0), 1);
        assert_eq!(tick_precision_by_range(49.0), 1);
        assert_eq!(tick_precision_by_range(50.0), 0);
    }

    #[test]
    fn tick_formatter_uses_precision() {
        assert_eq!(TickFormatter::for_range(2.0).format(1.5), "1.50");
        assert_eq!(TickFormatter::for_range(20.0).format(1.24), "1.2");
        assert_eq!(TickFormatter::for_range(500.0).format(12.6), "13");
    }

    #[test]
    fn min_max_and_in_range() {
        assert_eq!(min_max(5.0, 1.0), (1.0, 5.0));
        assert!(in_range(3, 1, 3));
        assert!(!in_range(4, 1, 3));
    }
}
