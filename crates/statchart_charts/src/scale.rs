use std::ops::RangeInclusive;

use statchart_core::{ChartError, Result};

use crate::format::{float_round, DEFAULT_ROUND_PRECISION};

/// Tick mantissas tried from largest to smallest.
pub const LEGAL_GRID_TICKS: [f64; 4] = [10.0, 5.0, 2.0, 1.0];

/// Accepted `min_ticks` values for grid tick generation.
pub const VALID_GRID_TICKS_AMOUNT: RangeInclusive<usize> = 2..=100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        let d = self.domain_max - self.domain_min;
        if d.abs() < 1e-12 {
            return self.range_min;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + t * (self.range_max - self.range_min)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let r = self.range_max - self.range_min;
        if r.abs() < 1e-12 {
            return self.domain_min;
        }
        let t = (px - self.range_min) / r;
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Evenly spaced values including both domain endpoints.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let n = count.max(2);
        let span = self.domain_max - self.domain_min;
        (0..n)
            .map(|i| self.domain_min + span * (i as f64 / (n - 1) as f64))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f64,
    step: f64,
    band_width: f64,
}

impl BandScale {
    pub fn new(
        count: usize,
        range_min: f64,
        range_max: f64,
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        if count == 0 {
            return Self {
                count: 0,
                start: range_min,
                step: 0.0,
                band_width: 0.0,
            };
        }
        let span = (range_max - range_min).max(0.0);
        let denom = (count as f64 - padding_inner + 2.0 * padding_outer).max(1e-6);
        let step = span / denom;
        let band_width = step * (1.0 - padding_inner).max(0.0);
        let start = range_min + step * padding_outer;
        Self {
            count,
            start,
            step,
            band_width,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn band_width(&self) -> f64 {
        self.band_width
    }

    pub fn band_start(&self, idx: usize) -> Option<f64> {
        if idx >= self.count {
            return None;
        }
        Some(self.start + self.step * idx as f64)
    }
}

/// Largest "nice" step (1, 2, 5 or 10 times a power of ten) that still fits
/// at least `min_ticks` steps into `[min, max]`.
pub fn grid_tick_by_min_max(min: f64, max: f64, min_ticks: usize) -> Result<f64> {
    ChartError::check_domain(min, max)?;
    if !VALID_GRID_TICKS_AMOUNT.contains(&min_ticks) {
        return Err(ChartError::InvalidRange {
            value: min_ticks as f64,
            min: *VALID_GRID_TICKS_AMOUNT.start() as f64,
            max: *VALID_GRID_TICKS_AMOUNT.end() as f64,
        });
    }

    let max_allowed_tick = float_round((max - min) / min_ticks as f64, DEFAULT_ROUND_PRECISION);
    if max_allowed_tick <= 0.0 {
        // Span too narrow to express at the rounding precision.
        return Err(ChartError::InvalidDomain { min, max });
    }
    let factor = 10f64.powf(max_allowed_tick.log10().floor());
    let mantissa = LEGAL_GRID_TICKS
        .iter()
        .copied()
        .find(|tick| max_allowed_tick >= tick * factor)
        .unwrap_or(LEGAL_GRID_TICKS[LEGAL_GRID_TICKS.len() - 1]);

    Ok(float_round(mantissa * factor, DEFAULT_ROUND_PRECISION))
}

/// Grid values from `min` upward in steps of [`grid_tick_by_min_max`],
/// covering `max`. With `value_as_max_tick` the last tick is `max` itself.
pub fn grid_ticks_by_min_max(
    min: f64,
    max: f64,
    min_ticks: usize,
    value_as_max_tick: bool,
) -> Result<Vec<f64>> {
    let tick = grid_tick_by_min_max(min, max, min_ticks)?;
    let amount = float_round((max - min) / tick, DEFAULT_ROUND_PRECISION).ceil() as usize;

    let mut ticks = Vec::with_capacity(amount + 1);
    ticks.push(float_round(min, DEFAULT_ROUND_PRECISION));
    for i in 1..=amount {
        ticks.push(float_round(min + i as f64 * tick, DEFAULT_ROUND_PRECISION));
    }
    if value_as_max_tick {
        if let Some(last) = ticks.last_mut() {
            *last = float_round(max, DEFAULT_ROUND_PRECISION);
        }
    }
    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ticks_include_endpoints() {
        let s = LinearScale::new(10.0, 20.0, 0.0, 100.0);
        let t = s.ticks(4);
        assert_eq!(t[0], 10.0);
        assert_eq!(t[3], 20.0);
    }

    #[test]
    fn linear_invert_handles_descending_range() {
        let s = LinearScale::new(0.0, 100.0, 200.0, 100.0);
        assert!((s.invert(150.0) - 50.0).abs() < 1e-9);
        assert!((s.map(25.0) - 175.0).abs() < 1e-9);
    }

    #[test]
    fn band_scale_bounds_indices() {
        let b = BandScale::new(3, 0.0, 300.0, 0.0, 0.0);
        assert_eq!(b.band_width(), 100.0);
        assert_eq!(b.band_start(2), Some(200.0));
        assert!(b.band_start(3).is_none());
    }

    #[test]
    fn band_scale_with_zero_count_has_no_band_width() {
        let b = BandScale::new(0, 0.0, 100.0, 0.1, 0.05);
        assert_eq!(b.band_width(), 0.0);
        assert!(b.band_start(0).is_none());
    }

    #[test]
    fn grid_tick_picks_largest_fitting_step() {
        assert_eq!(grid_tick_by_min_max(0.0, 25.0, 4).unwrap(), 5.0);
        assert_eq!(grid_tick_by_min_max(0.0, 1.0, 8).unwrap(), 0.1);
        assert_eq!(grid_tick_by_min_max(0.0, 800.0, 30).unwrap(), 20.0);
        assert_eq!(grid_tick_by_min_max(5.0, 20.0, 4).unwrap(), 2.0);
    }

    #[test]
    fn grid_tick_validates_inputs() {
        assert_eq!(
            grid_tick_by_min_max(10.0, 10.0, 4),
            Err(ChartError::InvalidDomain { min: 10.0, max: 10.0 })
        );
        assert!(matches!(
            grid_tick_by_min_max(0.0, 10.0, 1),
            Err(ChartError::InvalidRange { .. })
        ));
        assert!(matches!(
            grid_tick_by_min_max(0.0, 10.0, 101),
            Err(ChartError::InvalidRange { .. })
        ));
        assert!(grid_tick_by_min_max(0.0, 1e-6, 2).is_err());
    }

    #[test]
    fn grid_ticks_cover_the_range() {
        assert_eq!(
            grid_ticks_by_min_max(0.0, 25.0, 4, false).unwrap(),
            vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0]
        );
        assert_eq!(
            grid_ticks_by_min_max(5.0, 20.0, 4, false).unwrap(),
            vec![5.0, 7.0, 9.0, 11.0, 13.0, 15.0, 17.0, 19.0, 21.0]
        );
        assert_eq!(
            grid_ticks_by_min_max(5.0, 20.0, 4, true).unwrap(),
            vec![5.0, 7.0, 9.0, 11.0, 13.0, 15.0, 17.0, 19.0, 20.0]
        );
    }
}
