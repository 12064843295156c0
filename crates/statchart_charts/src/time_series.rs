use std::sync::Arc;

use statchart_core::{ChartError, Point, Result};

use crate::closest::find_closest_index;
use crate::view::Domain1D;

/// Immutable x/y series shared cheaply between chart models.
///
/// Invariants checked at construction:
/// - at least one point
/// - `x.len() == y.len()`
/// - `x` finite and strictly ascending
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    x: Arc<[f64]>,
    y: Arc<[f64]>,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.is_empty() {
            return Err(ChartError::invalid_argument("series cannot be empty"));
        }
        if x.len() != y.len() {
            return Err(ChartError::invalid_argument(format!(
                "x/y length mismatch: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        if !x.iter().all(|v| v.is_finite()) {
            return Err(ChartError::invalid_argument("x values must be finite"));
        }
        if !x.windows(2).all(|w| w[0] < w[1]) {
            return Err(ChartError::invalid_argument(
                "x values must be strictly ascending",
            ));
        }
        Ok(Self {
            x: x.into(),
            y: y.into(),
        })
    }

    /// Build from `(x, y)` pairs.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (x, y) = points.into_iter().unzip();
        Self::new(x, y)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn point(&self, idx: usize) -> Point {
        Point::new(self.x[idx], self.y[idx])
    }

    pub fn x_min_max(&self) -> (f64, f64) {
        // Non-empty by construction.
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Finite y extremes; `None` if every y is NaN or infinite.
    pub fn y_min_max(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in self.y.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        (min <= max).then_some((min, max))
    }

    /// Full x extent as a domain; fails for single-point series.
    pub fn x_extent(&self) -> Result<Domain1D> {
        let (min, max) = self.x_min_max();
        Domain1D::try_new(min, max)
    }

    /// Index of the point whose x is closest to `x`.
    pub fn nearest_by_x(&self, x: f64) -> Result<usize> {
        find_closest_index(&self.x, x, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates_shape_and_order() {
        assert!(Series::new(vec![], vec![]).is_err());
        assert!(Series::new(vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(Series::new(vec![2.0, 1.0], vec![1.0, 1.0]).is_err());
        assert!(Series::new(vec![1.0, 1.0], vec![1.0, 1.0]).is_err());
        assert!(Series::new(vec![1.0, f64::NAN], vec![1.0, 1.0]).is_err());
        assert!(Series::new(vec![1.0, 2.0], vec![5.0, 6.0]).is_ok());
    }

    #[test]
    fn extents_and_nearest() {
        let s = Series::from_points([(0.0, 3.0), (10.0, -1.0), (20.0, f64::NAN), (30.0, 7.0)])
            .unwrap();
        assert_eq!(s.x_min_max(), (0.0, 30.0));
        assert_eq!(s.y_min_max(), Some((-1.0, 7.0)));
        assert_eq!(s.x_extent().unwrap(), Domain1D::new(0.0, 30.0));
        assert_eq!(s.nearest_by_x(14.0).unwrap(), 1);
        assert_eq!(s.nearest_by_x(-50.0).unwrap(), 0);
        assert_eq!(s.point(3), Point::new(30.0, 7.0));
    }

    #[test]
    fn single_point_has_no_extent() {
        let s = Series::new(vec![5.0], vec![1.0]).unwrap();
        assert!(s.x_extent().is_err());
        assert_eq!(s.nearest_by_x(100.0).unwrap(), 0);
    }
}
