use statchart_core::{ChartError, Result};

/// 1D numeric domain (min..max).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain1D {
    pub min: f64,
    pub max: f64,
}

impl Domain1D {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Build a domain, rejecting `max <= min` and non-finite bounds.
    pub fn try_new(min: f64, max: f64) -> Result<Self> {
        ChartError::check_domain(min, max)?;
        Ok(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// True if `other` lies entirely inside `self` (edges included).
    pub fn contains_domain(&self, other: &Domain1D) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    pub fn shifted(&self, delta: f64) -> Self {
        Self::new(self.min + delta, self.max + delta)
    }

    /// Intersect with `bounds`, keeping whatever part of `self` lies inside.
    pub fn clamped_to(&self, bounds: &Domain1D) -> Self {
        Self::new(self.min.max(bounds.min), self.max.min(bounds.max))
    }

    /// Stable cache key (bit patterns of both bounds).
    pub fn key(&self) -> (u64, u64) {
        (self.min.to_bits(), self.max.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_inverted_or_empty_domains() {
        assert!(Domain1D::try_new(0.0, 10.0).is_ok());
        assert!(Domain1D::try_new(10.0, 10.0).is_err());
        assert!(Domain1D::try_new(10.0, 0.0).is_err());
        assert!(Domain1D::try_new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn clamp_and_containment() {
        let extent = Domain1D::new(0.0, 100.0);
        let d = Domain1D::new(-5.0, 50.0).clamped_to(&extent);
        assert_eq!(d, Domain1D::new(0.0, 50.0));
        assert!(extent.contains_domain(&d));
        assert!(!d.contains_domain(&extent));
        assert_eq!(d.shifted(10.0), Domain1D::new(10.0, 60.0));
    }
}
