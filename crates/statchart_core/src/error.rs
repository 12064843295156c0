//! Chart error types

use thiserror::Error;

/// Errors raised synchronously by chart helpers on malformed input.
///
/// None of these are recovered internally: callers are expected to validate
/// data upstream, so an error here usually means a programming mistake.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Non-finite number, mismatched sequence lengths, out-of-bounds index
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A `[min, max]` pair with `max <= min` (or non-finite bounds)
    #[error("Invalid domain: max ({max}) must be greater than min ({min})")]
    InvalidDomain { min: f64, max: f64 },

    /// A count outside of its configured valid bounds
    #[error("Invalid range: {value} is outside of [{min}, {max}]")]
    InvalidRange { value: f64, min: f64, max: f64 },
}

impl ChartError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Validate that `min < max` with both bounds finite.
    pub fn check_domain(min: f64, max: f64) -> Result<()> {
        if min.is_finite() && max.is_finite() && max > min {
            Ok(())
        } else {
            Err(Self::InvalidDomain { min, max })
        }
    }

    /// Validate that `value` lies in the inclusive range `[min, max]`.
    pub fn check_range(value: f64, min: f64, max: f64) -> Result<()> {
        if min <= value && value <= max {
            Ok(())
        } else {
            Err(Self::InvalidRange { value, min, max })
        }
    }
}

/// Result type for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;
