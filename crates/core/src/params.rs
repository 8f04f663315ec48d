//! Clustering parameters.

use crate::error::{ClusterError, Result};

/// Parameters for distance-based clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    /// A point joins a cluster only if it is strictly closer than this to the
    /// cluster's centroid. Also the edge length of the grid cells used to
    /// bucket clusters.
    pub threshold: f64,
}

impl ClusterParams {
    /// Creates validated parameters.
    ///
    /// Fails with [`ClusterError::InvalidThreshold`] unless the threshold is
    /// finite and strictly positive.
    pub fn new(threshold: f64) -> Result<Self> {
        let params = Self { threshold };
        params.validate()?;
        Ok(params)
    }

    /// Checks the threshold again, for parameters built as a struct literal.
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_finite() && self.threshold > 0.0 {
            Ok(())
        } else {
            Err(ClusterError::InvalidThreshold {
                threshold: self.threshold,
            })
        }
    }

    /// Edge length of a grid cell.
    pub const fn cell_size(&self) -> f64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_thresholds() {
        for t in [0.0, -0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(ClusterParams::new(t).is_err(), "threshold {t} accepted");
        }
    }

    #[test]
    fn test_accepts_positive_threshold() {
        let params = ClusterParams::new(1e-6).unwrap();
        assert_eq!(params.cell_size(), 1e-6);
        assert!(ClusterParams { threshold: 40.0 }.validate().is_ok());
    }
}
