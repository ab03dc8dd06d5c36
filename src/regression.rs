// Linear Trend Fitting - ordinary least-squares over a handful of points
// Both the aggregator and the valuation calculator fit with this, each
// choosing its own x-encoding for the same monthly totals.

use serde::{Deserialize, Serialize};

/// An ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line to paired samples.
    ///
    /// Degenerate input (fewer than 2 points, or all x identical) yields a
    /// flat line: slope 0 through the mean of y (or 0 for empty input). The
    /// upstream pipeline always supplies 12 points, so this is a deterministic
    /// fallback rather than an error path.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Self {
        debug_assert_eq!(xs.len(), ys.len());

        let n = xs.len().min(ys.len()) as f64;
        if n < 1.0 {
            return LinearFit { slope: 0.0, intercept: 0.0 };
        }

        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut num = 0.0;
        let mut den = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            num += (x - x_mean) * (y - y_mean);
            den += (x - x_mean) * (x - x_mean);
        }

        if den.abs() < 1e-12 {
            return LinearFit { slope: 0.0, intercept: y_mean };
        }

        let slope = num / den;
        LinearFit { slope, intercept: y_mean - slope * x_mean }
    }

    /// Predicted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Predicted values for each `x`, in order.
    pub fn predict_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }
}
