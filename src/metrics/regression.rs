//! Regression metrics
//!
//! RMSE is the metric the pipeline reports; MSE, MAE and R² fall out of
//! the same pass over the predictions.

use ndarray::Array1;

/// Collection of regression metrics
#[derive(Debug, Clone)]
pub struct RegressionMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// R-squared (coefficient of determination)
    pub r2: f64,
    /// Number of samples
    pub n_samples: usize,
}

impl RegressionMetrics {
    /// Calculate all metrics from true and predicted values.
    pub fn calculate(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Self {
        assert_eq!(y_true.len(), y_pred.len(), "arrays must have same length");

        let n = y_true.len();
        if n == 0 {
            return Self {
                mse: 0.0,
                rmse: 0.0,
                mae: 0.0,
                r2: 0.0,
                n_samples: 0,
            };
        }

        let mse = Self::mean_squared_error(y_true, y_pred);
        Self {
            mse,
            rmse: mse.sqrt(),
            mae: Self::mean_absolute_error(y_true, y_pred),
            r2: Self::r_squared(y_true, y_pred),
            n_samples: n,
        }
    }

    /// MSE: mean of squared errors
    pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).powi(2))
            .sum::<f64>()
            / y_true.len() as f64
    }

    /// MAE: mean of absolute errors
    pub fn mean_absolute_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).abs())
            .sum::<f64>()
            / y_true.len() as f64
    }

    /// R²: 1 - SS_res / SS_tot
    pub fn r_squared(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        let y_mean = y_true.sum() / y_true.len() as f64;
        let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean).powi(2)).sum();
        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).powi(2))
            .sum();

        if ss_tot < 1e-12 {
            // Constant label: perfect predictions get full credit.
            if ss_res < 1e-12 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        }
    }
}
