//! Linear regression
//!
//! Gradient-descent linear regression with optional L2 regularization,
//! used to predict plant power output from ambient conditions.

use ndarray::{Array1, Array2, Axis};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during linear regression
#[derive(Error, Debug)]
pub enum LinearRegressionError {
    #[error("cannot fit a model on an empty dataset")]
    EmptyDataset,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Linear regression estimator.
///
/// Fits by full-batch gradient descent on standardized features with a
/// centered label. The L2 penalty applies to the coefficients only; the
/// intercept is recovered analytically from the column means, so it is
/// never penalized. The fit is deterministic: weights start at zero and
/// no sampling is involved.
///
/// # Example
///
/// ```ignore
/// let model = LinearRegression::new()
///     .with_max_iter(10)
///     .with_reg_param(0.3)
///     .fit(&x_train, &y_train)?;
/// let predictions = model.predict(&x_test)?;
/// ```
#[derive(Debug, Clone)]
pub struct LinearRegression {
    max_iter: usize,
    reg_param: f64,
    learning_rate: f64,
    tolerance: f64,
    fit_intercept: bool,
    standardize: bool,
    feature_names: Option<Vec<String>>,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    /// Create an estimator with default parameters.
    pub fn new() -> Self {
        Self {
            max_iter: 100,
            reg_param: 0.0,
            learning_rate: 0.1,
            tolerance: 1e-6,
            fit_intercept: true,
            standardize: true,
            feature_names: None,
        }
    }

    /// Set the maximum number of gradient-descent epochs.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the L2 regularization strength.
    pub fn with_reg_param(mut self, reg_param: f64) -> Self {
        self.reg_param = reg_param;
        self
    }

    /// Set the gradient-descent step size.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the convergence tolerance for early stopping.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set whether to fit an intercept term.
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Set whether to standardize features internally before fitting.
    pub fn with_standardize(mut self, standardize: bool) -> Self {
        self.standardize = standardize;
        self
    }

    /// Set feature names carried into the fitted model's summary.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Fit on a feature matrix and label vector.
    pub fn fit(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
    ) -> Result<LinearRegressionModel, LinearRegressionError> {
        let n = x.nrows();
        if n == 0 {
            return Err(LinearRegressionError::EmptyDataset);
        }
        if y.len() != n {
            return Err(LinearRegressionError::DimensionMismatch {
                expected: n,
                got: y.len(),
            });
        }
        let width = x.ncols();

        let x_mean = if self.fit_intercept {
            x.mean_axis(Axis(0)).ok_or(LinearRegressionError::EmptyDataset)?
        } else {
            Array1::zeros(width)
        };
        let x_scale = if self.standardize {
            // Constant columns keep scale 1 so the division below is safe.
            x.std_axis(Axis(0), 0.0)
                .mapv(|s| if s > 1e-12 { s } else { 1.0 })
        } else {
            Array1::ones(width)
        };
        let y_mean = if self.fit_intercept {
            y.mean().ok_or(LinearRegressionError::EmptyDataset)?
        } else {
            0.0
        };

        let xs = (x - &x_mean) / &x_scale;
        let yc = y - y_mean;

        let mut weights = Array1::<f64>::zeros(width);
        let mut prev_loss = f64::INFINITY;
        let n_f = n as f64;

        for epoch in 0..self.max_iter {
            let residuals = xs.dot(&weights) - &yc;
            let gradient = xs.t().dot(&residuals) * (2.0 / n_f)
                + &weights.mapv(|w| 2.0 * self.reg_param * w);
            weights = weights - gradient * self.learning_rate;

            let mse = residuals.mapv(|r| r * r).sum() / n_f;
            let loss = mse + self.reg_param * weights.mapv(|w| w * w).sum();
            debug!(epoch, loss, "gradient descent step");

            if (prev_loss - loss).abs() < self.tolerance {
                debug!(epoch, loss, "converged");
                break;
            }
            prev_loss = loss;
        }

        // Map coefficients back to the original feature units.
        let coefficients = &weights / &x_scale;
        let intercept = if self.fit_intercept {
            y_mean - x_mean.dot(&coefficients)
        } else {
            0.0
        };

        let mut model = LinearRegressionModel::new(coefficients, intercept);
        if let Some(names) = &self.feature_names {
            model = model.with_feature_names(names.clone());
        }
        Ok(model)
    }
}

/// A fitted linear regression model: immutable coefficients and intercept.
#[derive(Debug, Clone)]
pub struct LinearRegressionModel {
    coefficients: Array1<f64>,
    intercept: f64,
    feature_names: Option<Vec<String>>,
}

impl LinearRegressionModel {
    /// Create a model from fitted parameters.
    pub fn new(coefficients: Array1<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            feature_names: None,
        }
    }

    /// Attach feature names for the summary.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Fitted coefficients, one per feature.
    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    /// Fitted intercept term.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predict one value per row of `x`.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, LinearRegressionError> {
        if x.ncols() != self.coefficients.len() {
            return Err(LinearRegressionError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: x.ncols(),
            });
        }
        Ok(x.dot(&self.coefficients) + self.intercept)
    }

    /// Human-readable coefficient table.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str("Linear Regression Model\n");
        s.push_str("=======================\n");
        s.push_str(&format!("Intercept: {:.6}\n", self.intercept));
        s.push_str("Coefficients:\n");

        if let Some(names) = &self.feature_names {
            for (name, &c) in names.iter().zip(self.coefficients.iter()) {
                s.push_str(&format!("  {:<12} {:>12.6}\n", name, c));
            }
        } else {
            for (i, &c) in self.coefficients.iter().enumerate() {
                s.push_str(&format!("  feature {:<4} {:>12.6}\n", i, c));
            }
        }

        s
    }
}
