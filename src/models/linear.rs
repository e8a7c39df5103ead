//! Linear Regression
//!
//! Ordinary Least Squares fit of the adjusted close against the same-day
//! feature set, solved through the normal equations.

use ndarray::{s, Array1, Array2, Axis};
use thiserror::Error;

/// Errors that can occur during linear regression
#[derive(Error, Debug)]
pub enum LinearRegressionError {
    #[error("Matrix is singular and cannot be inverted")]
    SingularMatrix,

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Model has not been fitted yet")]
    NotFitted,

    #[error("Computation error: {0}")]
    ComputationError(String),
}

/// Linear Regression model using Ordinary Least Squares
#[derive(Debug, Clone)]
pub struct LinearRegression {
    /// Coefficients (weights) for each feature
    pub coefficients: Option<Array1<f64>>,
    /// Intercept (bias) term
    pub intercept: Option<f64>,
    /// Whether to fit an intercept
    fit_intercept: bool,
    /// Feature names
    pub feature_names: Option<Vec<String>>,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LinearRegression {
    /// Create a new LinearRegression model
    ///
    /// # Arguments
    /// * `fit_intercept` - Whether to calculate the intercept
    pub fn new(fit_intercept: bool) -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept,
            feature_names: None,
        }
    }

    /// Set feature names for interpretation
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Fit the model using Ordinary Least Squares
    ///
    /// Solves the normal equations: β = (X'X)^(-1) X'y
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), LinearRegressionError> {
        if x.nrows() != y.len() {
            return Err(LinearRegressionError::DimensionMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }

        let x_design = if self.fit_intercept {
            // Add column of ones for intercept
            let ones = Array2::ones((x.nrows(), 1));
            ndarray::concatenate(Axis(1), &[ones.view(), x.view()])
                .map_err(|e| LinearRegressionError::ComputationError(e.to_string()))?
        } else {
            x.clone()
        };

        let xt = x_design.t();
        let xtx = xt.dot(&x_design);
        let xty = xt.dot(y);

        let beta = solve_linear_system(&xtx, &xty)?;

        if self.fit_intercept {
            self.intercept = Some(beta[0]);
            self.coefficients = Some(beta.slice(s![1..]).to_owned());
        } else {
            self.intercept = Some(0.0);
            self.coefficients = Some(beta);
        }

        Ok(())
    }

    /// Predict target values for a feature matrix
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, LinearRegressionError> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(LinearRegressionError::NotFitted)?;
        let intercept = self.intercept.ok_or(LinearRegressionError::NotFitted)?;

        if x.ncols() != coefficients.len() {
            return Err(LinearRegressionError::DimensionMismatch {
                expected: coefficients.len(),
                got: x.ncols(),
            });
        }

        Ok(x.dot(coefficients) + intercept)
    }

    /// Coefficients paired with their feature names, when names were set
    pub fn coefficient_map(&self) -> Option<Vec<(&str, f64)>> {
        let names = self.feature_names.as_ref()?;
        let coefficients = self.coefficients.as_ref()?;

        Some(
            names
                .iter()
                .zip(coefficients.iter())
                .map(|(n, &c)| (n.as_str(), c))
                .collect(),
        )
    }
}

/// Solve Ax = b by Gaussian elimination with partial pivoting
fn solve_linear_system(
    a: &Array2<f64>,
    b: &Array1<f64>,
) -> Result<Array1<f64>, LinearRegressionError> {
    let n = a.nrows();
    let mut aug = Array2::zeros((n, n + 1));
    aug.slice_mut(s![.., ..n]).assign(a);
    aug.slice_mut(s![.., n]).assign(b);

    for col in 0..n {
        // Pivot on the largest remaining entry in this column
        let mut pivot_row = col;
        let mut pivot_value = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > pivot_value {
                pivot_row = row;
                pivot_value = aug[[row, col]].abs();
            }
        }

        if pivot_value < 1e-12 {
            return Err(LinearRegressionError::SingularMatrix);
        }

        if pivot_row != col {
            for k in 0..=n {
                let tmp = aug[[col, k]];
                aug[[col, k]] = aug[[pivot_row, k]];
                aug[[pivot_row, k]] = tmp;
            }
        }

        for row in (col + 1)..n {
            let factor = aug[[row, col]] / aug[[col, col]];
            for k in col..=n {
                aug[[row, k]] -= factor * aug[[col, k]];
            }
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let mut sum = aug[[row, n]];
        for k in (row + 1)..n {
            sum -= aug[[row, k]] * x[k];
        }
        x[row] = sum / aug[[row, row]];
    }

    Ok(x)
}
