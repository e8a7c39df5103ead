//! Regression metrics for evaluating model performance

use ndarray::Array1;

/// Collection of regression metrics over one evaluation set
#[derive(Debug, Clone)]
pub struct RegressionReport {
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

impl RegressionReport {
    /// Calculate all metrics for a prediction vector
    pub fn calculate(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Self {
        let mse = Self::mean_squared_error(y_true, y_pred);

        Self {
            mse,
            rmse: mse.sqrt(),
            mae: Self::mean_absolute_error(y_true, y_pred),
            r2: Self::r_squared(y_true, y_pred),
            n_samples: y_true.len(),
        }
    }

    /// Mean Squared Error: (1/n) * Σ(y_true - y_pred)²
    pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        let n = y_true.len() as f64;
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum::<f64>()
            / n
    }

    /// Mean Absolute Error: (1/n) * Σ|y_true - y_pred|
    pub fn mean_absolute_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        let n = y_true.len() as f64;
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum::<f64>()
            / n
    }

    /// R-squared (coefficient of determination)
    /// R² = 1 - SS_res / SS_tot
    pub fn r_squared(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        let y_mean = y_true.mean().unwrap_or(0.0);

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        let ss_tot: f64 = y_true.iter().map(|&t| (t - y_mean).powi(2)).sum();

        if ss_tot < 1e-10 {
            return 0.0;
        }

        1.0 - ss_res / ss_tot
    }

    /// One-line summary in the pipeline's report format
    pub fn summary_line(&self, model_name: &str) -> String {
        format!(
            "{} - MSE: {:.2}, R²: {:.2}",
            model_name, self.mse, self.r2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let y_true = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let y_pred = y_true.clone();

        let report = RegressionReport::calculate(&y_true, &y_pred);
        assert!(report.mse.abs() < 1e-10);
        assert!((report.r2 - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_mse_is_nonnegative_and_r2_bounded() {
        let y_true = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let y_pred = Array1::from_vec(vec![5.0, 1.0, 4.0, 2.0, 3.0]);

        let report = RegressionReport::calculate(&y_true, &y_pred);
        assert!(report.mse >= 0.0);
        assert!(report.r2 <= 1.0);
        assert!(report.rmse >= 0.0);
        assert!(report.mae >= 0.0);
    }

    #[test]
    fn test_mean_prediction_gives_zero_r2() {
        let y_true = Array1::from_vec(vec![1.0, 2.0, 3.0]);
        let y_pred = Array1::from_vec(vec![2.0, 2.0, 2.0]);

        let r2 = RegressionReport::r_squared(&y_true, &y_pred);
        assert!(r2.abs() < 1e-10);
    }

    #[test]
    fn test_summary_line_format() {
        let report = RegressionReport {
            mse: 1.234,
            rmse: 1.11,
            mae: 0.9,
            r2: 0.987,
            n_samples: 10,
        };

        assert_eq!(
            report.summary_line("Linear Regression"),
            "Linear Regression - MSE: 1.23, R²: 0.99"
        );
    }
}
