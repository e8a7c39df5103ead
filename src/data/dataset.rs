//! Dataset structure for the regression models

use super::table::PriceTable;
use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Same-day features used to predict the adjusted close.
pub const FEATURE_NAMES: [&str; 7] = ["Year", "Month", "Day", "Volume", "High", "Low", "Open"];

/// Dataset with a feature row and a target value per trading day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Feature matrix (n_samples x n_features)
    pub features: Vec<Vec<f64>>,
    /// Target values (adjusted close)
    pub labels: Vec<f64>,
    /// Feature names
    pub feature_names: Vec<String>,
}

/// Train/test split result
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

impl Dataset {
    /// Build the modeling dataset from a normalized price table.
    ///
    /// Features are {Year, Month, Day, Volume, High, Low, Open}; the target
    /// is the adjusted closing price.
    pub fn from_table(table: &PriceTable) -> Self {
        let mut features = Vec::with_capacity(table.n_rows());
        let mut labels = Vec::with_capacity(table.n_rows());

        for bar in &table.bars {
            features.push(vec![
                bar.year(),
                bar.month(),
                bar.day(),
                bar.volume,
                bar.high,
                bar.low,
                bar.open,
            ]);
            labels.push(bar.adj_close);
        }

        Self {
            features,
            labels,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Number of samples
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    /// Number of features
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Get feature matrix as ndarray
    pub fn features_array(&self) -> Array2<f64> {
        let n_samples = self.n_samples();
        let n_features = self.n_features();

        if n_samples == 0 {
            return Array2::zeros((0, n_features));
        }

        Array2::from_shape_fn((n_samples, n_features), |(i, j)| self.features[i][j])
    }

    /// Get labels as ndarray
    pub fn labels_array(&self) -> Array1<f64> {
        Array1::from_vec(self.labels.clone())
    }

    /// Seeded shuffle split into train and test sets.
    ///
    /// The test set takes `ceil(test_ratio * n)` rows; the same seed on the
    /// same data always yields the same partition.
    pub fn random_split(&self, test_ratio: f64, seed: u64) -> Split {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);

        let test_size = (test_ratio * n as f64).ceil() as usize;
        let (test_indices, train_indices) = indices.split_at(test_size);

        Split {
            train: self.subset(train_indices),
            test: self.subset(test_indices),
        }
    }

    /// Create a subset of the dataset by indices
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            feature_names: self.feature_names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic(n: usize) -> Dataset {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..n {
            let x = i as f64;
            features.push(vec![2020.0, 1.0, x + 1.0, x * 0.5, x + 2.0, x - 1.0, x]);
            labels.push(3.0 * x + 1.0);
        }
        Dataset {
            features,
            labels,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_split_sizes() {
        let dataset = synthetic(10);
        let split = dataset.random_split(0.2, 42);

        assert_eq!(split.test.n_samples(), 2);
        assert_eq!(split.train.n_samples(), 8);
    }

    #[test]
    fn test_fractional_test_size_rounds_up() {
        let dataset = synthetic(11);
        let split = dataset.random_split(0.2, 42);

        assert_eq!(split.test.n_samples(), 3);
        assert_eq!(split.train.n_samples(), 8);
    }

    #[test]
    fn test_split_is_deterministic() {
        let dataset = synthetic(50);

        let first = dataset.random_split(0.2, 42);
        let second = dataset.random_split(0.2, 42);

        assert_eq!(first.train.labels, second.train.labels);
        assert_eq!(first.test.labels, second.test.labels);
        assert_eq!(first.train.features, second.train.features);
    }

    #[test]
    fn test_different_seeds_differ() {
        let dataset = synthetic(50);

        let a = dataset.random_split(0.2, 42);
        let b = dataset.random_split(0.2, 7);

        assert_ne!(a.test.labels, b.test.labels);
    }
}
