//! Regression models module
//!
//! Provides the two baseline regressors: an ordinary least squares linear
//! model and a Random Forest.

mod decision_tree;
mod linear;
mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig, TreeNode};
pub use linear::{LinearRegression, LinearRegressionError};
pub use random_forest::{ForestConfig, RandomForest};
