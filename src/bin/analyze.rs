//! Run the full exploratory analysis over a historical price table
//!
//! Usage: cargo run --bin analyze -- prices.csv --out-dir charts

use anyhow::{Context, Result};
use clap::Parser;
use ndarray::Array1;
use std::path::PathBuf;
use stock_ml::data::{ingest::read_table, Dataset};
use stock_ml::metrics::RegressionReport;
use stock_ml::models::{ForestConfig, LinearRegression, RandomForest};
use stock_ml::plot;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Exploratory analysis of historical stock prices")]
struct Args {
    /// Input table: a CSV file, or a ZIP archive whose first entry is a CSV
    input: Option<PathBuf>,

    /// Directory the chart images are written to
    #[arg(short, long, default_value = "charts")]
    out_dir: PathBuf,

    /// Test set ratio
    #[arg(long, default_value = "0.2")]
    test_ratio: f64,

    /// Number of trees in the Random Forest
    #[arg(short, long, default_value = "100")]
    trees: usize,

    /// Random seed for the split and the forest
    #[arg(short, long, default_value = "42")]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_ml=info".into()),
        )
        .init();

    let args = Args::parse();

    // Stage 1: ingestion
    let mut table = read_table(args.input.as_deref())?;

    // Stage 2: normalization
    table.normalize();
    println!("Loaded {} trading days", table.n_rows());
    if let Some((first, last)) = table.date_range() {
        println!("Date range: {} to {}\n", first, last);
    }

    // Stage 3: descriptive charts
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", args.out_dir))?;

    plot::plot_adj_close(&table, &args.out_dir.join("adj_close.png"))?;
    println!("{}\n", plot::ADJ_CLOSE_CAPTION);

    plot::plot_volume(&table, &args.out_dir.join("volume.png"))?;
    println!("{}\n", plot::VOLUME_CAPTION);

    plot::plot_high_low_close(&table, &args.out_dir.join("high_low_close.png"))?;
    println!("{}\n", plot::HIGH_LOW_CLOSE_CAPTION);

    // Stage 4: modeling
    let dataset = Dataset::from_table(&table);
    let split = dataset.random_split(args.test_ratio, args.seed);

    info!(
        train = split.train.n_samples(),
        test = split.test.n_samples(),
        "split dataset"
    );

    let y_test = split.test.labels_array();

    let mut linear = LinearRegression::default()
        .with_feature_names(dataset.feature_names.clone());
    linear.fit(&split.train.features_array(), &split.train.labels_array())?;
    let linear_predictions = linear.predict(&split.test.features_array())?;
    let linear_report = RegressionReport::calculate(&y_test, &linear_predictions);
    println!("{}", linear_report.summary_line("Linear Regression"));

    if let Some(coefficients) = linear.coefficient_map() {
        for (name, value) in coefficients {
            tracing::debug!(feature = name, coefficient = value, "linear model term");
        }
    }

    let mut forest = RandomForest::new(ForestConfig {
        n_trees: args.trees,
        seed: args.seed,
        ..Default::default()
    });
    forest.fit(&split.train);
    let forest_predictions = Array1::from_vec(forest.predict(&split.test));
    let forest_report = RegressionReport::calculate(&y_test, &forest_predictions);
    println!("{}", forest_report.summary_line("Random Forest Regressor"));

    plot::plot_predictions(
        y_test.as_slice().unwrap_or(&[]),
        linear_predictions.as_slice().unwrap_or(&[]),
        forest_predictions.as_slice().unwrap_or(&[]),
        &args.out_dir.join("actual_vs_predicted.png"),
    )?;
    println!("\n{}", plot::PREDICTIONS_CAPTION);

    println!("\nTop feature importances (Random Forest):");
    for (name, importance) in forest.feature_importance_ranking().iter().take(5) {
        println!("  {:8} {:.4}", name, importance);
    }

    Ok(())
}
