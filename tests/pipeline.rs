//! End-to-end pipeline properties over a synthetic price table

use ndarray::Array1;
use std::fs::File;
use std::io::Write;
use stock_ml::data::{ingest::read_table, Dataset, PriceTable};
use stock_ml::metrics::RegressionReport;
use stock_ml::models::{ForestConfig, LinearRegression, RandomForest};

/// Ten trading days with an adjusted close that is an exact linear function
/// of the same-day features: adj = 1.5*open + 0.002*(volume/1e6) + 4
fn synthetic_csv() -> String {
    let rows = [
        ("2015-03-11", 31.2, 33.1, 30.4, 32.0, 120_350_000.0),
        ("2016-07-22", 47.8, 49.2, 46.9, 48.5, 97_420_000.0),
        ("2017-01-05", 55.3, 57.6, 54.1, 56.2, 143_880_000.0),
        ("2018-11-30", 62.9, 64.4, 61.2, 63.7, 88_210_000.0),
        ("2019-04-17", 71.4, 73.9, 70.3, 72.8, 131_760_000.0),
        ("2020-08-09", 84.6, 86.1, 83.0, 85.5, 155_090_000.0),
        ("2021-02-25", 92.1, 94.7, 91.4, 93.3, 102_330_000.0),
        ("2022-06-13", 101.8, 103.5, 100.2, 102.6, 118_940_000.0),
        ("2023-10-02", 113.5, 115.9, 112.1, 114.4, 76_580_000.0),
        ("2024-12-20", 126.2, 128.8, 125.0, 127.1, 139_470_000.0),
    ];

    let mut csv = String::from(",Open,High,Low,Close,Adj Close,Volume\n");
    for (date, open, high, low, close, volume) in rows {
        let adj = 1.5 * open + 0.002 * (volume / 1e6) + 4.0;
        csv.push_str(&format!(
            "{},{},{},{},{},{:.6},{}\n",
            date, open, high, low, close, adj, volume
        ));
    }
    csv
}

fn load_synthetic() -> PriceTable {
    let mut table = PriceTable::from_csv(synthetic_csv().as_bytes()).unwrap();
    table.normalize();
    table
}

#[test]
fn normalization_preserves_rows_and_order() {
    let table = load_synthetic();

    assert_eq!(table.n_rows(), 10);
    assert!(table.bars.windows(2).all(|w| w[0].date <= w[1].date));
    assert!((table.bars[0].volume - 120.35).abs() < 1e-9);
}

#[test]
fn zip_and_flat_ingestion_agree() {
    let dir = tempfile::tempdir().unwrap();
    let csv = synthetic_csv();

    let flat = dir.path().join("prices.csv");
    std::fs::write(&flat, &csv).unwrap();

    let archive = dir.path().join("prices.zip");
    let mut writer = zip::ZipWriter::new(File::create(&archive).unwrap());
    writer
        .start_file("prices.csv", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(csv.as_bytes()).unwrap();
    writer.finish().unwrap();

    let mut from_flat = read_table(Some(&flat)).unwrap();
    let mut from_zip = read_table(Some(&archive)).unwrap();
    from_flat.normalize();
    from_zip.normalize();

    assert_eq!(from_flat.bars, from_zip.bars);
}

#[test]
fn split_is_deterministic_across_runs() {
    let dataset = Dataset::from_table(&load_synthetic());

    let first = dataset.random_split(0.2, 42);
    let second = dataset.random_split(0.2, 42);

    assert_eq!(first.train.features, second.train.features);
    assert_eq!(first.test.labels, second.test.labels);
    assert_eq!(first.test.n_samples(), 2);
    assert_eq!(first.train.n_samples(), 8);
}

#[test]
fn linear_model_recovers_linear_target() {
    let dataset = Dataset::from_table(&load_synthetic());
    let split = dataset.random_split(0.2, 42);

    let mut model = LinearRegression::default();
    model
        .fit(&split.train.features_array(), &split.train.labels_array())
        .unwrap();

    let predictions = model.predict(&split.test.features_array()).unwrap();
    let report = RegressionReport::calculate(&split.test.labels_array(), &predictions);

    assert!(report.r2 > 0.9, "held-out R² was {}", report.r2);
}

#[test]
fn metric_bounds_hold_for_both_models() {
    let dataset = Dataset::from_table(&load_synthetic());
    let split = dataset.random_split(0.2, 42);
    let y_test = split.test.labels_array();

    let mut linear = LinearRegression::default();
    linear
        .fit(&split.train.features_array(), &split.train.labels_array())
        .unwrap();
    let linear_report =
        RegressionReport::calculate(&y_test, &linear.predict(&split.test.features_array()).unwrap());

    let mut forest = RandomForest::new(ForestConfig {
        n_trees: 25,
        ..Default::default()
    });
    forest.fit(&split.train);
    let forest_report =
        RegressionReport::calculate(&y_test, &Array1::from_vec(forest.predict(&split.test)));

    for report in [&linear_report, &forest_report] {
        assert!(report.mse >= 0.0);
        assert!(report.r2 <= 1.0);
    }
}

#[test]
fn missing_input_reports_the_configuration_error() {
    let err = read_table(None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No file uploaded. Please upload a ZIP or CSV file."
    );
}
