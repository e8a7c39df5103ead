//! The four chart renderers

use crate::data::PriceTable;
use anyhow::{anyhow, bail, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

const CHART_SIZE: (u32, u32) = (1280, 640);

const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Line plot of the adjusted closing price over time
pub fn plot_adj_close(table: &PriceTable, path: &Path) -> Result<()> {
    let (x_min, x_max) = table
        .date_range()
        .ok_or_else(|| anyhow!("Cannot plot an empty table"))?;
    let (y_min, y_max) = padded_range(table.bars.iter().map(|b| b.adj_close))?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill canvas: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Adjusted Closing Price Over Time",
            ("sans-serif", 28.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Adjusted Close Price (USD)")
        .draw()
        .map_err(|e| anyhow!("Failed to draw mesh: {}", e))?;

    chart
        .draw_series(LineSeries::new(
            table.bars.iter().map(|b| (b.date, b.adj_close)),
            &BLUE,
        ))
        .map_err(|e| anyhow!("Failed to draw series: {}", e))?
        .label("Adj Close")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| anyhow!("Failed to draw legend: {}", e))?;

    root.present()
        .map_err(|e| anyhow!("Failed to render chart: {}", e))?;
    info!(?path, "chart written");
    Ok(())
}

/// Filled area plot of the rescaled trading volume over the numeric date axis
pub fn plot_volume(table: &PriceTable, path: &Path) -> Result<()> {
    if table.is_empty() {
        bail!("Cannot plot an empty table");
    }

    let x_min = table.bars.first().map(|b| b.numeric_date).unwrap_or(0.0);
    let x_max = table.bars.last().map(|b| b.numeric_date).unwrap_or(1.0);
    let (_, y_max) = padded_range(table.bars.iter().map(|b| b.volume))?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill canvas: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Trading Volume Over Time", ("sans-serif", 28.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| anyhow!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .x_desc("Days since epoch")
        .y_desc("Volume (Millions of Shares)")
        .draw()
        .map_err(|e| anyhow!("Failed to draw mesh: {}", e))?;

    chart
        .draw_series(AreaSeries::new(
            table.bars.iter().map(|b| (b.numeric_date, b.volume)),
            0.0,
            ORANGE.mix(0.5),
        ))
        .map_err(|e| anyhow!("Failed to draw series: {}", e))?
        .label("Volume (in millions)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ORANGE));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| anyhow!("Failed to draw legend: {}", e))?;

    root.present()
        .map_err(|e| anyhow!("Failed to render chart: {}", e))?;
    info!(?path, "chart written");
    Ok(())
}

/// Overlaid line plots of the High, Low and Close price series
pub fn plot_high_low_close(table: &PriceTable, path: &Path) -> Result<()> {
    let (x_min, x_max) = table
        .date_range()
        .ok_or_else(|| anyhow!("Cannot plot an empty table"))?;
    let lows = padded_range(table.bars.iter().map(|b| b.low))?;
    let highs = padded_range(table.bars.iter().map(|b| b.high))?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill canvas: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "High, Low, and Close Price Comparison",
            ("sans-serif", 28.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, lows.0..highs.1)
        .map_err(|e| anyhow!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Price (USD)")
        .draw()
        .map_err(|e| anyhow!("Failed to draw mesh: {}", e))?;

    let series: [(&str, RGBColor, fn(&crate::data::DailyBar) -> f64); 3] = [
        ("High", GREEN, |b| b.high),
        ("Low", RED, |b| b.low),
        ("Close", BLUE, |b| b.close),
    ];

    for (name, color, value) in series {
        chart
            .draw_series(LineSeries::new(
                table.bars.iter().map(|b| (b.date, value(b))),
                &color.mix(0.7),
            ))
            .map_err(|e| anyhow!("Failed to draw series: {}", e))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| anyhow!("Failed to draw legend: {}", e))?;

    root.present()
        .map_err(|e| anyhow!("Failed to render chart: {}", e))?;
    info!(?path, "chart written");
    Ok(())
}

/// Actual vs predicted adjusted close for both models, over test-sample index
pub fn plot_predictions(
    actual: &[f64],
    predicted_linear: &[f64],
    predicted_forest: &[f64],
    path: &Path,
) -> Result<()> {
    if actual.is_empty() {
        bail!("Cannot plot an empty prediction set");
    }

    let all = actual
        .iter()
        .chain(predicted_linear)
        .chain(predicted_forest)
        .copied();
    let (y_min, y_max) = padded_range(all)?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill canvas: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Actual vs Predicted Adjusted Closing Prices",
            ("sans-serif", 28.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..actual.len() as f64, y_min..y_max)
        .map_err(|e| anyhow!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .x_desc("Test Data Index")
        .y_desc("Adjusted Close Price (USD)")
        .draw()
        .map_err(|e| anyhow!("Failed to draw mesh: {}", e))?;

    let series = [
        ("Actual Prices", BLUE, actual),
        ("Predicted Prices (Linear Regression)", GREEN, predicted_linear),
        ("Predicted Prices (Random Forest)", ORANGE, predicted_forest),
    ];

    for (name, color, values) in series {
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                &color.mix(0.7),
            ))
            .map_err(|e| anyhow!("Failed to draw series: {}", e))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| anyhow!("Failed to draw legend: {}", e))?;

    root.present()
        .map_err(|e| anyhow!("Failed to render chart: {}", e))?;
    info!(?path, "chart written");
    Ok(())
}

/// Min/max of a value series with 10% padding on both ends
fn padded_range(values: impl Iterator<Item = f64>) -> Result<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() || !max.is_finite() {
        bail!("Cannot derive an axis range from an empty or non-finite series");
    }

    let padding = (max - min).max(1e-8) * 0.1;
    Ok((min - padding, max + padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PriceTable;
    use tempfile::tempdir;

    fn sample_table() -> PriceTable {
        let csv = "\
Date,Open,High,Low,Close,Adj Close,Volume
2020-01-02,74.06,75.15,73.80,75.09,72.96,135480400
2020-01-03,74.29,75.14,74.13,74.36,72.25,146322800
2020-01-06,73.45,74.99,73.19,74.95,72.83,118387200
";
        let mut table = PriceTable::from_csv(csv.as_bytes()).unwrap();
        table.normalize();
        table
    }

    #[test]
    fn test_charts_render_to_png() {
        let table = sample_table();
        let dir = tempdir().unwrap();

        let adj = dir.path().join("adj_close.png");
        let vol = dir.path().join("volume.png");
        let hlc = dir.path().join("high_low_close.png");

        plot_adj_close(&table, &adj).unwrap();
        plot_volume(&table, &vol).unwrap();
        plot_high_low_close(&table, &hlc).unwrap();

        for path in [adj, vol, hlc] {
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_prediction_chart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("predictions.png");

        let actual = vec![72.9, 72.2, 72.8];
        let linear = vec![72.5, 72.4, 72.6];
        let forest = vec![72.8, 72.3, 72.7];

        plot_predictions(&actual, &linear, &forest, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.png");

        let table = PriceTable::default();
        assert!(plot_adj_close(&table, &path).is_err());
        assert!(plot_volume(&table, &path).is_err());
    }
}
