//! Chart rendering module
//!
//! Four independent, stateless renderers over the normalized price table,
//! each producing one PNG figure and carrying a fixed explanatory caption.

mod charts;

pub use charts::{plot_adj_close, plot_high_low_close, plot_predictions, plot_volume};

/// Caption for the adjusted closing price chart
pub const ADJ_CLOSE_CAPTION: &str = "\
The Adjusted Closing Price plot shows the trend of adjusted stock prices over time.
This metric accounts for stock splits and dividends, providing a more accurate representation of the stock's value for comparison.
A steady upward trend indicates strong market performance and growth over the years, punctuated by occasional market corrections.";

/// Caption for the trading volume chart
pub const VOLUME_CAPTION: &str = "\
The Trading Volume chart highlights fluctuations in the number of shares traded over time.
Peaks often coincide with significant events, such as product launches, earnings announcements, or broader market events.
Periods of higher volume indicate increased investor activity, which can signal high interest or volatility in the stock.";

/// Caption for the high/low/close comparison chart
pub const HIGH_LOW_CLOSE_CAPTION: &str = "\
The High, Low, and Close Price comparison provides a comprehensive view of the stock's daily performance over time.
The High and Low values show the day's price range, while the Close price reflects the final value at the end of trading.
This comparison is critical for understanding the stock's volatility and daily trading behavior.";

/// Caption for the actual-vs-predicted price chart
pub const PREDICTIONS_CAPTION: &str = "\
The comparison of actual vs predicted prices provides a visual representation of model performance.
The Linear Regression model shows smoother predictions due to its simplicity, while the Random Forest model captures more intricate patterns,
resulting in closer alignment with actual prices in complex scenarios.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_chart_has_a_caption() {
        let captions = [
            ADJ_CLOSE_CAPTION,
            VOLUME_CAPTION,
            HIGH_LOW_CLOSE_CAPTION,
            PREDICTIONS_CAPTION,
        ];

        for caption in captions {
            assert!(!caption.is_empty());
        }
        for pair in captions.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
