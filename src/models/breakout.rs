use serde::{Deserialize, Serialize};

use crate::utils::format_usd;

/// VWAP 돌파 종목 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakoutResult {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Closing Price")]
    pub closing_price: String,
    #[serde(rename = "Latest VWAP")]
    pub latest_vwap: String,
}

impl BreakoutResult {
    pub fn new(ticker: impl Into<String>, close: f64, vwap: f64) -> Self {
        BreakoutResult {
            ticker: ticker.into(),
            closing_price: format_usd(close),
            latest_vwap: format_usd(vwap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_column_labels() {
        let result = BreakoutResult::new("AAPL", 15.0, 11.8);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["Ticker"], "AAPL");
        assert_eq!(json["Closing Price"], "$15.00");
        assert_eq!(json["Latest VWAP"], "$11.80");
    }
}
