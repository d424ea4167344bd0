use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataSource, HistoricalDataProvider};
use crate::error::ScreenerError;
use crate::models::{MarketTable, PriceBar, Series};

/// 네트워크 없이 쓰는 랜덤워크 일봉 제공자 (개발/데모용)
///
/// 같은 (티커, 기간)에는 항상 같은 시계열을 돌려준다.
pub struct SyntheticProvider {
    seed: u64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, ticker: &str, start: NaiveDate) -> StdRng {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        ticker.hash(&mut hasher);
        start.hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }

    /// 주말을 뺀 거래일 랜덤워크
    pub fn generate(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Series {
        let mut rng = self.rng_for(ticker, start);
        let mut last_price: f64 = rng.gen_range(20.0..500.0);
        let mut bars = Vec::new();

        let mut date = start;
        while date <= end {
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                let change = rng.gen_range(-0.03..0.03);
                let open = last_price;
                let close = f64::max(open * (1.0 + change), 1.0);
                let high = f64::max(open, close) * (1.0 + rng.gen_range(0.0..0.01));
                let low = f64::min(open, close) * (1.0 - rng.gen_range(0.0..0.01));
                let volume = rng.gen_range(100_000.0..5_000_000.0_f64).round();

                bars.push(PriceBar::new(date, open, high, low, close, volume));
                last_price = close;
            }
            date += Duration::days(1);
        }

        Series::new(bars)
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(42)
    }
}

#[async_trait]
impl HistoricalDataProvider for SyntheticProvider {
    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    async fn fetch_history(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<MarketTable, ScreenerError> {
        Ok(tickers
            .iter()
            .map(|t| (t.clone(), self.generate(t, start, end)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_skips_weekends() {
        let provider = SyntheticProvider::default();
        // 2024-01-01 (월) ~ 2024-01-14 (일): 거래일 10일
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        let series = provider.generate("AAPL", start, end);

        assert_eq!(series.len(), 10);
        for bar in series.bars() {
            assert!(bar.low <= bar.open && bar.open <= bar.high);
            assert!(bar.low <= bar.close && bar.close <= bar.high);
            assert!(bar.volume > 0.0);
        }
    }

    #[tokio::test]
    async fn test_fetch_is_deterministic() {
        let provider = SyntheticProvider::default();
        let tickers = vec!["AAPL".to_string(), "MSFT".to_string()];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let a = provider.fetch_history(&tickers, start, end).await.unwrap();
        let b = provider.fetch_history(&tickers, start, end).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert_ne!(a.get("AAPL"), a.get("MSFT"));
    }
}
