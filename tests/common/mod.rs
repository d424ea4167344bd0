//! 통합 테스트 공용 헬퍼

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use mockall::mock;
use vwap_scanner::core::Scanner;
use vwap_scanner::error::ScreenerError;
use vwap_scanner::market_data::{DataFetcher, DataSource, FetchCache, HistoricalDataProvider};
use vwap_scanner::models::{MarketTable, PriceBar, Series};

pub fn start_date() -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn end_date() -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
}

/// high == low == close 인 봉으로 시계열 생성 (typical price == close)
pub fn series_from_closes(closes: &[f64]) -> Series {
  let bars = closes.iter()
    .enumerate()
    .map(|(i, &c)| PriceBar::new(start_date() + Duration::days(i as i64), c, c, c, c, 1_000.0))
    .collect::<Vec<_>>();
  Series::new(bars)
}

/// 마지막 봉에서 VWAP 을 새로 상향 돌파하는 시계열
pub fn breakout_series() -> Series {
  let mut closes = vec![20.0; 10];
  closes.extend_from_slice(&[10.0, 10.0, 30.0]);
  series_from_closes(&closes)
}

/// 종가가 VWAP 과 같은 평탄한 시계열
pub fn flat_series() -> Series {
  series_from_closes(&[50.0; 20])
}

/// "FLAT" 으로 시작하는 티커는 평탄, 나머지는 돌파 시계열
pub fn table_for(tickers: &[String]) -> MarketTable {
  tickers.iter()
    .map(|t| {
      let series = if t.starts_with("FLAT") { flat_series() } else { breakout_series() };
      (t.clone(), series)
    })
    .collect()
}

mock! {
  pub Provider {}

  #[async_trait]
  impl HistoricalDataProvider for Provider {
    fn source(&self) -> DataSource;

    async fn fetch_history(
      &self,
      tickers: &[String],
      start: NaiveDate,
      end: NaiveDate,
    ) -> Result<MarketTable, ScreenerError>;
  }
}

pub fn mock_provider() -> MockProvider {
  let mut provider = MockProvider::new();
  provider.expect_source().return_const(DataSource::Synthetic);
  provider
}

pub fn scanner_with(provider: MockProvider, batch_size: usize) -> Scanner {
  let fetcher = DataFetcher::new(Arc::new(provider), FetchCache::with_ttl(Duration::hours(1)));
  Scanner::new(Arc::new(fetcher), batch_size, 365)
}
