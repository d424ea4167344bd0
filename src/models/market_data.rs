use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 하루치 OHLCV 봉
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// (고가 + 저가 + 종가) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// 한 종목의 날짜순 일봉 시계열
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    bars: Vec<PriceBar>,
}

impl Series {
    /// 날짜 오름차순으로 정렬하고 같은 날짜는 마지막 봉만 남긴다
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by(|later, earlier| {
            if later.date == earlier.date {
                *earlier = *later;
                true
            } else {
                false
            }
        });
        Series { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}

impl From<Vec<PriceBar>> for Series {
    fn from(bars: Vec<PriceBar>) -> Self {
        Series::new(bars)
    }
}

/// 조회 결과: 티커 -> 시계열
///
/// 단일/다중 종목 응답 모두 이 형태로 정규화된다. 순회 순서는 티커 사전순.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketTable {
    series: BTreeMap<String, Series>,
}

impl MarketTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: impl Into<String>, series: Series) {
        self.series.insert(ticker.into(), series);
    }

    pub fn get(&self, ticker: &str) -> Option<&Series> {
        self.series.get(ticker)
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.series.iter().map(|(t, s)| (t.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl FromIterator<(String, Series)> for MarketTable {
    fn from_iter<I: IntoIterator<Item = (String, Series)>>(iter: I) -> Self {
        MarketTable {
            series: iter.into_iter().collect(),
        }
    }
}
