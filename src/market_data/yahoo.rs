//! Yahoo Finance 일봉 제공자
//!
//! v8 chart API 로 종목별 OHLCV 를 받아 `MarketTable` 로 정규화한다.
//! 배치 내 종목은 순서대로 요청한다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use super::provider::{DataSource, HistoricalDataProvider};
use crate::error::ScreenerError;
use crate::models::{MarketTable, PriceBar, Series};
use crate::utils::{date_to_timestamp, timestamp_to_date};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
pub(crate) struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(base_url: impl Into<String>, timeout_ms: Option<u64>) -> Result<Self, ScreenerError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// 종료일 당일 봉까지 포함하도록 period2 는 다음날 자정
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let period1 = date_to_timestamp(start);
        let period2 = date_to_timestamp(end) + 86_400;
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url, symbol, period1, period2
        )
    }

    /// chart 응답을 시계열로 변환
    pub(crate) fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Series, ScreenerError> {
        let result = match (resp.chart.result, resp.chart.error) {
            (_, Some(err)) if err.code == "Not Found" => {
                return Err(ScreenerError::SymbolNotFound(symbol.to_string()));
            }
            (_, Some(err)) => {
                return Err(ScreenerError::FetchFailure(format!(
                    "{}: {}: {}",
                    symbol, err.code, err.description
                )));
            }
            (Some(result), None) => result,
            (None, None) => {
                return Err(ScreenerError::ParseError(format!("{}: empty chart result", symbol)));
            }
        };

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| ScreenerError::ParseError(format!("{}: result array is empty", symbol)))?;

        // 상장 전 구간 등은 timestamp 자체가 없다
        let Some(timestamps) = data.timestamp else {
            return Ok(Series::default());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ScreenerError::ParseError(format!("{}: no quote data", symbol)))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = timestamp_to_date(ts)
                .ok_or_else(|| ScreenerError::ParseError(format!("{}: invalid timestamp {}", symbol, ts)))?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // 휴장일 등 전부 비어 있는 행은 건너뜀
            if open.is_none() && high.is_none() && low.is_none() && close.is_none() && volume.is_none() {
                continue;
            }

            bars.push(PriceBar::new(
                date,
                open.unwrap_or(f64::NAN),
                high.unwrap_or(f64::NAN),
                low.unwrap_or(f64::NAN),
                close.unwrap_or(f64::NAN),
                volume.unwrap_or(f64::NAN),
            ));
        }

        Ok(Series::new(bars))
    }

    async fn fetch_symbol(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Series, ScreenerError> {
        let url = self.chart_url(symbol, start, end);
        log::debug!("Yahoo 요청: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScreenerError::FetchFailure(format!("{}: {}", symbol, e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ScreenerError::FetchFailure(format!("{}: {}", symbol, e)))?;

        // 404 도 chart.error 본문을 담아 오므로 먼저 본문을 해석한다
        match serde_json::from_str::<ChartResponse>(&body) {
            Ok(chart) => Self::parse_response(symbol, chart),
            Err(_) if !status.is_success() => Err(ScreenerError::FetchFailure(format!(
                "{}: HTTP {}",
                symbol, status
            ))),
            Err(e) => Err(ScreenerError::ParseError(format!("{}: {}", symbol, e))),
        }
    }
}

#[async_trait]
impl HistoricalDataProvider for YahooProvider {
    fn source(&self) -> DataSource {
        DataSource::YahooFinance
    }

    async fn fetch_history(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<MarketTable, ScreenerError> {
        let mut table = MarketTable::new();
        let mut failures = Vec::new();
        for ticker in tickers {
            match self.fetch_symbol(ticker, start, end).await {
                Ok(series) if series.is_empty() => {
                    log::warn!("{}: 조회 기간에 데이터 없음", ticker);
                }
                Ok(series) => table.insert(ticker.clone(), series),
                Err(ScreenerError::SymbolNotFound(symbol)) => {
                    log::warn!("{}: 알 수 없는 티커, 건너뜀", symbol);
                }
                Err(e) => {
                    log::warn!("{}: 조회 실패, 건너뜀: {}", ticker, e);
                    failures.push(e);
                }
            }
        }

        // 배치의 모든 종목이 오류로 끝난 경우에만 배치 실패
        if !failures.is_empty() && failures.len() == tickers.len() {
            if failures.len() == 1 {
                return Err(failures.remove(0));
            }
            let messages: Vec<String> = failures.iter().map(|e| e.to_string()).collect();
            return Err(ScreenerError::FetchFailure(messages.join("; ")));
        }
        Ok(table)
    }
}
