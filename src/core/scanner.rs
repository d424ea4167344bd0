/**
* filename : scanner
* author : HAMA
* date: 2025. 5. 11.
* description: 티커 배치 분할, 조회, 돌파 판정, 진행률 보고
**/

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Config;
use crate::core::report::ScanReport;
use crate::market_data::DataFetcher;
use crate::models::BreakoutResult;
use crate::signals::detect;
use crate::utils::{logging, lookback_from_today};

/// 쉼표 구분 티커 입력 파싱
///
/// 공백 제거, 대문자화, 빈 항목과 중복 제거 (처음 나온 순서 유지).
pub fn parse_tickers(input: &str) -> Vec<String> {
  let mut seen = HashSet::new();
  input.split(',')
    .map(|t| t.trim().to_uppercase())
    .filter(|t| !t.is_empty())
    .filter(|t| seen.insert(t.clone()))
    .collect()
}

/// 배치 하나의 처리 결과
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
  pub batch_index: usize,
  pub batch_count: usize,
  pub tickers: Vec<String>,
  /// 0.0 ~ 1.0
  pub progress: f64,
  pub results: Vec<BreakoutResult>,
  pub error: Option<String>,
}

pub struct Scanner {
  fetcher: Arc<DataFetcher>,
  batch_size: usize,
  lookback_days: i64,
}

impl Scanner {
  pub fn new(fetcher: Arc<DataFetcher>, batch_size: usize, lookback_days: i64) -> Self {
    Scanner {
      fetcher,
      batch_size: batch_size.max(1),
      lookback_days,
    }
  }

  pub fn from_config(fetcher: Arc<DataFetcher>, config: &Config) -> Self {
    Self::new(fetcher, config.scan.batch_size, config.scan.lookback_days)
  }

  pub fn batch_size(&self) -> usize {
    self.batch_size
  }

  /// 오늘로 끝나는 기본 조회 기간으로 세션 생성
  pub fn session(&self, tickers: Vec<String>) -> ScanSession {
    let (start, end) = lookback_from_today(self.lookback_days);
    self.session_with_range(tickers, start, end)
  }

  pub fn session_with_range(&self, tickers: Vec<String>, start: NaiveDate, end: NaiveDate) -> ScanSession {
    ScanSession::new(self.fetcher.clone(), tickers, self.batch_size, start, end)
  }

  /// 모든 배치를 순서대로 처리
  pub async fn run(&self, tickers: Vec<String>) -> ScanReport {
    self.session(tickers).run_to_end().await
  }
}

/// 한 번의 스캔 진행 상태
///
/// 배치는 `next_batch` 호출마다 하나씩, 순서대로 처리된다.
pub struct ScanSession {
  fetcher: Arc<DataFetcher>,
  tickers: Vec<String>,
  batch_size: usize,
  start: NaiveDate,
  end: NaiveDate,
  offset: usize,
  batch_index: usize,
  results: Vec<BreakoutResult>,
  errors: Vec<String>,
}

impl ScanSession {
  fn new(
    fetcher: Arc<DataFetcher>,
    tickers: Vec<String>,
    batch_size: usize,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Self {
    let session = ScanSession {
      fetcher,
      tickers,
      batch_size: batch_size.max(1),
      start,
      end,
      offset: 0,
      batch_index: 0,
      results: Vec::new(),
      errors: Vec::new(),
    };
    logging::log_scan_start(session.tickers.len(), session.batch_count());
    session
  }

  pub fn ticker_count(&self) -> usize {
    self.tickers.len()
  }

  pub fn batch_count(&self) -> usize {
    self.tickers.len().div_ceil(self.batch_size)
  }

  pub fn is_finished(&self) -> bool {
    self.offset >= self.tickers.len()
  }

  /// 다음 배치 처리. 남은 배치가 없으면 `None`.
  ///
  /// 조회 실패는 사용자에게 보일 메시지로 기록되고 다음 배치로 넘어간다.
  pub async fn next_batch(&mut self) -> Option<BatchReport> {
    if self.is_finished() {
      return None;
    }

    let end_idx = usize::min(self.offset + self.batch_size, self.tickers.len());
    let batch = self.tickers[self.offset..end_idx].to_vec();

    let mut results = Vec::new();
    let mut error = None;
    match self.fetcher.fetch(&batch, self.start, self.end).await {
      Ok(table) => {
        results.extend(table.iter().filter_map(|(ticker, series)| detect(ticker, series)));
      }
      Err(e) => {
        logging::log_error(&format!("batch {}", self.batch_index + 1), &e);
        error = Some(format!("Error fetching data: {}", e));
      }
    }

    self.offset = end_idx;
    let progress = self.offset as f64 / self.tickers.len() as f64;
    let report = BatchReport {
      batch_index: self.batch_index,
      batch_count: self.batch_count(),
      tickers: batch,
      progress,
      results: results.clone(),
      error: error.clone(),
    };
    logging::log_batch_done(self.batch_index, report.tickers.len(), progress);

    self.batch_index += 1;
    self.results.extend(results);
    self.errors.extend(error);
    Some(report)
  }

  /// 누적 결과로 최종 보고서 생성
  pub fn into_report(self) -> ScanReport {
    logging::log_scan_end(self.results.len(), self.errors.len());
    ScanReport::new(self.tickers.len(), self.results, self.errors)
  }

  pub async fn run_to_end(mut self) -> ScanReport {
    while self.next_batch().await.is_some() {}
    self.into_report()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  #[rstest]
  #[case("AAPL,MSFT", vec!["AAPL", "MSFT"])]
  #[case(" aapl , msft ,", vec!["AAPL", "MSFT"])]
  #[case("AAPL,,AAPL,msft", vec!["AAPL", "MSFT"])]
  #[case("", vec![])]
  #[case(" , ", vec![])]
  fn test_parse_tickers(#[case] input: &str, #[case] expected: Vec<&str>) {
    assert_eq!(parse_tickers(input), expected);
  }
}
