//! 스캔 결과 보고서
//!
//! 결과 표 (터미널용 텍스트, CSV) 와 안내 메시지

use serde::Serialize;

use crate::error::ScreenerError;
use crate::models::BreakoutResult;

pub const RESULTS_HEADING: &str = "Stocks that passed VWAP in the last 2 days";
pub const NO_RESULTS_MESSAGE: &str = "No stocks passed their VWAP in the last 2 days";

const COLUMNS: [&str; 3] = ["Ticker", "Closing Price", "Latest VWAP"];

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
  pub ticker_count: usize,
  pub results: Vec<BreakoutResult>,
  pub errors: Vec<String>,
  pub message: String,
}

impl ScanReport {
  pub fn new(ticker_count: usize, results: Vec<BreakoutResult>, errors: Vec<String>) -> Self {
    let message = if results.is_empty() { NO_RESULTS_MESSAGE } else { RESULTS_HEADING };
    ScanReport {
      ticker_count,
      results,
      errors,
      message: message.to_string(),
    }
  }

  pub fn has_results(&self) -> bool {
    !self.results.is_empty()
  }

  /// 터미널 출력용 표
  pub fn render_table(&self) -> String {
    if self.results.is_empty() {
      return NO_RESULTS_MESSAGE.to_string();
    }

    let rows: Vec<[&str; 3]> = self.results.iter()
      .map(|r| [r.ticker.as_str(), r.closing_price.as_str(), r.latest_vwap.as_str()])
      .collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
      for (w, cell) in widths.iter_mut().zip(row.iter()) {
        *w = (*w).max(cell.len());
      }
    }

    let line = |cells: [&str; 3]| {
      format!("{:<w0$}  {:>w1$}  {:>w2$}", cells[0], cells[1], cells[2],
        w0 = widths[0], w1 = widths[1], w2 = widths[2])
    };

    let mut out = vec![RESULTS_HEADING.to_string(), line(COLUMNS)];
    out.push("-".repeat(widths.iter().sum::<usize>() + 4));
    out.extend(rows.into_iter().map(line));
    out.join("\n")
  }

  /// 결과 표 CSV
  pub fn to_csv(&self) -> Result<String, ScreenerError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if self.results.is_empty() {
      writer.write_record(COLUMNS)?;
    }
    for result in &self.results {
      writer.serialize(result)?;
    }
    let bytes = writer.into_inner().map_err(|e| ScreenerError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ScreenerError::ParseError(e.to_string()))
  }
}
