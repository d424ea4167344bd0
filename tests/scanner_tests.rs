//! 배치 스캔 통합 테스트

mod common;

use vwap_scanner::core::{parse_tickers, NO_RESULTS_MESSAGE, RESULTS_HEADING};
use vwap_scanner::error::ScreenerError;

use common::{end_date, mock_provider, scanner_with, start_date, table_for};

#[tokio::test]
async fn test_two_tickers_fit_in_one_batch() {
  let mut provider = mock_provider();
  provider.expect_fetch_history()
    .withf(|tickers, _, _| tickers.len() == 2 && tickers[0] == "AAPL" && tickers[1] == "MSFT")
    .times(1)
    .returning(|tickers, _, _| Ok(table_for(tickers)));

  let scanner = scanner_with(provider, 100);
  let report = scanner.run(parse_tickers("AAPL,MSFT")).await;

  assert_eq!(report.ticker_count, 2);
  assert_eq!(report.results.len(), 2);
  assert!(report.errors.is_empty());
  assert_eq!(report.message, RESULTS_HEADING);
}

#[tokio::test]
async fn test_batches_are_split_and_progress_reported() {
  let mut provider = mock_provider();
  provider.expect_fetch_history()
    .times(3)
    .returning(|tickers, _, _| Ok(table_for(tickers)));

  let scanner = scanner_with(provider, 2);
  let tickers = parse_tickers("A,B,C,D,FLAT1");
  let mut session = scanner.session_with_range(tickers, start_date(), end_date());
  assert_eq!(session.batch_count(), 3);

  let mut progress = Vec::new();
  let mut sizes = Vec::new();
  while let Some(batch) = session.next_batch().await {
    progress.push(batch.progress);
    sizes.push(batch.tickers.len());
  }

  assert_eq!(sizes, vec![2, 2, 1]);
  assert_eq!(progress, vec![0.4, 0.8, 1.0]);
  assert!(session.is_finished());

  let report = session.into_report();
  let found: Vec<&str> = report.results.iter().map(|r| r.ticker.as_str()).collect();
  assert_eq!(found, vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn test_failed_batch_is_reported_and_scan_continues() {
  let mut provider = mock_provider();
  provider.expect_fetch_history()
    .times(3)
    .returning(|tickers, _, _| {
      if tickers[0] == "BAD" {
        Err(ScreenerError::FetchFailure("provider unavailable".into()))
      } else {
        Ok(table_for(tickers))
      }
    });

  let scanner = scanner_with(provider, 1);
  let mut session = scanner.session_with_range(parse_tickers("AAPL,BAD,MSFT"), start_date(), end_date());

  let mut batches = Vec::new();
  while let Some(batch) = session.next_batch().await {
    batches.push(batch);
  }
  assert!(batches[0].error.is_none());
  assert_eq!(
    batches[1].error.as_deref(),
    Some("Error fetching data: Fetch failure: provider unavailable")
  );
  assert!(batches[1].results.is_empty());
  assert!(batches[2].error.is_none());

  let report = session.into_report();
  assert_eq!(report.errors.len(), 1);
  assert_eq!(report.results.len(), 2);
}

#[tokio::test]
async fn test_no_breakouts_gives_informational_message() {
  let mut provider = mock_provider();
  provider.expect_fetch_history()
    .times(1)
    .returning(|tickers, _, _| Ok(table_for(tickers)));

  let scanner = scanner_with(provider, 100);
  let report = scanner.run(parse_tickers("FLAT1,FLAT2")).await;

  assert!(!report.has_results());
  assert_eq!(report.message, NO_RESULTS_MESSAGE);
  assert_eq!(report.render_table(), NO_RESULTS_MESSAGE);
}

#[tokio::test]
async fn test_tickers_missing_from_response_are_skipped() {
  let mut provider = mock_provider();
  provider.expect_fetch_history()
    .times(1)
    .returning(|tickers, _, _| Ok(table_for(&tickers[..1])));

  let scanner = scanner_with(provider, 100);
  let report = scanner.run(parse_tickers("AAPL,DELISTED")).await;

  assert_eq!(report.results.len(), 1);
  assert_eq!(report.results[0].ticker, "AAPL");
  assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_empty_input_runs_no_batches() {
  let mut provider = mock_provider();
  provider.expect_fetch_history().never();

  let scanner = scanner_with(provider, 100);
  let report = scanner.run(parse_tickers(" , ")).await;

  assert_eq!(report.ticker_count, 0);
  assert_eq!(report.message, NO_RESULTS_MESSAGE);
}
