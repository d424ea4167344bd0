// 스캔 API 핸들러

use std::convert::Infallible;
use std::sync::Arc;

use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::reply::{json, with_header, with_status, Reply};
use warp::sse::Event;

use crate::config::Config;
use crate::core::{parse_tickers, ScanSession, Scanner};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// 스트림/CSV 조회 쿼리 (`?tickers=AAPL,MSFT`)
#[derive(Debug, Deserialize)]
pub struct ScanQuery {
  pub tickers: Option<String>,
}

/// JSON 스캔 요청
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
  pub tickers: String,
}

#[derive(Debug, Serialize)]
struct Health {
  status: &'static str,
  version: &'static str,
}

fn error_body(message: impl Into<String>) -> serde_json::Value {
  serde_json::json!({ "error": message.into() })
}

fn escape_html(input: &str) -> String {
  input
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
}

/// 기본 티커 목록이 채워진 메인 페이지
pub fn render_index(default_tickers: &str) -> String {
  INDEX_HTML.replace("{{DEFAULT_TICKERS}}", &escape_html(default_tickers))
}

/// 헬스체크 핸들러
pub async fn health_handler() -> Result<impl Reply, warp::Rejection> {
  Ok(json(&Health { status: "ok", version: crate::VERSION }))
}

/// 메인 페이지 핸들러
pub async fn index_handler(config: Config) -> Result<impl Reply, warp::Rejection> {
  Ok(warp::reply::html(render_index(&config.scan.default_tickers)))
}

/// 전체 스캔 후 보고서를 JSON 으로 반환
pub async fn scan_handler(
  req: ScanRequest,
  scanner: Arc<Scanner>,
) -> Result<impl Reply, warp::Rejection> {
  let tickers = parse_tickers(&req.tickers);
  if tickers.is_empty() {
    return Ok(with_status(json(&error_body("no tickers given")), StatusCode::BAD_REQUEST));
  }

  let report = scanner.run(tickers).await;
  Ok(with_status(json(&report), StatusCode::OK))
}

/// 배치마다 `progress` 이벤트, 마지막에 `done` 이벤트를 보내는 SSE 스캔
pub async fn scan_stream_handler(
  query: ScanQuery,
  scanner: Arc<Scanner>,
  config: Config,
) -> Result<impl Reply, warp::Rejection> {
  let input = query.tickers.unwrap_or(config.scan.default_tickers);
  let session = scanner.session(parse_tickers(&input));
  Ok(warp::sse::reply(warp::sse::keep_alive().stream(scan_events(session))))
}

/// 결과 표를 CSV 로 반환
pub async fn scan_csv_handler(
  query: ScanQuery,
  scanner: Arc<Scanner>,
  config: Config,
) -> Result<impl Reply, warp::Rejection> {
  let input = query.tickers.unwrap_or(config.scan.default_tickers);
  let report = scanner.run(parse_tickers(&input)).await;

  match report.to_csv() {
    Ok(body) => Ok(with_header(
      with_header(body, "content-type", "text/csv; charset=utf-8"),
      "content-disposition",
      "attachment; filename=\"vwap_breakouts.csv\"",
    )
    .into_response()),
    Err(e) => Ok(with_status(json(&error_body(e.to_string())), StatusCode::INTERNAL_SERVER_ERROR).into_response()),
  }
}

fn json_event<T: Serialize>(name: &str, value: &T) -> Event {
  Event::default()
    .event(name)
    .json_data(value)
    .unwrap_or_else(|e| Event::default().event("failure").data(e.to_string()))
}

/// 스캔 세션을 SSE 이벤트 스트림으로 변환
///
/// 배치는 스트림이 폴링될 때마다 하나씩 처리된다.
pub fn scan_events(session: ScanSession) -> impl Stream<Item = Result<Event, Infallible>> {
  stream::unfold(Some(session), |state| async move {
    let mut session = state?;
    let batch = session.next_batch().await;
    let (event, next) = match batch {
      Some(batch) => (json_event("progress", &batch), Some(session)),
      None => (json_event("done", &session.into_report()), None),
    };
    Some((Ok(event), next))
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_index_escapes_defaults() {
    let page = render_index("AAPL,<script>");
    assert!(page.contains("AAPL,&lt;script&gt;"));
    assert!(!page.contains("{{DEFAULT_TICKERS}}"));
  }
}
