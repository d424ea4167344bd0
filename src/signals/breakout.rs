/**
* filename : breakout
* author : HAMA
* date: 2025. 5. 11.
* description: 최근 2거래일 내 종가의 VWAP 상향 돌파 탐지
**/

use crate::indicators::series_vwap;
use crate::models::{BreakoutResult, Series};

/// 판정에 쓰는 마지막 봉 개수 (d0, d1, d2)
pub const BREAKOUT_WINDOW: usize = 3;

/// 마지막 3개 위치에서 "새로운" 상향 돌파 여부
///
/// 각 종가는 같은 위치의 VWAP과 비교한다. d1 또는 d2에서 종가 > VWAP 이고,
/// d0에서는 종가 > VWAP 이 아니어야 한다. NaN 비교는 항상 거짓이다.
pub fn is_fresh_breakout(closes: &[f64], vwap: &[f64]) -> bool {
  let n = closes.len();
  if n < BREAKOUT_WINDOW || vwap.len() != n {
    return false;
  }

  let (d0, d1, d2) = (n - 3, n - 2, n - 1);
  let above = |i: usize| closes[i] > vwap[i];

  (above(d1) || above(d2)) && !above(d0)
}

/// 한 종목 시계열에 대해 돌파 판정
///
/// 봉이 3개 미만이거나 최신 종가/VWAP이 정의되지 않으면 `None`.
pub fn detect(ticker: &str, series: &Series) -> Option<BreakoutResult> {
  if series.len() < BREAKOUT_WINDOW {
    return None;
  }

  let closes = series.closes();
  let vwap = series_vwap(series);
  detect_from_parts(ticker, &closes, &vwap)
}

/// 종가/VWAP이 이미 계산된 경우
pub fn detect_from_parts(ticker: &str, closes: &[f64], vwap: &[f64]) -> Option<BreakoutResult> {
  if !is_fresh_breakout(closes, vwap) {
    return None;
  }

  let latest_close = *closes.last()?;
  let latest_vwap = *vwap.last()?;
  if !latest_close.is_finite() || !latest_vwap.is_finite() {
    return None;
  }

  Some(BreakoutResult::new(ticker, latest_close, latest_vwap))
}
