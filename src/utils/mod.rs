//! 시간 관련 유틸리티
//!
//! 조회 기간 계산, 타임스탬프 변환, 가격 포맷팅 함수 제공

pub mod logging;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// 유닉스 타임스탬프(초)를 UTC 날짜로 변환
pub fn timestamp_to_date(timestamp_secs: i64) -> Option<NaiveDate> {
  DateTime::<Utc>::from_timestamp(timestamp_secs, 0).map(|dt| dt.date_naive())
}

/// 날짜의 시작 시각(UTC 자정)을 타임스탬프(초)로 변환
pub fn date_to_timestamp(date: NaiveDate) -> i64 {
  date.and_hms_opt(0, 0, 0)
    .map(|dt| dt.and_utc().timestamp())
    .unwrap_or_default()
}

/// `end`로 끝나는 `lookback_days`일 조회 기간
pub fn lookback_range(end: NaiveDate, lookback_days: i64) -> (NaiveDate, NaiveDate) {
  (end - Duration::days(lookback_days), end)
}

/// 오늘(UTC)로 끝나는 조회 기간
pub fn lookback_from_today(lookback_days: i64) -> (NaiveDate, NaiveDate) {
  lookback_range(Utc::now().date_naive(), lookback_days)
}

/// 달러 표기 (소수점 둘째 자리)
pub fn format_usd(value: f64) -> String {
  format!("${:.2}", value)
}
