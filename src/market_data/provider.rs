use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScreenerError;
use crate::models::MarketTable;

/// 데이터 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    Synthetic,
}

/// 과거 일봉 데이터 제공자 인터페이스
///
/// 호출 한 번이 배치 하나에 대응한다. 배치 분할은 호출자 책임이다.
#[async_trait]
pub trait HistoricalDataProvider: Send + Sync {
    /// 제공자 종류
    fn source(&self) -> DataSource;

    /// 티커 목록의 `start..=end` 일봉 조회
    ///
    /// 조회에 실패한 티커는 결과에서 빠진다. 모든 티커가 실패한 경우에만 오류를 반환한다.
    async fn fetch_history(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<MarketTable, ScreenerError>;
}
