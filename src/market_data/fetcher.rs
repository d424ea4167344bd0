use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use super::cache::{FetchCache, FetchKey};
use super::provider::HistoricalDataProvider;
use crate::error::ScreenerError;
use crate::models::MarketTable;

/// 캐시를 거치는 일봉 조회기
pub struct DataFetcher {
    provider: Arc<dyn HistoricalDataProvider>,
    cache: FetchCache,
}

impl DataFetcher {
    pub fn new(provider: Arc<dyn HistoricalDataProvider>, cache: FetchCache) -> Self {
        Self { provider, cache }
    }

    /// 시스템 시계와 주어진 TTL 로 생성
    pub fn with_ttl(provider: Arc<dyn HistoricalDataProvider>, ttl: Duration) -> Self {
        Self::new(provider, FetchCache::with_ttl(ttl))
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    /// 티커 배치 하나를 조회
    ///
    /// 같은 인자로 TTL 안에 다시 부르면 제공자를 호출하지 않고 이전 결과를 돌려준다.
    /// 실패는 캐시하지 않는다.
    pub async fn fetch(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<MarketTable>, ScreenerError> {
        if tickers.is_empty() {
            return Err(ScreenerError::InvalidParameter("ticker list is empty".into()));
        }
        if start >= end {
            return Err(ScreenerError::InvalidParameter(format!(
                "start {} must be before end {}",
                start, end
            )));
        }

        let key = FetchKey::new(tickers, start, end);
        if let Some(table) = self.cache.get(&key).await {
            log::debug!("캐시 적중: 티커 {}개 ({} ~ {})", tickers.len(), start, end);
            return Ok(table);
        }

        log::debug!(
            "{:?} 조회: 티커 {}개 ({} ~ {})",
            self.provider.source(),
            tickers.len(),
            start,
            end
        );
        let table = self.provider.fetch_history(tickers, start, end).await?;
        Ok(self.cache.insert(key, table).await)
    }
}
