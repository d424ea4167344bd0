//! 조회 결과 캐시
//!
//! 동일 인자 (티커 목록, 시작일, 종료일) 의 조회 결과를 고정 TTL 동안 보관한다.
//! 시계는 주입 가능하다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::models::MarketTable;

/// 현재 시각 제공자
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 움직이는 시계 (테스트용)
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// 캐시 키: 인자 완전 일치
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub tickers: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchKey {
    pub fn new(tickers: &[String], start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            tickers: tickers.to_vec(),
            start,
            end,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    table: Arc<MarketTable>,
}

pub struct FetchCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<FetchKey, CacheEntry>>,
}

impl FetchCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// 시스템 시계를 쓰는 캐시
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(SystemClock))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.fetched_at < self.ttl
    }

    /// 유효한 캐시 항목 조회
    pub async fn get(&self, key: &FetchKey) -> Option<Arc<MarketTable>> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.table.clone())
    }

    /// 결과 저장 후 공유 핸들 반환
    pub async fn insert(&self, key: FetchKey, table: MarketTable) -> Arc<MarketTable> {
        let table = Arc::new(table);
        let entry = CacheEntry {
            fetched_at: self.clock.now(),
            table: table.clone(),
        };

        let mut entries = self.entries.write().await;
        let now = entry.fetched_at;
        entries.retain(|_, e| now - e.fetched_at < self.ttl);
        entries.insert(key, entry);
        table
    }

    /// 만료 항목 제거, 제거된 개수 반환
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| now - e.fetched_at < self.ttl);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
