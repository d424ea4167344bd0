//! VWAP 돌파 스캐너 라이브러리
//!
//! 티커 목록의 일봉을 조회해 누적 VWAP 을 계산하고, 최근 2거래일 안에
//! 종가가 VWAP 을 새로 상향 돌파한 종목을 찾는다.

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod models;
pub mod signals;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::ScreenerError;
pub use crate::models::{BreakoutResult, MarketTable, PriceBar, Series};
pub use crate::market_data::{DataFetcher, HistoricalDataProvider};
pub use crate::core::{ScanReport, Scanner};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ScreenerError>;
