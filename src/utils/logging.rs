//! 로깅 유틸리티
//!
//! 로그 초기화 및 스캔 관련 로그 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::ScreenerError;

/// 로깅 시스템 초기화
///
/// `RUST_LOG`가 없으면 설정 파일의 레벨을 사용한다.
pub fn init(default_level: &str) -> Result<(), ScreenerError> {
    let rust_log = env::var("RUST_LOG").ok();

    let mut builder = build_logger(rust_log.as_deref(), default_level);
    if let Ok(style) = env::var("RUST_LOG_STYLE") {
        builder.parse_write_style(&style);
    }
    builder
        .try_init()
        .map_err(|e| ScreenerError::ConfigError(format!("Logger already initialised: {}", e)))?;

    log::info!("로깅 시스템 초기화 완료: 필터 = {}", rust_log.as_deref().unwrap_or(default_level));

    Ok(())
}

/// 로거 빌더 구성
///
/// `RUST_LOG` 지시문(모듈별 필터 포함)이 있으면 그대로 쓰고, 없을 때만 기본 레벨을 건다.
pub fn build_logger(rust_log: Option<&str>, default_level: &str) -> Builder {
    let mut builder = Builder::new();
    match rust_log {
        Some(filters) => builder.parse_filters(filters),
        None => builder.filter_level(parse_level(default_level)),
    };
    builder.format_timestamp_millis();
    builder
}

/// 로그 레벨 파싱
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// 스캔 시작 로그
pub fn log_scan_start(ticker_count: usize, batch_count: usize) {
    log::info!("스캔 시작: 티커 {}개 - 배치 {}개", ticker_count, batch_count);
}

/// 스캔 종료 로그
pub fn log_scan_end(result_count: usize, error_count: usize) {
    log::info!("스캔 종료: 돌파 {}건 - 오류 {}건", result_count, error_count);
}

/// 배치 진행 로그
pub fn log_batch_done(batch_index: usize, size: usize, progress: f64) {
    log::debug!("배치 {} 완료: 티커 {}개 - 진행률 {:.0}%", batch_index + 1, size, progress * 100.0);
}

/// 오류 로그
pub fn log_error(context: &str, error: &ScreenerError) {
    log::error!("오류 발생 - {}: {}", context, error);
}
