use std::sync::Arc;
use warp::Filter;

use crate::api::handlers::{self, ScanQuery};
use crate::config::Config;
use crate::core::Scanner;

/// 스캐너 웹 페이지 및 API 라우트 생성
pub fn create_routes(
    scanner: Arc<Scanner>,
    config: Config,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // 상태 필터 생성
    let scanner_filter = warp::any().map(move || scanner.clone());
    let config_filter = warp::any().map(move || config.clone());

    // 메인 페이지
    let index = warp::path::end()
        .and(warp::get())
        .and(config_filter.clone())
        .and_then(handlers::index_handler);

    // 헬스체크 라우트
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    // 스캔 라우트
    let scan = warp::path("api").and(warp::path("scan"));

    let scan_routes = scan
        .clone()
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(scanner_filter.clone())
        .and_then(handlers::scan_handler)
        .or(scan
            .clone()
            .and(warp::path("stream"))
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<ScanQuery>())
            .and(scanner_filter.clone())
            .and(config_filter.clone())
            .and_then(handlers::scan_stream_handler))
        .or(scan
            .and(warp::path("csv"))
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<ScanQuery>())
            .and(scanner_filter.clone())
            .and(config_filter.clone())
            .and_then(handlers::scan_csv_handler));

    // 모든 라우트 결합
    index
        .or(health)
        .or(scan_routes)
        .with(warp::log("vwap_scanner::api"))
}
