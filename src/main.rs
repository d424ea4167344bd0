/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Duration;

use vwap_scanner::api::routes;
use vwap_scanner::config::Config;
use vwap_scanner::core::{parse_tickers, Scanner};
use vwap_scanner::market_data::{DataFetcher, HistoricalDataProvider, SyntheticProvider, YahooProvider};
use vwap_scanner::utils::logging;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::info!("VWAP 돌파 스캐너 시작... (v{})", vwap_scanner::VERSION);

    let scanner = Arc::new(build_scanner(&config)?);

    // 명령줄 인수 확인
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("scan") => {
            let input = args.get(2).cloned().unwrap_or_else(|| config.scan.default_tickers.clone());
            run_scan(scanner, &input).await
        }
        Some("serve") | None => run_server(scanner, config).await,
        Some(other) => {
            anyhow::bail!("알 수 없는 명령: {} (사용법: vwap_scanner [serve | scan <TICKERS>])", other)
        }
    }
}

fn build_scanner(config: &Config) -> Result<Scanner, anyhow::Error> {
    let provider: Arc<dyn HistoricalDataProvider> = if config.provider.use_mock {
        log::info!("합성 데이터 제공자 사용");
        Arc::new(SyntheticProvider::default())
    } else {
        log::info!("{} 제공자 사용: {}", config.provider.name, config.provider.base_url);
        Arc::new(YahooProvider::new(config.provider.base_url.clone(), config.provider.timeout_ms)?)
    };

    let ttl = Duration::seconds(config.scan.cache_ttl_secs as i64);
    let fetcher = Arc::new(DataFetcher::with_ttl(provider, ttl));
    Ok(Scanner::from_config(fetcher, config))
}

async fn run_scan(scanner: Arc<Scanner>, input: &str) -> Result<(), anyhow::Error> {
    let tickers = parse_tickers(input);
    if tickers.is_empty() {
        anyhow::bail!("티커가 없습니다");
    }

    let mut session = scanner.session(tickers);
    while let Some(batch) = session.next_batch().await {
        println!(
            "[{}/{}] {:>3.0}% ({} tickers)",
            batch.batch_index + 1,
            batch.batch_count,
            batch.progress * 100.0,
            batch.tickers.len()
        );
        if let Some(error) = &batch.error {
            eprintln!("{}", error);
        }
    }

    let report = session.into_report();
    println!("\n{}", report.render_table());
    Ok(())
}

async fn run_server(scanner: Arc<Scanner>, config: Config) -> Result<(), anyhow::Error> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // API 라우트 초기화
    let routes = routes::create_routes(scanner, config);
    log::info!("API 라우트 초기화 완료");

    // Warp 서버 시작
    log::info!("서버 시작: http://{}/", addr);
    warp::serve(routes).run(addr).await;

    Ok(())
}
