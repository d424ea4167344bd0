/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ScreenerError;

pub const DEFAULT_TICKERS: &str = "AAPL,MSFT,GOOGL,AMZN,FB,TSLA,NVDA,JPM,V,JNJ";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub scan: ScanConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    pub base_url: String,
    pub timeout_ms: Option<u64>,
    pub use_mock: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// 한 번의 조회에 묶는 최대 티커 수
    pub batch_size: usize,
    /// 조회 기간 (일)
    pub lookback_days: i64,
    pub default_tickers: String,
    /// 조회 결과 캐시 유지 시간 (초)
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Load configuration from a file
    pub fn load() -> Result<Self, ScreenerError> {
        Self::load_from(Path::new("config.json"))
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ScreenerError> {
        let mut cfg = if config_path.exists() {
            let mut file = File::open(config_path)
                .map_err(|e| ScreenerError::ConfigError(format!("Failed to open config file: {}", e)))?;

            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .map_err(|e| ScreenerError::ConfigError(format!("Failed to read config file: {}", e)))?;

            serde_json::from_str::<Config>(&contents)
                .map_err(|e| ScreenerError::ConfigError(format!("Failed to parse config file: {}", e)))?
        } else {
            Config::default()
        };

        // environment overrides
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply environment variable overrides for runtime fields
    fn apply_env_overrides(&mut self) -> Result<(), ScreenerError> {
        use std::env;
        if let Ok(v) = env::var("SCANNER_HOST") { if !v.is_empty() { self.server.host = v; } }
        if let Ok(v) = env::var("SCANNER_PORT") {
            self.server.port = v.parse()
                .map_err(|_| ScreenerError::ConfigError(format!("SCANNER_PORT is not a port: {}", v)))?;
        }
        if let Ok(v) = env::var("PROVIDER_BASE_URL") { if !v.is_empty() { self.provider.base_url = v; } }
        if let Ok(v) = env::var("USE_MOCK") {
            let lower = v.to_lowercase();
            if ["1","true","yes"].contains(&lower.as_str()) { self.provider.use_mock = true; }
            if ["0","false","no"].contains(&lower.as_str()) { self.provider.use_mock = false; }
        }
        if let Ok(v) = env::var("SCAN_BATCH_SIZE") {
            self.scan.batch_size = v.parse()
                .map_err(|_| ScreenerError::ConfigError(format!("SCAN_BATCH_SIZE is not a number: {}", v)))?;
        }
        if let Ok(v) = env::var("CACHE_TTL_SECS") {
            self.scan.cache_ttl_secs = v.parse()
                .map_err(|_| ScreenerError::ConfigError(format!("CACHE_TTL_SECS is not a number: {}", v)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ScreenerError> {
        if self.scan.batch_size == 0 {
            return Err(ScreenerError::ConfigError("scan.batch_size must be positive".into()));
        }
        if self.scan.lookback_days <= 0 {
            return Err(ScreenerError::ConfigError("scan.lookback_days must be positive".into()));
        }
        if self.scan.cache_ttl_secs == 0 {
            return Err(ScreenerError::ConfigError("scan.cache_ttl_secs must be positive".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3030,
            },
            provider: ProviderConfig {
                name: "Yahoo".to_string(),
                base_url: "https://query2.finance.yahoo.com".to_string(),
                timeout_ms: Some(30_000),
                use_mock: false,
            },
            scan: ScanConfig {
                batch_size: 100,
                lookback_days: 365,
                default_tickers: DEFAULT_TICKERS.to_string(),
                cache_ttl_secs: 3600,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.scan.batch_size, 100);
        assert_eq!(cfg.scan.cache_ttl_secs, 3600);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut cfg = Config::default();
        cfg.scan.batch_size = 0;
        assert!(matches!(cfg.validate(), Err(ScreenerError::ConfigError(_))));
    }

    #[test]
    fn test_parse_json_config() {
        let json = r#"{
            "server": {"host": "0.0.0.0", "port": 8080},
            "provider": {"name": "Yahoo", "base_url": "http://localhost:9000", "timeout_ms": null, "use_mock": true},
            "scan": {"batch_size": 50, "lookback_days": 180, "default_tickers": "AAPL", "cache_ttl_secs": 60},
            "logging": {"level": "debug"}
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.provider.use_mock);
        assert_eq!(cfg.scan.batch_size, 50);
        assert!(cfg.validate().is_ok());
    }
}
