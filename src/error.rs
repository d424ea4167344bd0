/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description: 스캐너 전역 오류 타입
**/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Fetch failure: {0}")]
    FetchFailure(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl ScreenerError {
    /// 네트워크/제공자 측 실패 여부 (배치를 건너뛰어야 하는 오류)
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ScreenerError::FetchFailure(_) | ScreenerError::HttpError(_) | ScreenerError::ParseError(_)
        )
    }
}
