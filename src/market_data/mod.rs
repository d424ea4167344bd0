pub mod cache;
pub mod fetcher;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use cache::{Clock, FetchCache, FetchKey, ManualClock, SystemClock};
pub use fetcher::DataFetcher;
pub use provider::{DataSource, HistoricalDataProvider};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
