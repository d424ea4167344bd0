pub mod breakout;
pub mod market_data;

pub use breakout::BreakoutResult;
pub use market_data::{MarketTable, PriceBar, Series};
