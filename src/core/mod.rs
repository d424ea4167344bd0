pub mod report;
pub mod scanner;

pub use report::{ScanReport, NO_RESULTS_MESSAGE, RESULTS_HEADING};
pub use scanner::{parse_tickers, BatchReport, ScanSession, Scanner};
