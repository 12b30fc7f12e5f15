pub mod funds;
pub mod mock;
pub mod upload;

use chrono::NaiveDate;
use serde_json::{Map, Value};

pub use mock::{MockMarketDataRepository, MockRawDataRepository};
pub use upload::{MockUploadSink, UploadSink};

/// One row of a download, keys in column order
pub type DataRow = Map<String, Value>;

/// Filters for a raw data download
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawDataQuery {
    pub catalog: String,
    /// Empty when the catalog has no fund column
    pub fund: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Filters for a market data download
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarketDataQuery {
    pub security: String,
    pub field: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Source of raw (administrator) data tables
pub trait RawDataRepository: Send + Sync {
    /// Table names offered in the catalog dropdown
    fn categories(&self) -> Vec<String>;

    /// Funds present in a catalog
    fn funds(&self, catalog: &str) -> Vec<String>;

    fn raw_data(&self, query: &RawDataQuery) -> Vec<DataRow>;
}

/// Source of security prices and fields
pub trait MarketDataRepository: Send + Sync {
    fn securities(&self) -> Vec<String>;

    /// Fields available for a security
    fn fields(&self, security: &str) -> Vec<String>;

    fn market_data(&self, query: &MarketDataQuery) -> Vec<DataRow>;
}
