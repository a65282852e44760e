//! Data source trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DataError;
use crate::types::Bar;

/// Trait for historical data sources.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch historical bars for a symbol.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range (exclusive)
    ///
    /// # Returns
    /// A vector of bars ordered from oldest to newest
    async fn get_historical_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
