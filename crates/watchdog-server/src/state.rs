//! Application State

use std::sync::Arc;

use macro_watchdog::feeds::{MacroSeriesSource, MarginDebtSource, MarketDataSource};
use macro_watchdog::MacroWatchdog;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The audit agent
    pub watchdog: Arc<MacroWatchdog>,

    /// Macro series source (history endpoints)
    pub series: Arc<dyn MacroSeriesSource>,

    /// Market data source (history endpoints)
    pub market: Arc<dyn MarketDataSource>,

    /// Margin statistics source (history endpoints)
    pub margin: Arc<dyn MarginDebtSource>,
}
