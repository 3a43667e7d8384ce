pub mod alerts;
pub mod analysis;
pub mod indicators;
pub mod provider;

pub use alerts::{build_alerts, AlertMonitor, AlertStore, InMemoryAlertStore};
pub use analysis::{MarketScanner, ScannerConfig};
pub use provider::{MarketDataProvider, PriceSource};
