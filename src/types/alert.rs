use serde::{Deserialize, Serialize};

/// Price threshold a user wants to be notified about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    /// Base asset, uppercase (BTC).
    pub coin: String,
    /// Fires when the last price reaches or exceeds this value.
    pub threshold: f64,
    /// Creation time in milliseconds.
    pub created_at: i64,
}

/// Emitted when an alert's threshold is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertTrigger {
    pub user_id: String,
    pub coin: String,
    pub threshold: f64,
    pub price: f64,
    pub quote: String,
    pub timestamp: i64,
}

impl AlertTrigger {
    /// Notification text for the user.
    pub fn message(&self) -> String {
        format!("{} price reached {} {}!", self.coin, self.price, self.quote)
    }
}

/// Alerts configured by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAlerts {
    pub user_id: String,
    pub active: bool,
    pub alerts: Vec<PriceAlert>,
}
