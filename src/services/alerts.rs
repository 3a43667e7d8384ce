//! Per-user price alerts and the poller that fires them.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::services::provider::PriceSource;
use crate::types::{AlertTrigger, PriceAlert, TradingPair, UserAlerts};

/// Storage for user alert lists and their activation flag.
pub trait AlertStore: Send + Sync {
    fn get(&self, user_id: &str) -> Option<UserAlerts>;

    /// Replace a user's alerts, keeping their activation flag.
    fn set(&self, user_id: &str, alerts: Vec<PriceAlert>) -> UserAlerts;

    fn remove(&self, user_id: &str) -> bool;

    /// Drop one alert after it has fired.
    fn remove_alert(&self, user_id: &str, alert: &PriceAlert) -> bool;

    fn users(&self) -> Vec<String>;

    /// Returns false when the user has no alerts.
    fn set_active(&self, user_id: &str, active: bool) -> bool;

    fn is_active(&self, user_id: &str) -> bool;
}

/// Process-local alert store.
#[derive(Default)]
pub struct InMemoryAlertStore {
    users: DashMap<String, UserAlerts>,
}

impl InMemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertStore for InMemoryAlertStore {
    fn get(&self, user_id: &str) -> Option<UserAlerts> {
        self.users.get(user_id).map(|entry| entry.value().clone())
    }

    fn set(&self, user_id: &str, alerts: Vec<PriceAlert>) -> UserAlerts {
        let mut entry = self
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| UserAlerts {
                user_id: user_id.to_string(),
                active: false,
                alerts: Vec::new(),
            });
        entry.alerts = alerts;
        entry.value().clone()
    }

    fn remove(&self, user_id: &str) -> bool {
        self.users.remove(user_id).is_some()
    }

    fn remove_alert(&self, user_id: &str, alert: &PriceAlert) -> bool {
        let Some(mut entry) = self.users.get_mut(user_id) else {
            return false;
        };
        let before = entry.alerts.len();
        entry.alerts.retain(|a| a != alert);
        entry.alerts.len() != before
    }

    fn users(&self) -> Vec<String> {
        let mut users: Vec<String> = self.users.iter().map(|e| e.key().clone()).collect();
        users.sort();
        users
    }

    fn set_active(&self, user_id: &str, active: bool) -> bool {
        match self.users.get_mut(user_id) {
            Some(mut entry) => {
                entry.active = active;
                true
            }
            None => false,
        }
    }

    fn is_active(&self, user_id: &str) -> bool {
        self.users.get(user_id).map(|e| e.active).unwrap_or(false)
    }
}

/// Pair parallel coin and threshold lists into alerts.
pub fn build_alerts(coins: &[String], prices: &[f64]) -> Result<Vec<PriceAlert>> {
    if coins.is_empty() {
        return Err(AppError::BadRequest("At least one coin is required".to_string()));
    }
    if coins.len() != prices.len() {
        return Err(AppError::BadRequest(format!(
            "Got {} coins but {} prices",
            coins.len(),
            prices.len()
        )));
    }

    let created_at = chrono::Utc::now().timestamp_millis();
    coins
        .iter()
        .zip(prices)
        .map(|(coin, &threshold)| {
            let coin = coin.trim().to_uppercase();
            if coin.is_empty() || !coin.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(AppError::InvalidSymbol(coin));
            }
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(AppError::BadRequest(format!(
                    "Invalid price {} for {}",
                    threshold, coin
                )));
            }
            Ok(PriceAlert {
                coin,
                threshold,
                created_at,
            })
        })
        .collect()
}

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polls prices for active users and broadcasts triggered alerts.
pub struct AlertMonitor {
    store: Arc<dyn AlertStore>,
    prices: Arc<dyn PriceSource>,
    quote: String,
    interval: Duration,
    tx: broadcast::Sender<AlertTrigger>,
}

impl AlertMonitor {
    pub fn new(
        store: Arc<dyn AlertStore>,
        prices: Arc<dyn PriceSource>,
        quote: &str,
        interval: Duration,
    ) -> Self {
        let (tx, _) = broadcast::channel(256);
        Self {
            store,
            prices,
            quote: quote.to_uppercase(),
            interval: interval.max(MIN_POLL_INTERVAL),
            tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AlertTrigger> {
        self.tx.subscribe()
    }

    /// Check every alert of every active user once.
    pub async fn check_once(&self) -> Vec<AlertTrigger> {
        let mut fired = Vec::new();

        for user_id in self.store.users() {
            if !self.store.is_active(&user_id) {
                continue;
            }
            let Some(user) = self.store.get(&user_id) else {
                continue;
            };

            for alert in user.alerts {
                let pair = TradingPair::new(&alert.coin, &self.quote);
                let price = match self.prices.last_price(&pair).await {
                    Ok(price) => price,
                    Err(e) => {
                        warn!("Price check for {} failed: {}", pair, e);
                        continue;
                    }
                };

                if price < alert.threshold {
                    continue;
                }

                let trigger = AlertTrigger {
                    user_id: user_id.clone(),
                    coin: alert.coin.clone(),
                    threshold: alert.threshold,
                    price,
                    quote: self.quote.clone(),
                    timestamp: chrono::Utc::now().timestamp_millis(),
                };
                info!("Alert fired for user {}: {}", user_id, trigger.message());

                self.store.remove_alert(&user_id, &alert);
                // No subscribers is fine
                let _ = self.tx.send(trigger.clone());
                fired.push(trigger);
            }
        }

        fired
    }

    /// Poll forever at the configured interval.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            let fired = self.check_once().await;
            debug!("Alert poll complete, {} fired", fired.len());
        }
    }
}
