//! Trade collection store: caches the server's list, re-fetches after every
//! mutation. No optimistic updates and no diffing; the server's ordering and
//! contents are always taken wholesale.

use std::sync::Mutex;

use api::models::{NewTrade, Trade, TradeSummary, TradeUpdate};
use api::ApiError;

use crate::backend::Backend;

pub struct TradeStore<B> {
    backend: B,
    trades: Mutex<Vec<Trade>>,
}

impl<B: Backend> TradeStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            trades: Mutex::new(Vec::new()),
        }
    }

    /// Fetch the full collection, replacing the cache.
    pub async fn list(&self) -> Result<Vec<Trade>, ApiError> {
        let trades = self.backend.list_trades().await?;
        *self.trades.lock().unwrap() = trades.clone();
        tracing::debug!(count = trades.len(), "trades refreshed");
        Ok(trades)
    }

    /// Last fetched collection, without a network round-trip.
    pub fn cached(&self) -> Vec<Trade> {
        self.trades.lock().unwrap().clone()
    }

    pub async fn create(&self, trade: &NewTrade) -> Result<Trade, ApiError> {
        let created = self.backend.create_trade(trade).await?;
        self.list().await?;
        Ok(created)
    }

    pub async fn update(&self, id: &str, update: &TradeUpdate) -> Result<Trade, ApiError> {
        let updated = self.backend.update_trade(id, update).await?;
        self.list().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.backend.delete_trade(id).await?;
        self.list().await?;
        Ok(())
    }

    /// Server-side aggregate statistics. Not cached.
    pub async fn summary(&self) -> Result<TradeSummary, ApiError> {
        self.backend.trade_summary().await
    }
}
