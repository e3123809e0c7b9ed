//! # Backend — the remote store behind every resource store
//!
//! An async interface covering exactly the operations the stores use:
//! collection list/create/update/delete per resource, the stats summary, the
//! date-range query, the identity-token exchange and the full export.
//! Implementations:
//!
//! - [`api::ApiClient`] — the real REST backend (implemented below by
//!   delegating to the endpoint wrappers).
//! - [`MemoryBackend`] — an in-memory fake with the same observable behavior
//!   (monotonic string ids, trades listed newest-first, summary computed from
//!   the stored trades), used by unit tests.

use std::sync::{Arc, Mutex};

use api::models::{
    DayJournal, DayJournalUpdate, ExportData, NewDayJournal, NewTag, NewTrade, Outcome, Tag,
    TokenExchange, Trade, TradeSummary, TradeUpdate, UserProfile,
};
use api::{ApiClient, ApiError};
use chrono::NaiveDate;

/// Which tag catalog an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Emotions,
    Confirmations,
}

impl TagKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TagKind::Emotions => "emotions",
            TagKind::Confirmations => "confirmations",
        }
    }
}

/// Async interface to the remote journal store.
pub trait Backend {
    fn list_trades(&self) -> impl std::future::Future<Output = Result<Vec<Trade>, ApiError>>;
    fn create_trade(
        &self,
        trade: &NewTrade,
    ) -> impl std::future::Future<Output = Result<Trade, ApiError>>;
    fn update_trade(
        &self,
        id: &str,
        update: &TradeUpdate,
    ) -> impl std::future::Future<Output = Result<Trade, ApiError>>;
    fn delete_trade(&self, id: &str) -> impl std::future::Future<Output = Result<(), ApiError>>;
    fn trade_summary(&self) -> impl std::future::Future<Output = Result<TradeSummary, ApiError>>;

    fn list_tags(
        &self,
        kind: TagKind,
    ) -> impl std::future::Future<Output = Result<Vec<Tag>, ApiError>>;
    fn create_tag(
        &self,
        kind: TagKind,
        tag: &NewTag,
    ) -> impl std::future::Future<Output = Result<Tag, ApiError>>;
    fn delete_tag(
        &self,
        kind: TagKind,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>>;

    fn list_journal(&self) -> impl std::future::Future<Output = Result<Vec<DayJournal>, ApiError>>;
    fn journal_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<DayJournal>, ApiError>>;
    fn create_journal(
        &self,
        entry: &NewDayJournal,
    ) -> impl std::future::Future<Output = Result<DayJournal, ApiError>>;
    fn update_journal(
        &self,
        id: &str,
        update: &DayJournalUpdate,
    ) -> impl std::future::Future<Output = Result<DayJournal, ApiError>>;
    fn delete_journal(&self, id: &str) -> impl std::future::Future<Output = Result<(), ApiError>>;

    fn exchange_identity_token(
        &self,
        id_token: &str,
    ) -> impl std::future::Future<Output = Result<TokenExchange, ApiError>>;

    fn export_all(&self) -> impl std::future::Future<Output = Result<ExportData, ApiError>>;
}

impl Backend for ApiClient {
    async fn list_trades(&self) -> Result<Vec<Trade>, ApiError> {
        self.trades().await
    }

    async fn create_trade(&self, trade: &NewTrade) -> Result<Trade, ApiError> {
        ApiClient::create_trade(self, trade).await
    }

    async fn update_trade(&self, id: &str, update: &TradeUpdate) -> Result<Trade, ApiError> {
        ApiClient::update_trade(self, id, update).await
    }

    async fn delete_trade(&self, id: &str) -> Result<(), ApiError> {
        ApiClient::delete_trade(self, id).await
    }

    async fn trade_summary(&self) -> Result<TradeSummary, ApiError> {
        ApiClient::trade_summary(self).await
    }

    async fn list_tags(&self, kind: TagKind) -> Result<Vec<Tag>, ApiError> {
        match kind {
            TagKind::Emotions => self.emotions().await,
            TagKind::Confirmations => self.confirmations().await,
        }
    }

    async fn create_tag(&self, kind: TagKind, tag: &NewTag) -> Result<Tag, ApiError> {
        match kind {
            TagKind::Emotions => self.create_emotion(tag).await,
            TagKind::Confirmations => self.create_confirmation(tag).await,
        }
    }

    async fn delete_tag(&self, kind: TagKind, id: &str) -> Result<(), ApiError> {
        match kind {
            TagKind::Emotions => self.delete_emotion(id).await,
            TagKind::Confirmations => self.delete_confirmation(id).await,
        }
    }

    async fn list_journal(&self) -> Result<Vec<DayJournal>, ApiError> {
        self.day_journal().await
    }

    async fn journal_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayJournal>, ApiError> {
        self.day_journal_range(start, end).await
    }

    async fn create_journal(&self, entry: &NewDayJournal) -> Result<DayJournal, ApiError> {
        self.create_day_journal(entry).await
    }

    async fn update_journal(&self, id: &str, update: &DayJournalUpdate) -> Result<DayJournal, ApiError> {
        self.update_day_journal(id, update).await
    }

    async fn delete_journal(&self, id: &str) -> Result<(), ApiError> {
        self.delete_day_journal(id).await
    }

    async fn exchange_identity_token(&self, id_token: &str) -> Result<TokenExchange, ApiError> {
        ApiClient::exchange_identity_token(self, id_token).await
    }

    async fn export_all(&self) -> Result<ExportData, ApiError> {
        ApiClient::export_all(self).await
    }
}

/// In-memory Backend for tests.
///
/// Mirrors the remote contract closely enough that stores cannot tell the
/// difference: ids are monotonic strings, unknown ids come back as 404-shaped
/// [`ApiError::Http`] values, trades list newest-first, and the summary is
/// computed from the stored trades.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    trades: Vec<Trade>,
    emotions: Vec<Tag>,
    confirmations: Vec<Tag>,
    journal: Vec<DayJournal>,
}

impl Inner {
    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn tags(&self, kind: TagKind) -> &Vec<Tag> {
        match kind {
            TagKind::Emotions => &self.emotions,
            TagKind::Confirmations => &self.confirmations,
        }
    }

    fn tags_mut(&mut self, kind: TagKind) -> &mut Vec<Tag> {
        match kind {
            TagKind::Emotions => &mut self.emotions,
            TagKind::Confirmations => &mut self.confirmations,
        }
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Http {
        status: 404,
        body: format!("{what} not found"),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Backend for MemoryBackend {
    async fn list_trades(&self) -> Result<Vec<Trade>, ApiError> {
        let mut trades = self.inner.lock().unwrap().trades.clone();
        trades.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(trades)
    }

    async fn create_trade(&self, trade: &NewTrade) -> Result<Trade, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.assign_id();
        let created = trade.clone().with_id(id);
        inner.trades.push(created.clone());
        Ok(created)
    }

    async fn update_trade(&self, id: &str, update: &TradeUpdate) -> Result<Trade, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let trade = inner
            .trades
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Trade"))?;
        if let Some(ref symbol) = update.symbol {
            trade.symbol = symbol.clone();
        }
        if let Some(side) = update.side {
            trade.side = side;
        }
        if let Some(date) = update.date {
            trade.date = date;
        }
        if let Some(rate) = update.rate {
            trade.rate = rate;
        }
        if let Some(risk) = update.risk {
            trade.risk = Some(risk);
        }
        if let Some(result) = update.result {
            trade.result = Some(result);
        }
        if let Some(status) = update.status {
            trade.status = Some(status);
        }
        if let Some(ref notes) = update.notes {
            trade.notes = Some(notes.clone());
        }
        if let Some(ref emotions) = update.emotions {
            trade.emotions = emotions.clone();
        }
        if let Some(ref confirmations) = update.confirmations {
            trade.confirmations = confirmations.clone();
        }
        if let Some(ref link) = update.trading_link {
            trade.trading_link = Some(link.clone());
        }
        Ok(trade.clone())
    }

    async fn delete_trade(&self, id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.trades.len();
        inner.trades.retain(|t| t.id != id);
        if inner.trades.len() == before {
            return Err(not_found("Trade"));
        }
        Ok(())
    }

    async fn trade_summary(&self) -> Result<TradeSummary, ApiError> {
        let inner = self.inner.lock().unwrap();
        let total_trades = inner.trades.len();
        if total_trades == 0 {
            return Ok(TradeSummary::default());
        }
        let total_pnl: f64 = inner.trades.iter().filter_map(|t| t.result).sum();
        let winning_trades = inner
            .trades
            .iter()
            .filter(|t| t.status == Some(Outcome::TakeProfit))
            .count();
        let losing_trades = inner
            .trades
            .iter()
            .filter(|t| t.status == Some(Outcome::StopLoss))
            .count();
        Ok(TradeSummary {
            total_trades,
            total_pnl: round2(total_pnl),
            avg_pnl: round2(total_pnl / total_trades as f64),
            winning_trades,
            losing_trades,
            win_rate: round2(winning_trades as f64 / total_trades as f64 * 100.0),
        })
    }

    async fn list_tags(&self, kind: TagKind) -> Result<Vec<Tag>, ApiError> {
        Ok(self.inner.lock().unwrap().tags(kind).clone())
    }

    async fn create_tag(&self, kind: TagKind, tag: &NewTag) -> Result<Tag, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.assign_id();
        let created = Tag {
            id,
            name: tag.name.clone(),
            description: tag.description.clone(),
            user_id: tag.user_id.clone(),
        };
        inner.tags_mut(kind).push(created.clone());
        Ok(created)
    }

    async fn delete_tag(&self, kind: TagKind, id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let tags = inner.tags_mut(kind);
        let before = tags.len();
        tags.retain(|t| t.id != id);
        if tags.len() == before {
            return Err(not_found("Tag"));
        }
        Ok(())
    }

    async fn list_journal(&self) -> Result<Vec<DayJournal>, ApiError> {
        Ok(self.inner.lock().unwrap().journal.clone())
    }

    async fn journal_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayJournal>, ApiError> {
        if start > end {
            return Err(ApiError::Http {
                status: 400,
                body: "start_date must be on or before end_date".to_string(),
            });
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .journal
            .iter()
            .filter(|entry| start <= entry.date && entry.date <= end)
            .cloned()
            .collect())
    }

    async fn create_journal(&self, entry: &NewDayJournal) -> Result<DayJournal, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.assign_id();
        let created = DayJournal {
            id,
            date: entry.date,
            break_trading_plan: entry.break_trading_plan,
            notes: entry.notes.clone(),
        };
        inner.journal.push(created.clone());
        Ok(created)
    }

    async fn update_journal(
        &self,
        id: &str,
        update: &DayJournalUpdate,
    ) -> Result<DayJournal, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let entry = inner
            .journal
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("Day journal"))?;
        if let Some(break_plan) = update.break_trading_plan {
            entry.break_trading_plan = break_plan;
        }
        if let Some(ref notes) = update.notes {
            entry.notes = Some(notes.clone());
        }
        Ok(entry.clone())
    }

    async fn delete_journal(&self, id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.journal.len();
        inner.journal.retain(|e| e.id != id);
        if inner.journal.len() == before {
            return Err(not_found("Day journal"));
        }
        Ok(())
    }

    async fn exchange_identity_token(&self, id_token: &str) -> Result<TokenExchange, ApiError> {
        if id_token.is_empty() {
            return Err(ApiError::Http {
                status: 401,
                body: "Invalid token".to_string(),
            });
        }
        Ok(TokenExchange {
            access_token: format!("access-{id_token}"),
            token_type: "bearer".to_string(),
            user: UserProfile {
                id: "user-1".to_string(),
                email: "trader@example.com".to_string(),
                name: Some("Test Trader".to_string()),
                picture: None,
            },
        })
    }

    async fn export_all(&self) -> Result<ExportData, ApiError> {
        let inner = self.inner.lock().unwrap();
        Ok(ExportData {
            trades: inner.trades.clone(),
            day_journals: inner.journal.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::Side;

    fn trade(date: &str, result: Option<f64>, status: Option<Outcome>) -> NewTrade {
        NewTrade {
            symbol: "EURUSD".to_string(),
            side: Side::Buy,
            date: date.parse().unwrap(),
            rate: 1.1,
            risk: Some(1.0),
            result,
            status,
            notes: None,
            emotions: vec![],
            confirmations: vec![],
            trading_link: None,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn trades_list_newest_first() {
        let backend = MemoryBackend::new();
        backend.create_trade(&trade("2024-10-01", None, None)).await.unwrap();
        backend.create_trade(&trade("2024-10-03", None, None)).await.unwrap();
        backend.create_trade(&trade("2024-10-02", None, None)).await.unwrap();

        let dates: Vec<String> = backend
            .list_trades()
            .await
            .unwrap()
            .iter()
            .map(|t| t.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-10-03", "2024-10-02", "2024-10-01"]);
    }

    #[tokio::test]
    async fn summary_of_empty_log_is_all_zeros() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.trade_summary().await.unwrap(), TradeSummary::default());
    }

    #[tokio::test]
    async fn summary_matches_the_stats_contract() {
        let backend = MemoryBackend::new();
        backend
            .create_trade(&trade("2024-10-01", Some(120.5), Some(Outcome::TakeProfit)))
            .await
            .unwrap();
        backend
            .create_trade(&trade("2024-10-02", Some(-40.0), Some(Outcome::StopLoss)))
            .await
            .unwrap();
        backend
            .create_trade(&trade("2024-10-03", Some(0.0), Some(Outcome::BreakEven)))
            .await
            .unwrap();

        let summary = backend.trade_summary().await.unwrap();
        assert_eq!(summary.total_trades, 3);
        assert_eq!(summary.total_pnl, 80.5);
        assert_eq!(summary.avg_pnl, 26.83);
        assert_eq!(summary.winning_trades, 1);
        assert_eq!(summary.losing_trades, 1);
        assert_eq!(summary.win_rate, 33.33);
    }

    #[tokio::test]
    async fn journal_range_is_inclusive_and_validates_order() {
        let backend = MemoryBackend::new();
        for date in ["2024-09-30", "2024-10-01", "2024-10-31", "2024-11-01"] {
            backend
                .create_journal(&NewDayJournal {
                    date: date.parse().unwrap(),
                    break_trading_plan: false,
                    notes: None,
                })
                .await
                .unwrap();
        }

        let october = backend
            .journal_range("2024-10-01".parse().unwrap(), "2024-10-31".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(october.len(), 2);

        let err = backend
            .journal_range("2024-10-31".parse().unwrap(), "2024-10-01".parse().unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn export_includes_trades_and_journal() {
        let backend = MemoryBackend::new();
        backend.create_trade(&trade("2024-10-01", None, None)).await.unwrap();
        backend
            .create_journal(&NewDayJournal {
                date: "2024-10-01".parse().unwrap(),
                break_trading_plan: true,
                notes: Some("revenge trade".to_string()),
            })
            .await
            .unwrap();

        let export = backend.export_all().await.unwrap();
        assert_eq!(export.trades.len(), 1);
        assert_eq!(export.day_journals.len(), 1);
        assert!(export.day_journals[0].break_trading_plan);
    }

    #[tokio::test]
    async fn unknown_ids_are_http_404() {
        let backend = MemoryBackend::new();
        let err = backend.delete_trade("999").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
    }
}
