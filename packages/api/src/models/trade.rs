use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// How a closed trade ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "TP")]
    TakeProfit,
    #[serde(rename = "SL")]
    StopLoss,
    #[serde(rename = "BE")]
    BreakEven,
}

/// A recorded trade as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub side: Side,
    pub date: NaiveDate,
    pub rate: f64,
    pub risk: Option<f64>,
    pub result: Option<f64>,
    pub status: Option<Outcome>,
    pub notes: Option<String>,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub confirmations: Vec<String>,
    pub trading_link: Option<String>,
    pub user_id: Option<String>,
}

/// Payload for creating a trade. The backend assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub symbol: String,
    pub side: Side,
    pub date: NaiveDate,
    pub rate: f64,
    pub risk: Option<f64>,
    pub result: Option<f64>,
    pub status: Option<Outcome>,
    pub notes: Option<String>,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub confirmations: Vec<String>,
    pub trading_link: Option<String>,
    pub user_id: Option<String>,
}

impl NewTrade {
    /// Attach a server-assigned id, producing the full record.
    pub fn with_id(self, id: impl Into<String>) -> Trade {
        Trade {
            id: id.into(),
            symbol: self.symbol,
            side: self.side,
            date: self.date,
            rate: self.rate,
            risk: self.risk,
            result: self.result,
            status: self.status,
            notes: self.notes,
            emotions: self.emotions,
            confirmations: self.confirmations,
            trading_link: self.trading_link,
            user_id: self.user_id,
        }
    }
}

/// Partial update; unset fields are left untouched by the backend and are
/// omitted from the serialized body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_link: Option<String>,
}

/// Aggregate statistics over the whole trade log, computed server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeSummary {
    pub total_trades: usize,
    pub total_pnl: f64,
    pub avg_pnl: f64,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
}
