//! Domain models exchanged with the journal backend.

use serde::{Deserialize, Serialize};

mod journal;
mod tag;
mod trade;
mod user;

pub use journal::{DayJournal, DayJournalUpdate, NewDayJournal};
pub use tag::{NewTag, Tag};
pub use trade::{NewTrade, Outcome, Side, Trade, TradeSummary, TradeUpdate};
pub use user::{TokenExchange, UserProfile};

/// Everything the backend knows, in one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportData {
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub day_journals: Vec<DayJournal>,
}
