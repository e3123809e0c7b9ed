use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One journal entry per trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayJournal {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub break_trading_plan: bool,
    pub notes: Option<String>,
}

/// Payload for creating a day entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDayJournal {
    pub date: NaiveDate,
    #[serde(default)]
    pub break_trading_plan: bool,
    pub notes: Option<String>,
}

/// Partial update. The date identifies the day and never changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayJournalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_trading_plan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
