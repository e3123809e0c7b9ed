//! # api crate — typed REST client for the Trade Journal backend
//!
//! Everything the frontends need to talk to the journal API lives here: a thin
//! HTTP wrapper, the domain models it sends and receives, and one method per
//! backend endpoint.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`] — request plumbing, response interpretation, endpoint wrappers |
//! | [`models`] | Wire/domain types: trades, tags, day-journal entries, user profile, stats |
//! | [`error`] | [`ApiError`] — the failure taxonomy every call returns |
//!
//! ## Contract
//!
//! The client is deliberately dumb: one request per call, no retries, no
//! timeouts beyond the platform defaults, no caching. A non-2xx response
//! becomes [`ApiError::Http`] carrying the status code and the response body
//! text. Response bodies are parsed as JSON only when the server labels them
//! `application/json`; anything else comes back as raw text.

mod client;
mod error;
pub mod models;

pub use client::{to_snake_case_payload, ApiClient, Payload};
pub use error::ApiError;
pub use models::{
    DayJournal, DayJournalUpdate, ExportData, NewDayJournal, NewTag, NewTrade, Outcome, Side, Tag,
    TokenExchange, Trade, TradeSummary, TradeUpdate, UserProfile,
};
