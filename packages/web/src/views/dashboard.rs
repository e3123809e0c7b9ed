//! Dashboard: aggregate statistics, the trade log, and the tag catalogs.

use chrono::NaiveDate;
use dioxus::prelude::*;

use api::models::{NewTrade, Outcome, Side, Trade, TradeSummary};
use store::TagKind;
use ui::TagEditor;

#[component]
pub fn Dashboard() -> Element {
    let store = use_hook(ui::make_trades);
    let mut trades = use_signal(Vec::<Trade>::new);
    let mut summary = use_signal(|| Option::<TradeSummary>::None);
    let mut load_error = use_signal(|| Option::<String>::None);

    let _loader = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            async move {
                match store.list().await {
                    Ok(list) => {
                        trades.set(list);
                        load_error.set(None);
                    }
                    Err(err) => load_error.set(Some(err.to_string())),
                }
                match store.summary().await {
                    Ok(stats) => summary.set(Some(stats)),
                    Err(err) => tracing::error!("stats unavailable: {err}"),
                }
            }
        }
    });

    let on_create = {
        let store = store.clone();
        move |trade: NewTrade| {
            let store = store.clone();
            async move {
                match store.create(&trade).await {
                    Ok(_) => {
                        trades.set(store.cached());
                        if let Ok(stats) = store.summary().await {
                            summary.set(Some(stats));
                        }
                    }
                    Err(err) => load_error.set(Some(err.to_string())),
                }
            }
        }
    };

    let on_delete = {
        let store = store.clone();
        move |id: String| {
            let store = store.clone();
            async move {
                match store.delete(&id).await {
                    Ok(()) => {
                        trades.set(store.cached());
                        if let Ok(stats) = store.summary().await {
                            summary.set(Some(stats));
                        }
                    }
                    Err(err) => load_error.set(Some(err.to_string())),
                }
            }
        }
    };

    rsx! {
        div {
            class: "dashboard",

            if let Some(error) = load_error() {
                div { class: "banner banner-error", "{error}" }
            }

            if let Some(stats) = summary() {
                SummaryRow { stats: stats }
            }

            div {
                class: "dashboard-columns",

                div {
                    class: "dashboard-main",
                    TradeForm { on_submit: on_create }
                    TradeTable { trades: trades(), on_delete: on_delete }
                }

                aside {
                    class: "dashboard-side",
                    TagEditor { title: "Emotions", kind: TagKind::Emotions }
                    TagEditor { title: "Confirmations", kind: TagKind::Confirmations }
                }
            }
        }
    }
}

#[component]
fn SummaryRow(stats: TradeSummary) -> Element {
    rsx! {
        div {
            class: "summary-row",
            StatTile { label: "Trades", value: "{stats.total_trades}" }
            StatTile { label: "Total PnL", value: "{stats.total_pnl}" }
            StatTile { label: "Avg PnL", value: "{stats.avg_pnl}" }
            StatTile { label: "Wins", value: "{stats.winning_trades}" }
            StatTile { label: "Losses", value: "{stats.losing_trades}" }
            StatTile { label: "Win rate", value: "{stats.win_rate}%" }
        }
    }
}

#[component]
fn StatTile(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "stat-tile",
            span { class: "stat-tile-value", "{value}" }
            span { class: "stat-tile-label", "{label}" }
        }
    }
}

#[component]
fn TradeForm(on_submit: EventHandler<NewTrade>) -> Element {
    let mut symbol = use_signal(String::new);
    let mut side = use_signal(|| Side::Buy);
    let mut date = use_signal(String::new);
    let mut rate = use_signal(String::new);
    let mut risk = use_signal(String::new);
    let mut result = use_signal(String::new);
    let mut status = use_signal(String::new);
    let mut notes = use_signal(String::new);
    let mut trading_link = use_signal(String::new);
    let mut form_error = use_signal(|| Option::<String>::None);

    let submit = move |_| {
        let symbol_value = symbol().trim().to_string();
        if symbol_value.is_empty() {
            form_error.set(Some("Symbol is required".to_string()));
            return;
        }
        let Ok(date_value) = date().parse::<NaiveDate>() else {
            form_error.set(Some("Pick a valid date".to_string()));
            return;
        };
        let Ok(rate_value) = rate().trim().parse::<f64>() else {
            form_error.set(Some("Rate must be a number".to_string()));
            return;
        };

        let status_value = match status().as_str() {
            "TP" => Some(Outcome::TakeProfit),
            "SL" => Some(Outcome::StopLoss),
            "BE" => Some(Outcome::BreakEven),
            _ => None,
        };

        let trade = NewTrade {
            symbol: symbol_value,
            side: side(),
            date: date_value,
            rate: rate_value,
            risk: risk().trim().parse().ok(),
            result: result().trim().parse().ok(),
            status: status_value,
            notes: Some(notes()).filter(|n| !n.trim().is_empty()),
            emotions: vec![],
            confirmations: vec![],
            trading_link: Some(trading_link()).filter(|l| !l.trim().is_empty()),
            user_id: None,
        };

        form_error.set(None);
        symbol.set(String::new());
        rate.set(String::new());
        risk.set(String::new());
        result.set(String::new());
        notes.set(String::new());
        trading_link.set(String::new());
        on_submit.call(trade);
    };

    rsx! {
        div {
            class: "trade-form",
            h2 { "New trade" }

            if let Some(error) = form_error() {
                div { class: "banner banner-error", "{error}" }
            }

            div {
                class: "form-grid",
                div {
                    class: "form-field",
                    label { "Symbol" }
                    input {
                        r#type: "text",
                        placeholder: "EURUSD",
                        value: symbol(),
                        oninput: move |evt| symbol.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Side" }
                    select {
                        value: if side() == Side::Buy { "buy" } else { "sell" },
                        onchange: move |evt| {
                            side.set(if evt.value() == "sell" { Side::Sell } else { Side::Buy })
                        },
                        option { value: "buy", "Buy" }
                        option { value: "sell", "Sell" }
                    }
                }
                div {
                    class: "form-field",
                    label { "Date" }
                    input {
                        r#type: "date",
                        value: date(),
                        oninput: move |evt| date.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Rate" }
                    input {
                        r#type: "number",
                        step: "any",
                        value: rate(),
                        oninput: move |evt| rate.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Risk" }
                    input {
                        r#type: "number",
                        step: "any",
                        value: risk(),
                        oninput: move |evt| risk.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Result" }
                    input {
                        r#type: "number",
                        step: "any",
                        value: result(),
                        oninput: move |evt| result.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Status" }
                    select {
                        value: status(),
                        onchange: move |evt| status.set(evt.value()),
                        option { value: "", "Open" }
                        option { value: "TP", "Take profit" }
                        option { value: "SL", "Stop loss" }
                        option { value: "BE", "Break even" }
                    }
                }
                div {
                    class: "form-field",
                    label { "Chart link" }
                    input {
                        r#type: "url",
                        placeholder: "https://...",
                        value: trading_link(),
                        oninput: move |evt| trading_link.set(evt.value()),
                    }
                }
            }

            div {
                class: "form-field",
                label { "Notes" }
                textarea {
                    rows: 3,
                    value: notes(),
                    oninput: move |evt| notes.set(evt.value()),
                }
            }

            div {
                class: "form-actions",
                button { class: "primary", onclick: submit, "Save trade" }
            }
        }
    }
}

#[component]
fn TradeTable(trades: Vec<Trade>, on_delete: EventHandler<String>) -> Element {
    rsx! {
        div {
            class: "trade-table",
            h2 { "Trade log" }

            if trades.is_empty() {
                p { class: "empty-hint", "No trades recorded yet." }
            } else {
                table {
                    thead {
                        tr {
                            th { "Date" }
                            th { "Symbol" }
                            th { "Side" }
                            th { "Rate" }
                            th { "Result" }
                            th { "Status" }
                            th { "" }
                        }
                    }
                    tbody {
                        for trade in trades {
                            tr {
                                key: "{trade.id}",
                                td { "{trade.date}" }
                                td { "{trade.symbol}" }
                                td {
                                    {match trade.side {
                                        Side::Buy => "buy",
                                        Side::Sell => "sell",
                                    }}
                                }
                                td { "{trade.rate}" }
                                td {
                                    if let Some(result) = trade.result {
                                        "{result}"
                                    } else {
                                        "-"
                                    }
                                }
                                td {
                                    {match trade.status {
                                        Some(Outcome::TakeProfit) => "TP",
                                        Some(Outcome::StopLoss) => "SL",
                                        Some(Outcome::BreakEven) => "BE",
                                        None => "open",
                                    }}
                                }
                                td {
                                    button {
                                        class: "link-danger",
                                        onclick: {
                                            let id = trade.id.clone();
                                            move |_| on_delete.call(id.clone())
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
