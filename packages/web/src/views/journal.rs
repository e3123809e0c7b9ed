//! Daily journal: entry list with a month filter, plus a create/edit form.

use chrono::NaiveDate;
use dioxus::prelude::*;

use api::models::{DayJournal, DayJournalUpdate, NewDayJournal};

#[component]
pub fn Journal() -> Element {
    let store = use_hook(ui::make_journal);
    let mut entries = use_signal(Vec::<DayJournal>::new);
    let mut load_error = use_signal(|| Option::<String>::None);

    // Form state. `editing` holds the id of the entry being edited, if any.
    let mut editing = use_signal(|| Option::<String>::None);
    let mut date = use_signal(String::new);
    let mut break_plan = use_signal(|| false);
    let mut notes = use_signal(String::new);

    // Month filter.
    let mut range_start = use_signal(String::new);
    let mut range_end = use_signal(String::new);
    let mut filtered = use_signal(|| false);

    let _loader = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            async move {
                match store.list().await {
                    Ok(list) => {
                        entries.set(list);
                        load_error.set(None);
                    }
                    Err(err) => load_error.set(Some(err.to_string())),
                }
            }
        }
    });

    let mut reset_form = move || {
        editing.set(None);
        date.set(String::new());
        break_plan.set(false);
        notes.set(String::new());
    };

    let on_save = {
        let store = store.clone();
        move |_| {
            let store = store.clone();
            let mut reset_form = reset_form;
            async move {
                let notes_value = Some(notes()).filter(|n| !n.trim().is_empty());
                let saved = if let Some(id) = editing() {
                    let update = DayJournalUpdate {
                        break_trading_plan: Some(break_plan()),
                        notes: notes_value,
                    };
                    store.update(&id, &update).await.map(|_| ())
                } else {
                    let Ok(date_value) = date().parse::<NaiveDate>() else {
                        load_error.set(Some("Pick a valid date".to_string()));
                        return;
                    };
                    let entry = NewDayJournal {
                        date: date_value,
                        break_trading_plan: break_plan(),
                        notes: notes_value,
                    };
                    store.create(&entry).await.map(|_| ())
                };

                match saved {
                    Ok(()) => {
                        entries.set(store.cached());
                        filtered.set(false);
                        reset_form();
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
                        entries.set(store.cached());
                        filtered.set(false);
                    }
                    Err(err) => load_error.set(Some(err.to_string())),
                }
            }
        }
    };

    let on_filter = {
        let store = store.clone();
        move |_| {
            let store = store.clone();
            async move {
                let (Ok(start), Ok(end)) = (
                    range_start().parse::<NaiveDate>(),
                    range_end().parse::<NaiveDate>(),
                ) else {
                    load_error.set(Some("Pick both range dates".to_string()));
                    return;
                };
                match store.range(start, end).await {
                    Ok(list) => {
                        entries.set(list);
                        filtered.set(true);
                        load_error.set(None);
                    }
                    Err(err) => load_error.set(Some(err.to_string())),
                }
            }
        }
    };

    let on_show_all = {
        let store = store.clone();
        move |_| {
            let store = store.clone();
            async move {
                match store.list().await {
                    Ok(list) => {
                        entries.set(list);
                        filtered.set(false);
                        load_error.set(None);
                    }
                    Err(err) => load_error.set(Some(err.to_string())),
                }
            }
        }
    };

    let on_edit = move |entry: DayJournal| {
        editing.set(Some(entry.id.clone()));
        date.set(entry.date.to_string());
        break_plan.set(entry.break_trading_plan);
        notes.set(entry.notes.unwrap_or_default());
    };

    rsx! {
        div {
            class: "journal",

            if let Some(error) = load_error() {
                div { class: "banner banner-error", "{error}" }
            }

            div {
                class: "journal-form",
                h2 {
                    if editing().is_some() { "Edit entry" } else { "New entry" }
                }
                div {
                    class: "form-grid",
                    div {
                        class: "form-field",
                        label { "Date" }
                        input {
                            r#type: "date",
                            value: date(),
                            // The date identifies the day; it is fixed while editing.
                            disabled: editing().is_some(),
                            oninput: move |evt| date.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-field form-field-checkbox",
                        label { "Broke the trading plan" }
                        input {
                            r#type: "checkbox",
                            checked: break_plan(),
                            onchange: move |evt| break_plan.set(evt.checked()),
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
                    button { class: "primary", onclick: on_save, "Save" }
                    if editing().is_some() {
                        button {
                            class: "secondary",
                            onclick: move |_| reset_form(),
                            "Cancel"
                        }
                    }
                }
            }

            div {
                class: "journal-filter",
                label { "From" }
                input {
                    r#type: "date",
                    value: range_start(),
                    oninput: move |evt| range_start.set(evt.value()),
                }
                label { "To" }
                input {
                    r#type: "date",
                    value: range_end(),
                    oninput: move |evt| range_end.set(evt.value()),
                }
                button { onclick: on_filter, "Filter" }
                if filtered() {
                    button { class: "secondary", onclick: on_show_all, "Show all" }
                }
            }

            div {
                class: "journal-entries",
                if entries().is_empty() {
                    p { class: "empty-hint", "No journal entries yet." }
                }
                for entry in entries() {
                    div {
                        key: "{entry.id}",
                        class: "journal-entry",
                        div {
                            class: "journal-entry-head",
                            span { class: "journal-entry-date", "{entry.date}" }
                            if entry.break_trading_plan {
                                span { class: "journal-entry-flag", "plan broken" }
                            }
                            span {
                                class: "journal-entry-actions",
                                button {
                                    class: "link",
                                    onclick: {
                                        let entry = entry.clone();
                                        let mut on_edit = on_edit;
                                        move |_| on_edit(entry.clone())
                                    },
                                    "Edit"
                                }
                                button {
                                    class: "link-danger",
                                    onclick: {
                                        let id = entry.id.clone();
                                        let on_delete = on_delete.clone();
                                        move |_| on_delete(id.clone())
                                    },
                                    "Delete"
                                }
                            }
                        }
                        if let Some(entry_notes) = entry.notes.clone() {
                            p { class: "journal-entry-notes", "{entry_notes}" }
                        }
                    }
                }
            }
        }
    }
}
