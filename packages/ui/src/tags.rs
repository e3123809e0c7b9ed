//! Tag catalog editor: chips with a remove control plus an add input.

use dioxus::prelude::*;
use store::TagKind;

use crate::platform::make_tags;

/// Editable view over one tag catalog (emotions or confirmations).
///
/// Names are the unit of interaction here; ids stay inside the store. Adding
/// an existing or blank name is a no-op.
#[component]
pub fn TagEditor(title: String, kind: TagKind) -> Element {
    let store = use_hook(move || make_tags(kind));
    let mut names = use_signal(Vec::<String>::new);
    let mut draft = use_signal(String::new);

    let _loader = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            async move {
                match store.list().await {
                    Ok(_) => names.set(store.names()),
                    Err(err) => tracing::error!("could not load tags: {err}"),
                }
            }
        }
    });

    let on_add = {
        let store = store.clone();
        move |_| {
            let store = store.clone();
            async move {
                let value = draft();
                match store.add_name(&value).await {
                    Ok(_) => {
                        names.set(store.names());
                        draft.set(String::new());
                    }
                    Err(err) => tracing::error!("could not add tag: {err}"),
                }
            }
        }
    };

    let on_remove = move |name: String| {
        let store = store.clone();
        async move {
            match store.remove_name(&name).await {
                Ok(_) => names.set(store.names()),
                Err(err) => tracing::error!("could not remove tag: {err}"),
            }
        }
    };

    rsx! {
        div {
            class: "tag-editor",
            h3 { class: "tag-editor-title", "{title}" }
            div {
                class: "tag-editor-chips",
                for name in names() {
                    span {
                        key: "{name}",
                        class: "tag-chip",
                        "{name}"
                        button {
                            class: "tag-chip-remove",
                            onclick: {
                                let name = name.clone();
                                let on_remove = on_remove.clone();
                                move |_| on_remove(name.clone())
                            },
                            "\u{2715}"
                        }
                    }
                }
            }
            div {
                class: "tag-editor-add",
                input {
                    r#type: "text",
                    placeholder: "New tag",
                    value: draft(),
                    oninput: move |evt| draft.set(evt.value()),
                }
                button {
                    onclick: on_add,
                    "Add"
                }
            }
        }
    }
}
