use crate::session::SessionStore;
use crate::types::{ChatSession, SessionId};
use dioxus::prelude::*;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const LAST_UPDATED_FORMAT: &[FormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");
const PREVIEW_CHARS: usize = 50;

fn format_last_updated(timestamp: OffsetDateTime) -> String {
    let local = match UtcOffset::current_local_offset() {
        Ok(offset) => timestamp.to_offset(offset),
        Err(_) => timestamp,
    };
    local.format(LAST_UPDATED_FORMAT).unwrap_or_default()
}

/// First characters of the session's latest message, for the list entry.
fn preview(session: &ChatSession) -> String {
    let Some(message) = session.last_message() else {
        return String::new();
    };
    let mut text: String = message.text.chars().take(PREVIEW_CHARS).collect();
    if message.text.chars().count() > PREVIEW_CHARS {
        text.push_str("...");
    }
    text
}

#[component]
pub fn Sidebar(store: Signal<SessionStore>) -> Element {
    let mut store = store;
    let sessions = store.read().sessions().to_vec();
    let active = store.read().active_id().cloned();

    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar-header",
                button {
                    class: "btn btn-primary", r#type: "button",
                    onclick: move |_| {
                        store.write().create_session();
                    },
                    "+ Chat Baru"
                }
            }
            div { class: "sidebar-list",
                if sessions.is_empty() {
                    div { class: "sidebar-empty", "Belum ada riwayat" }
                }
                for session in sessions.iter() {
                    SessionItem {
                        key: "{session.id}",
                        store,
                        id: session.id.clone(),
                        title: session.title.clone(),
                        preview: preview(session),
                        updated: format_last_updated(session.last_updated),
                        is_active: active.as_ref() == Some(&session.id),
                    }
                }
            }
        }
    }
}

#[component]
fn SessionItem(
    store: Signal<SessionStore>,
    id: SessionId,
    title: String,
    preview: String,
    updated: String,
    is_active: bool,
) -> Element {
    let mut store = store;
    let select_id = id.clone();
    let delete_id = id.clone();
    let class = if is_active {
        "session-item active"
    } else {
        "session-item"
    };
    rsx! {
        div {
            class: class,
            onclick: move |_| {
                store.write().select_session(&select_id);
            },
            div { style: "flex: 1; min-width: 0;",
                div { class: "session-title", "{title}" }
                div { class: "session-preview", "{preview}" }
                div { class: "session-meta", "{updated}" }
            }
            button {
                class: "action-btn", r#type: "button", title: "Hapus chat",
                onclick: move |ev| {
                    ev.stop_propagation();
                    store.write().delete_session(&delete_id);
                },
                "Hapus"
            }
        }
    }
}
