use crate::ai::TRANSPORT_FAILURE_REPLY;
use crate::config::Config;
use crate::export::{self, Notice};
use crate::session::SessionStore;
use crate::types::ReplyOutcome;
use crate::ui::ChatClient;
use crate::views::MessageBubble;
use dioxus::events::Key;
use dioxus::prelude::*;
use tracing::debug;

fn send_message(
    mut store: Signal<SessionStore>,
    mut input: Signal<String>,
    client: ChatClient,
    text: String,
) {
    let Some(session_id) = store.read().active_id().cloned() else {
        return;
    };
    let pending = match store.write().append_user_message(&session_id, &text) {
        Ok(pending) => pending,
        Err(rejected) => {
            debug!(%rejected, "send rejected");
            return;
        }
    };
    input.set(String::new());

    spawn(async move {
        let outcome = match client.0.as_ref() {
            Some(client) => client.reply(&pending.text).await,
            None => ReplyOutcome::Failed(TRANSPORT_FAILURE_REPLY.to_string()),
        };
        store.write().complete_send(&outcome);
    });
}

#[component]
pub fn ChatView(store: Signal<SessionStore>, notice: Signal<Option<Notice>>) -> Element {
    let mut input = use_signal(String::new);
    let client = use_context::<ChatClient>();
    let config = use_context::<Config>();

    let Some(session) = store.read().current_session().cloned() else {
        return rsx! {
            main { class: "main",
                div { class: "chat-empty", "Pilih atau buat chat baru untuk memulai" }
            }
        };
    };
    let is_sending = store.read().is_sending();
    let awaiting_here = store.read().sending_session() == Some(&session.id);

    let on_copy_all = {
        let session = session.clone();
        let mut notice = notice;
        move |_| notice.set(Some(export::copy_session(&session)))
    };
    let on_download = {
        let session = session.clone();
        let dir = config.download_dir.clone();
        let mut notice = notice;
        move |_| notice.set(Some(export::download_session(&session, dir.as_deref())))
    };
    let key_client = client.clone();
    let click_client = client.clone();

    rsx! {
        main { class: "main",
            div { class: "chat-header",
                h2 { "{session.title}" }
                if session.has_conversation() {
                    div { class: "hstack", style: "display: flex; gap: 0.5rem;",
                        button { class: "btn", r#type: "button", onclick: on_copy_all, "Salin Semua" }
                        button { class: "btn", r#type: "button", onclick: on_download, "Unduh" }
                    }
                }
            }
            div { id: "chat-list", class: "chat-list",
                for message in session.messages.iter() {
                    MessageBubble { key: "{message.id.get()}", message: message.clone(), notice }
                }
                if awaiting_here {
                    div { class: "message-row bot",
                        div { class: "bubble bot typing", "SDA Assistant sedang mengetik..." }
                    }
                }
            }
            form { class: "composer",
                textarea {
                    rows: "1", placeholder: "Ketik pesan Anda...",
                    value: "{input}", oninput: move |ev| input.set(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            send_message(store, input, key_client.clone(), input());
                        }
                    },
                    disabled: is_sending, autofocus: true,
                }
                button {
                    class: "btn btn-primary", r#type: "button",
                    disabled: is_sending || input().trim().is_empty(),
                    onclick: move |_| {
                        send_message(store, input, click_client.clone(), input());
                    },
                    "Kirim"
                }
            }
        }
    }
}
