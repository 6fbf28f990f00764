use crate::ai::{InferenceClient, WebhookBackend};
use crate::config::Config;
use crate::export::Notice;
use crate::session::SessionStore;
use crate::theme::BASE_THEME;
use crate::views::{ChatView, Sidebar};
use dioxus::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

const NOTICE_HIDE_DELAY: Duration = Duration::from_secs(2);

/// Shared handle to the inference client. `None` when the HTTP client could
/// not be built; sends then fail with the transport fallback reply.
#[derive(Clone)]
pub struct ChatClient(pub Option<Arc<InferenceClient<WebhookBackend>>>);

impl ChatClient {
    pub fn from_config(config: &Config) -> Self {
        match WebhookBackend::new(config.endpoint.clone(), config.timeout) {
            Ok(backend) => Self(Some(Arc::new(InferenceClient::new(backend)))),
            Err(err) => {
                error!(error = %err, "failed to build inference client");
                Self(None)
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(Config::from_env);
    use_context_provider(|| ChatClient::from_config(&config));
    use_context_provider(|| config.clone());

    let store = use_signal(SessionStore::with_initial_session);
    let notice = use_signal(|| Option::<Notice>::None);

    use_notice_dismiss(notice);

    rsx! {
        style { dangerous_inner_html: "{BASE_THEME}" }
        div { class: "app",
            Sidebar { store }
            ChatView { store, notice }
        }
        if let Some(current) = notice() {
            NoticeToast { notice: current }
        }
    }
}

fn use_notice_dismiss(notice: Signal<Option<Notice>>) {
    use_effect(move || {
        if notice().is_some() {
            let mut control = notice;
            spawn(async move {
                tokio::time::sleep(NOTICE_HIDE_DELAY).await;
                control.set(None);
            });
        }
    });
}

#[component]
fn NoticeToast(notice: Notice) -> Element {
    let class = if notice.is_success() { "toast ok" } else { "toast fail" };
    rsx! {
        div { class: class, role: "status", "{notice.text()}" }
    }
}
