use crate::chart::ChartSpec;
use crate::export::{self, Notice};
use crate::format::{Block, InlineSpan, MessageBody, SUB_HEADER_LEVEL, Table, format_message};
use crate::theme::header_accent;
use crate::types::{Message, Sender};
use crate::views::ChartView;
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]");

fn format_message_timestamp(timestamp: OffsetDateTime) -> String {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).unwrap_or_default()
}

#[component]
pub fn MessageBubble(message: Message, notice: Signal<Option<Notice>>) -> Element {
    let side = match message.sender {
        Sender::User => "user",
        Sender::Bot => "bot",
    };
    let timestamp = format_message_timestamp(message.timestamp);
    let body = format_message(&message);
    let copy_payload = message.clone();
    let mut notice = notice;
    let on_copy = move |_| notice.set(Some(export::copy_message(&copy_payload)));

    rsx! {
        div { class: "message-row {side}",
            div {
                div { class: "bubble {side}",
                    {match body {
                        MessageBody::Literal(text) => rsx! { "{text}" },
                        MessageBody::Formatted(doc) => rsx! {
                            for (idx, block) in doc.into_blocks().into_iter().enumerate() {
                                BlockView { key: "{idx}", block }
                            }
                        },
                    }}
                }
                div { class: "message-meta",
                    span { class: "message-timestamp", "{timestamp}" }
                    if matches!(message.sender, Sender::Bot) {
                        button { class: "action-btn", r#type: "button", title: "Salin pesan", onclick: on_copy, "Salin" }
                    }
                }
            }
        }
    }
}

#[component]
fn BlockView(block: Block) -> Element {
    match block {
        Block::Paragraph(spans) => rsx! {
            p { Spans { spans } }
        },
        Block::Header { level, text, .. } if level >= SUB_HEADER_LEVEL => rsx! {
            div { class: "md-sub-header", "{text}" }
        },
        Block::Header { category, text, .. } => {
            let accent = header_accent(category);
            rsx! {
                div {
                    class: "md-header category-{category.label()}",
                    style: "border-color: {accent.border}; background: {accent.background};",
                    "{text}"
                }
            }
        }
        Block::Quote(spans) => rsx! {
            blockquote { Spans { spans } }
        },
        Block::Separator => rsx! { hr {} },
        Block::ListItem { marker, content } => rsx! {
            div { class: "md-list-item",
                span { class: "md-marker", "{marker}" }
                span { Spans { spans: content } }
            }
        },
        Block::Table(table) => rsx! { TableView { table } },
        Block::ChartRef(raw) => match ChartSpec::from_fenced(&raw) {
            Some(spec) => rsx! { ChartView { spec } },
            None => rsx! {},
        },
    }
}

#[component]
fn Spans(spans: Vec<InlineSpan>) -> Element {
    rsx! {
        for span in spans.iter() {
            {match span {
                InlineSpan::PlainText(text) => rsx! { "{text}" },
                InlineSpan::Bold(text) => rsx! { strong { "{text}" } },
                InlineSpan::Code(text) => rsx! { code { "{text}" } },
            }}
        }
    }
}

#[component]
fn TableView(table: Table) -> Element {
    rsx! {
        table { class: "md-table",
            thead {
                tr {
                    for cell in table.header.iter() {
                        th { "{cell}" }
                    }
                }
            }
            tbody {
                for row in table.rows.iter() {
                    tr {
                        for cell in row.iter() {
                            td { "{cell}" }
                        }
                    }
                }
            }
        }
    }
}
