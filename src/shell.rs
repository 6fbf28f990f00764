//! Console shell: a line-oriented front end over the session store, the
//! formatter and the inference client.

use crate::ai::{InferenceBackend, InferenceClient};
use crate::config::Config;
use crate::export;
use crate::format::format_message;
use crate::render::{RenderOptions, render_body};
use crate::session::{SendRejected, SessionStore};
use crate::types::{ChatSession, Message, SessionId};
use anyhow::Result;
use time::UtcOffset;
use time::format_description::FormatItem;
use time::macros::format_description;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]");
const LAST_UPDATED_FORMAT: &[FormatItem<'static>] =
    format_description!("[day]/[month]/[year]");

const HELP: &str = "\
Perintah:
  /new            buat chat baru
  /list           tampilkan riwayat chat
  /select <n>     pilih chat ke-n
  /delete <n>     hapus chat ke-n
  /copy           salin semua pesan chat aktif
  /download       unduh chat aktif sebagai teks
  /help           tampilkan bantuan ini
  /quit           keluar
Teks lain dikirim ke asisten.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    New,
    List,
    Select(usize),
    Delete(usize),
    Copy,
    Download,
    Help,
    Quit,
    Send(String),
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Send(line.to_string());
    };
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let index = parts.next().and_then(|arg| arg.parse::<usize>().ok());
    match (name, index) {
        ("new", _) => Command::New,
        ("list", _) => Command::List,
        ("select", Some(n)) => Command::Select(n),
        ("delete", Some(n)) => Command::Delete(n),
        ("copy", _) => Command::Copy,
        ("download", _) => Command::Download,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

pub struct Shell<B> {
    store: SessionStore,
    client: InferenceClient<B>,
    config: Config,
    options: RenderOptions,
}

impl<B: InferenceBackend> Shell<B> {
    pub fn new(client: InferenceClient<B>, config: Config, options: RenderOptions) -> Self {
        Self {
            store: SessionStore::with_initial_session(),
            client,
            config,
            options,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// 1-based position in the session list, as shown by `/list`.
    fn session_at(&self, position: usize) -> Option<SessionId> {
        position
            .checked_sub(1)
            .and_then(|idx| self.store.sessions().get(idx))
            .map(|session| session.id.clone())
    }

    fn print_message(&self, message: &Message) -> String {
        let timestamp = match UtcOffset::current_local_offset() {
            Ok(offset) => message.timestamp.to_offset(offset),
            Err(_) => message.timestamp,
        };
        let time = timestamp.format(MESSAGE_TIME_FORMAT).unwrap_or_default();
        let body = render_body(&format_message(message), self.options);
        format!("{} [{time}]\n{body}\n", message.sender.label())
    }

    fn format_session_list(&self) -> String {
        if self.store.sessions().is_empty() {
            return "Belum ada riwayat\n".to_string();
        }
        let active = self.store.active_id();
        self.store
            .sessions()
            .iter()
            .enumerate()
            .map(|(idx, session)| {
                let marker = if Some(&session.id) == active { "*" } else { " " };
                let updated = session
                    .last_updated
                    .format(LAST_UPDATED_FORMAT)
                    .unwrap_or_default();
                format!("{marker} {}. {} ({updated})\n", idx + 1, session.title)
            })
            .collect()
    }

    fn format_transcript(&self, session: &ChatSession) -> String {
        session
            .messages
            .iter()
            .map(|message| self.print_message(message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn send(&mut self, text: &str) -> String {
        let Some(session_id) = self.store.active_id().cloned() else {
            return "Pilih atau buat chat baru untuk memulai\n".to_string();
        };
        let pending = match self.store.append_user_message(&session_id, text) {
            Ok(pending) => pending,
            Err(SendRejected::EmptyText) => return String::new(),
            // Sends are sequential here, so this only guards a misbehaving store.
            Err(rejected) => {
                debug!(%rejected, "send rejected");
                return String::new();
            }
        };
        let outcome = self.client.reply(&pending.text).await;
        self.store.complete_send(&outcome);

        self.store
            .get(&pending.session_id)
            .and_then(ChatSession::last_message)
            .map(|message| self.print_message(message))
            .unwrap_or_default()
    }

    /// Apply one command and return what to print. `None` means quit.
    pub async fn handle(&mut self, command: Command) -> Option<String> {
        let output = match command {
            Command::Quit => return None,
            Command::Help => format!("{HELP}\n"),
            Command::New => {
                self.store.create_session();
                let current = self.store.current_session().map(|s| self.format_transcript(s));
                current.unwrap_or_default()
            }
            Command::List => self.format_session_list(),
            Command::Select(position) => match self.session_at(position) {
                Some(id) => {
                    self.store.select_session(&id);
                    self.store
                        .current_session()
                        .map(|s| self.format_transcript(s))
                        .unwrap_or_default()
                }
                None => format!("Tidak ada chat ke-{position}\n"),
            },
            Command::Delete(position) => match self.session_at(position) {
                Some(id) => {
                    self.store.delete_session(&id);
                    self.format_session_list()
                }
                None => format!("Tidak ada chat ke-{position}\n"),
            },
            Command::Copy => match self.store.current_session() {
                Some(session) if session.has_conversation() => {
                    format!("{}\n", export::copy_session(session).text())
                }
                _ => "Belum ada percakapan untuk disalin\n".to_string(),
            },
            Command::Download => match self.store.current_session() {
                Some(session) if session.has_conversation() => {
                    let notice =
                        export::download_session(session, self.config.download_dir.as_deref());
                    format!("{}\n", notice.text())
                }
                _ => "Belum ada percakapan untuk diunduh\n".to_string(),
            },
            Command::Send(text) => self.send(&text).await,
            Command::Unknown(raw) => format!("Perintah tidak dikenal: {raw} (ketik /help)\n"),
        };
        Some(output)
    }

    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if let Some(session) = self.store.current_session() {
            let greeting = self.format_transcript(session);
            output.write_all(greeting.as_bytes()).await?;
        }
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(text) = self.handle(parse_command(&line)).await else {
                break;
            };
            output.write_all(text.as_bytes()).await?;
            output.flush().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatResult;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl InferenceBackend for Echo {
        async fn complete(&self, message: &str) -> ChatResult<String> {
            Ok(format!("**Diterima**: {message}"))
        }
    }

    fn shell() -> Shell<Echo> {
        Shell::new(
            InferenceClient::new(Echo),
            Config::default(),
            RenderOptions::default(),
        )
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("/new"), Command::New);
        assert_eq!(parse_command(" /select 2 "), Command::Select(2));
        assert_eq!(
            parse_command("/select dua"),
            Command::Unknown("/select dua".into())
        );
        assert_eq!(parse_command("/exit"), Command::Quit);
        assert_eq!(
            parse_command("status banjir"),
            Command::Send("status banjir".into())
        );
    }

    #[tokio::test]
    async fn send_renders_formatted_reply() {
        let mut shell = shell();
        let out = shell.handle(Command::Send("Halo".into())).await.unwrap();
        assert!(out.starts_with("SDA Assistant ["));
        assert!(out.contains("Diterima: Halo"));
        assert_eq!(shell.store().current_session().unwrap().title, "Halo");
    }

    #[tokio::test]
    async fn blank_send_prints_nothing() {
        let mut shell = shell();
        assert_eq!(shell.handle(Command::Send("   ".into())).await.unwrap(), "");
        assert_eq!(shell.store().current_session().unwrap().messages.len(), 1);
    }

    #[tokio::test]
    async fn delete_and_select_by_position() {
        let mut shell = shell();
        shell.handle(Command::New).await;
        assert_eq!(shell.store().sessions().len(), 2);
        shell.handle(Command::Delete(1)).await;
        assert_eq!(shell.store().sessions().len(), 1);
        let out = shell.handle(Command::Select(5)).await.unwrap();
        assert_eq!(out, "Tidak ada chat ke-5\n");
    }

    #[tokio::test]
    async fn send_without_sessions_asks_for_new_chat() {
        let mut shell = shell();
        shell.handle(Command::Delete(1)).await;
        let out = shell.handle(Command::Send("Halo".into())).await.unwrap();
        assert_eq!(out, "Pilih atau buat chat baru untuk memulai\n");
    }

    #[tokio::test]
    async fn run_stops_on_quit() {
        let mut shell = shell();
        let input = tokio::io::BufReader::new("Halo\n/quit\nTidak terkirim\n".as_bytes());
        let mut output = Vec::new();
        shell.run(input, &mut output).await.unwrap();
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Diterima: Halo"));
        assert!(!printed.contains("Tidak terkirim"));
        assert_eq!(shell.store().current_session().unwrap().messages.len(), 3);
    }
}
