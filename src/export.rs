//! Plain-text transcripts of a chat session, plus the clipboard and download
//! helpers the shells call. Failures here never touch session state; they are
//! reported back as a [`Notice`] for the shell to flash.

use crate::types::{ChatSession, Message};
use std::path::{Path, PathBuf};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};
use tracing::{info, warn};

pub const TRANSCRIPT_SEPARATOR: &str = "\n\n---\n\n";

const TRANSCRIPT_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[day]/[month]/[year], [hour].[minute].[second]");
const FILE_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("failed to write transcript: {0}")]
    Io(#[from] std::io::Error),

    #[error("no download directory available")]
    NoDownloadDir,

    #[error("failed to format timestamp: {0}")]
    Format(#[from] time::error::Format),
}

/// Transient, user-visible outcome of an export action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Failure(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }
}

fn local(timestamp: OffsetDateTime) -> OffsetDateTime {
    match UtcOffset::current_local_offset() {
        Ok(offset) => timestamp.to_offset(offset),
        Err(_) => timestamp,
    }
}

/// Copy variant: `"{sender}:\n{text}"` blocks.
pub fn transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| format!("{}:\n{}", msg.sender.label(), msg.text))
        .collect::<Vec<_>>()
        .join(TRANSCRIPT_SEPARATOR)
}

/// Download variant: each block is prefixed with its local timestamp.
pub fn timestamped_transcript(messages: &[Message]) -> Result<String, ExportError> {
    let blocks = messages
        .iter()
        .map(|msg| -> Result<String, ExportError> {
            let time = local(msg.timestamp).format(TRANSCRIPT_TIME_FORMAT)?;
            Ok(format!("[{time}] {}:\n{}", msg.sender.label(), msg.text))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(blocks.join(TRANSCRIPT_SEPARATOR))
}

pub fn download_file_name(date: Date) -> Result<String, ExportError> {
    Ok(format!("chat-{}.txt", date.format(FILE_DATE_FORMAT)?))
}

pub fn write_transcript(dir: &Path, session: &ChatSession) -> Result<PathBuf, ExportError> {
    let today = OffsetDateTime::now_utc().date();
    let path = dir.join(download_file_name(today)?);
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, timestamped_transcript(&session.messages)?)?;
    info!(path = %path.display(), session = %session.id, "transcript written");
    Ok(path)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_download_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(dirs::home_dir)
}

#[cfg(target_arch = "wasm32")]
pub fn default_download_dir() -> Option<PathBuf> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn copy_to_clipboard(text: &str) -> Result<(), ExportError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|err| ExportError::Clipboard(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
pub fn copy_to_clipboard(_text: &str) -> Result<(), ExportError> {
    Err(ExportError::Clipboard(
        "clipboard is not supported on this target".to_string(),
    ))
}

pub fn copy_message(message: &Message) -> Notice {
    match copy_to_clipboard(&message.text) {
        Ok(()) => Notice::Success("Pesan berhasil disalin".to_string()),
        Err(err) => {
            warn!(error = %err, "copying message failed");
            Notice::Failure("Gagal menyalin pesan".to_string())
        }
    }
}

pub fn copy_session(session: &ChatSession) -> Notice {
    match copy_to_clipboard(&transcript(&session.messages)) {
        Ok(()) => Notice::Success("Semua pesan berhasil disalin".to_string()),
        Err(err) => {
            warn!(error = %err, "copying transcript failed");
            Notice::Failure("Gagal menyalin pesan".to_string())
        }
    }
}

/// Write the session transcript into `dir`, or the platform download folder.
pub fn download_session(session: &ChatSession, dir: Option<&Path>) -> Notice {
    let target = dir.map(Path::to_path_buf).or_else(default_download_dir);
    let result = target
        .ok_or(ExportError::NoDownloadDir)
        .and_then(|dir| write_transcript(&dir, session));
    match result {
        Ok(path) => Notice::Success(format!("Chat berhasil diunduh ke {}", path.display())),
        Err(err) => {
            warn!(error = %err, "downloading transcript failed");
            Notice::Failure("Gagal mengunduh chat".to_string())
        }
    }
}
