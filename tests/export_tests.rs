//! Integration tests for transcript export
//!
//! Downloads go to a temporary directory; clipboard access is not exercised.

use sda_assistant::export::{self, Notice, TRANSCRIPT_SEPARATOR};
use sda_assistant::session::SessionStore;
use sda_assistant::types::{GREETING, ReplyOutcome};
use std::fs;
use tempfile::TempDir;
use time::OffsetDateTime;

fn store_with_conversation() -> SessionStore {
    let mut store = SessionStore::with_initial_session();
    let id = store.active_id().cloned().unwrap();
    store.append_user_message(&id, "Status pintu air?").unwrap();
    store.complete_send(&ReplyOutcome::Answered("**Siaga 3** di Manggarai".to_string()));
    store
}

#[test]
fn test_write_transcript_creates_dated_file() {
    let dir = TempDir::new().unwrap();
    let store = store_with_conversation();
    let session = store.current_session().unwrap();

    let path = export::write_transcript(dir.path(), session).unwrap();
    let expected_name =
        export::download_file_name(OffsetDateTime::now_utc().date()).unwrap();
    assert_eq!(path, dir.path().join(expected_name));

    let contents = fs::read_to_string(&path).unwrap();
    let blocks: Vec<&str> = contents.split(TRANSCRIPT_SEPARATOR).collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].starts_with('['));
    assert!(blocks[0].ends_with(&format!("] SDA Assistant:\n{GREETING}")));
    assert!(blocks[1].ends_with("] Anda:\nStatus pintu air?"));
    assert!(blocks[2].ends_with("] SDA Assistant:\n**Siaga 3** di Manggarai"));
}

#[test]
fn test_download_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("unduhan").join("sda");
    let store = store_with_conversation();

    let notice = export::download_session(store.current_session().unwrap(), Some(&target));
    assert!(notice.is_success());
    assert!(notice.text().starts_with("Chat berhasil diunduh"));
    assert_eq!(fs::read_dir(&target).unwrap().count(), 1);
}

#[test]
fn test_download_failure_is_a_notice() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("berkas");
    fs::write(&blocker, "bukan direktori").unwrap();
    let store = store_with_conversation();

    let notice = export::download_session(store.current_session().unwrap(), Some(&blocker));
    assert_eq!(notice, Notice::Failure("Gagal mengunduh chat".to_string()));
    assert_eq!(store.current_session().unwrap().messages.len(), 3);
}

#[test]
fn test_copy_transcript_matches_session() {
    let store = store_with_conversation();
    let session = store.current_session().unwrap();
    assert_eq!(
        export::transcript(&session.messages),
        format!(
            "SDA Assistant:\n{GREETING}\n\n---\n\nAnda:\nStatus pintu air?\n\n---\n\nSDA Assistant:\n**Siaga 3** di Manggarai"
        )
    );
}
