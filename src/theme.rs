use crate::format::HeaderCategory;

pub struct HeaderAccent {
    pub border: &'static str,
    pub background: &'static str,
}

pub fn header_accent(category: HeaderCategory) -> HeaderAccent {
    match category {
        HeaderCategory::Info => HeaderAccent {
            border: "#2563eb",
            background: "#eff6ff",
        },
        HeaderCategory::Data => HeaderAccent {
            border: "#16a34a",
            background: "#f0fdf4",
        },
        HeaderCategory::Insight => HeaderAccent {
            border: "#ca8a04",
            background: "#fefce8",
        },
        HeaderCategory::Action => HeaderAccent {
            border: "#7c3aed",
            background: "#f5f3ff",
        },
        HeaderCategory::Warning => HeaderAccent {
            border: "#dc2626",
            background: "#fef2f2",
        },
    }
}

/// Fallback stroke colors for chart series that carry none.
pub const SERIES_PALETTE: &[&str] = &["#2563eb", "#16a34a", "#ea580c", "#7c3aed", "#0891b2"];

pub fn series_color(color: Option<&str>, index: usize) -> String {
    color
        .map(str::to_string)
        .unwrap_or_else(|| SERIES_PALETTE[index % SERIES_PALETTE.len()].to_string())
}

pub const BASE_THEME: &str = r#"
:root {
    --color-bg-primary: #f8fafc;
    --color-bg-sidebar: #ffffff;
    --color-text-primary: #0f172a;
    --color-text-muted: #64748b;
    --color-border: #e2e8f0;
    --color-accent: #2563eb;
    --color-chat-user-bg: #2563eb;
    --color-chat-user-text: #ffffff;
    --color-chat-bot-bg: #ffffff;
    --color-chat-bot-text: #0f172a;
    --color-toast-ok: #16a34a;
    --color-toast-fail: #dc2626;
}
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg-primary); color: var(--color-text-primary); }
.app { display: flex; height: 100vh; }
.sidebar { width: 280px; border-right: 1px solid var(--color-border); background: var(--color-bg-sidebar); display: flex; flex-direction: column; }
.sidebar-header { padding: 1rem; border-bottom: 1px solid var(--color-border); }
.sidebar-list { flex: 1; overflow-y: auto; padding: 0.5rem; }
.sidebar-empty { color: var(--color-text-muted); padding: 1rem; text-align: center; }
.session-item { display: flex; gap: 0.5rem; padding: 0.6rem; border-radius: 0.5rem; cursor: pointer; }
.session-item.active { background: #eff6ff; }
.session-title { font-weight: 600; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.session-meta { font-size: 0.75rem; color: var(--color-text-muted); }
.session-preview { font-size: 0.8rem; color: var(--color-text-muted); white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.main { flex: 1; display: flex; flex-direction: column; min-width: 0; }
.chat-header { display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 1rem; border-bottom: 1px solid var(--color-border); }
.chat-list { flex: 1; overflow-y: auto; padding: 1rem; display: flex; flex-direction: column; gap: 0.75rem; }
.chat-empty { margin: auto; color: var(--color-text-muted); }
.message-row { display: flex; }
.message-row.user { justify-content: flex-end; }
.bubble { max-width: 75%; padding: 0.75rem 1rem; border-radius: 0.75rem; }
.bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); white-space: pre-wrap; }
.bubble.bot { background: var(--color-chat-bot-bg); color: var(--color-chat-bot-text); border: 1px solid var(--color-border); }
.message-meta { font-size: 0.7rem; color: var(--color-text-muted); margin-top: 0.25rem; display: flex; gap: 0.5rem; }
.md-header { font-weight: 700; padding: 0.4rem 0.6rem; border-left: 4px solid; border-radius: 0.25rem; margin: 0.5rem 0; }
.md-sub-header { font-weight: 600; margin: 0.4rem 0; }
.md-list-item { display: flex; gap: 0.5rem; }
.md-table { border-collapse: collapse; margin: 0.5rem 0; }
.md-table th, .md-table td { border: 1px solid var(--color-border); padding: 0.3rem 0.6rem; }
blockquote { margin: 0.4rem 0; padding-left: 0.75rem; border-left: 3px solid var(--color-border); color: var(--color-text-muted); }
code { background: #f1f5f9; padding: 0 0.25rem; border-radius: 0.25rem; }
.chart { border: 1px solid var(--color-border); border-radius: 0.5rem; padding: 0.75rem; margin: 0.5rem 0; }
.chart-title { font-weight: 600; margin-bottom: 0.5rem; }
.chart-bar-row { display: flex; align-items: center; gap: 0.5rem; font-size: 0.8rem; }
.chart-bar { height: 0.6rem; border-radius: 0.2rem; }
.chart-footer { font-size: 0.7rem; color: var(--color-text-muted); margin-top: 0.5rem; }
.typing { color: var(--color-text-muted); font-style: italic; }
.composer { display: flex; gap: 0.5rem; padding: 0.75rem 1rem; border-top: 1px solid var(--color-border); }
.composer textarea { flex: 1; resize: none; padding: 0.5rem; border: 1px solid var(--color-border); border-radius: 0.5rem; }
.btn { padding: 0.4rem 0.8rem; border: 1px solid var(--color-border); border-radius: 0.5rem; background: #ffffff; cursor: pointer; }
.btn-primary { background: var(--color-accent); color: #ffffff; border-color: var(--color-accent); }
.action-btn { border: none; background: none; color: var(--color-text-muted); cursor: pointer; font-size: 0.7rem; }
.toast { position: fixed; bottom: 1rem; right: 1rem; padding: 0.6rem 1rem; border-radius: 0.5rem; color: #ffffff; }
.toast.ok { background: var(--color-toast-ok); }
.toast.fail { background: var(--color-toast-fail); }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_color_prefers_explicit_color() {
        assert_eq!(series_color(Some("#123456"), 3), "#123456");
        assert_eq!(series_color(None, 0), SERIES_PALETTE[0]);
        assert_eq!(series_color(None, SERIES_PALETTE.len()), SERIES_PALETTE[0]);
    }
}
