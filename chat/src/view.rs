use momentum_core::escape_html;

/// Severity of a locally rendered system notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "text-gray-500",
            Self::Warning => "text-yellow-600",
            Self::Error => "text-red-600",
        }
    }
}

/// Rendering surface the chat session drives.
///
/// All text handed to a view is plain text. Implementations that build
/// markup must escape it.
pub trait ChatView {
    /// Handle to an in-progress assistant message.
    type Placeholder;

    fn append_user_message(&mut self, text: &str);

    /// Creates an empty assistant message that chunks will be appended to.
    fn open_assistant_message(&mut self) -> Self::Placeholder;

    fn append_chunk(&mut self, placeholder: &mut Self::Placeholder, chunk: &str);

    /// Called when the session releases a placeholder.
    fn finish_assistant_message(&mut self, _placeholder: Self::Placeholder) {}

    fn show_typing(&mut self);

    fn hide_typing(&mut self);

    fn append_notice(&mut self, level: NoticeLevel, text: &str);

    /// Replaces the whole transcript with the assistant greeting.
    fn reset(&mut self, greeting: &str);

    fn scroll_to_bottom(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    User,
    Assistant,
    Notice(NoticeLevel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub text: String,
}

/// In-memory transcript, renderable as escaped HTML.
#[derive(Debug, Clone, Default)]
pub struct TranscriptView {
    entries: Vec<TranscriptEntry>,
    typing_visible: bool,
    open_placeholders: usize,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_typing_visible(&self) -> bool {
        self.typing_visible
    }

    /// Number of assistant placeholders created and not yet released.
    pub fn open_placeholders(&self) -> usize {
        self.open_placeholders
    }

    /// Text of the entries of the given kind, in order.
    pub fn texts(&self, kind: EntryKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.text.as_str())
            .collect()
    }

    /// Renders the transcript as markup. Every piece of text is escaped.
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        for entry in &self.entries {
            let text = escape_html(&entry.text);
            match entry.kind {
                EntryKind::User => {
                    html.push_str(&format!(
                        "<div class=\"chat-message user\"><p class=\"text-sm\">{}</p></div>\n",
                        text
                    ));
                }
                EntryKind::Assistant => {
                    html.push_str(&format!(
                        "<div class=\"chat-message assistant\"><p class=\"text-sm\">{}</p></div>\n",
                        text
                    ));
                }
                EntryKind::Notice(level) => {
                    html.push_str(&format!(
                        "<div class=\"text-center my-2\"><p class=\"text-xs {}\">{}</p></div>\n",
                        level.css_class(),
                        text
                    ));
                }
            }
        }
        if self.typing_visible {
            html.push_str("<div id=\"typing-indicator\" class=\"chat-message assistant\"></div>\n");
        }
        html
    }

    fn push(&mut self, kind: EntryKind, text: &str) {
        self.entries.push(TranscriptEntry {
            kind,
            text: text.to_string(),
        });
    }
}

impl ChatView for TranscriptView {
    /// Index of the assistant entry in the transcript
    type Placeholder = usize;

    fn append_user_message(&mut self, text: &str) {
        self.push(EntryKind::User, text);
    }

    fn open_assistant_message(&mut self) -> usize {
        self.push(EntryKind::Assistant, "");
        self.open_placeholders += 1;
        self.entries.len() - 1
    }

    fn append_chunk(&mut self, placeholder: &mut usize, chunk: &str) {
        if let Some(entry) = self.entries.get_mut(*placeholder) {
            entry.text.push_str(chunk);
        }
    }

    fn finish_assistant_message(&mut self, _placeholder: usize) {
        self.open_placeholders = self.open_placeholders.saturating_sub(1);
    }

    fn show_typing(&mut self) {
        self.typing_visible = true;
    }

    fn hide_typing(&mut self) {
        self.typing_visible = false;
    }

    fn append_notice(&mut self, level: NoticeLevel, text: &str) {
        self.push(EntryKind::Notice(level), text);
    }

    fn reset(&mut self, greeting: &str) {
        self.entries.clear();
        self.typing_visible = false;
        self.open_placeholders = 0;
        self.push(EntryKind::Assistant, greeting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_escapes_every_entry() {
        let mut view = TranscriptView::new();
        view.append_user_message("<b>hi</b>");
        let mut placeholder = view.open_assistant_message();
        view.append_chunk(&mut placeholder, "<img src=x onerror=alert(1)>");
        view.append_notice(NoticeLevel::Error, "\"quoted\" & more");

        let html = view.render_html();
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("&quot;quoted&quot; &amp; more"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("text-red-600"));
    }

    #[test]
    fn test_reset_leaves_only_greeting() {
        let mut view = TranscriptView::new();
        view.append_user_message("hello");
        view.show_typing();
        view.reset("Hi there");

        assert_eq!(
            view.entries(),
            &[TranscriptEntry {
                kind: EntryKind::Assistant,
                text: "Hi there".to_string()
            }]
        );
        assert!(!view.is_typing_visible());
    }
}
