//! Editing session for one document
//!
//! [`EditorSession`] owns the live buffer and selection of an open document and
//! is the only caller of the transform engine and the history. Every mutation
//! snapshots the pre-edit state first, so undo always returns to exactly what
//! the user saw before the change.
//!
//! Persistence is pull-based: the host polls [`EditorSession::autosave_due`]
//! and calls [`EditorSession::save`] when it returns true.
//!
//! # Example
//!
//! ```ignore
//! use quill_core::{EditorConfig, EditorSession, MarkdownAction, SelectionRange};
//!
//! let mut session = EditorSession::detached("hello", EditorConfig::default());
//! session.set_selection(SelectionRange::new(0, 5));
//! session.dispatch(MarkdownAction::Bold.into());
//! assert_eq!(session.buffer(), "**hello**");
//!
//! session.undo();
//! assert_eq!(session.buffer(), "hello");
//! ```

use crate::action::ToolbarAction;
use crate::config::EditorConfig;
use crate::engine;
use crate::error::{QuillError, Result};
use crate::export::{export_document, ExportArtifact, ExportFormat, PdfRenderer};
use crate::history::{History, HistoryEntry};
use crate::selection::SelectionRange;
use crate::store::DocumentStore;
use chrono::{DateTime, Duration, Utc};
use quill_domain::{validate_title, DocumentRecord, DocumentStats, UpdateDocumentInput};

/// Live editing state for one open document.
#[derive(Debug, Clone)]
pub struct EditorSession {
    /// Backing document, `None` for scratch buffers
    document_id: Option<String>,
    title: String,
    buffer: String,
    selection: SelectionRange,
    history: History,
    config: EditorConfig,
    dirty: bool,
    last_edit: Option<DateTime<Utc>>,
}

impl EditorSession {
    /// Open a stored document: caret at the start, empty history, clean.
    pub fn open(record: &DocumentRecord, config: EditorConfig) -> Self {
        tracing::debug!("Opening document {}", record.id);
        let mut session = Self::detached(record.content.clone(), config);
        session.document_id = Some(record.id.clone());
        session.title = record.title.clone();
        session
    }

    /// A session over a buffer with no backing document. Saving fails with
    /// [`QuillError::Detached`].
    pub fn detached(content: impl Into<String>, config: EditorConfig) -> Self {
        let history = match config.history.capacity {
            Some(capacity) => History::with_capacity(capacity),
            None => History::new(),
        };
        Self {
            document_id: None,
            title: String::new(),
            buffer: content.into(),
            selection: SelectionRange::caret(0),
            history,
            config,
            dirty: false,
            last_edit: None,
        }
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// When the buffer last changed, if it has changed since opening or saving.
    pub fn last_edit(&self) -> Option<DateTime<Utc>> {
        self.last_edit
    }

    /// Replace the buffer with what the user typed.
    ///
    /// Returns false, and records nothing, when the buffer is unchanged.
    pub fn input(&mut self, new_buffer: impl Into<String>, new_selection: SelectionRange) -> bool {
        let new_buffer = new_buffer.into();
        if new_buffer == self.buffer {
            self.set_selection(new_selection);
            return false;
        }

        self.history.record_before_edit(&self.buffer, self.selection);
        self.selection = new_selection.clamp_to(&new_buffer);
        self.buffer = new_buffer;
        self.touch();
        true
    }

    /// Move the caret or selection. Not an edit.
    pub fn set_selection(&mut self, selection: SelectionRange) {
        self.selection = selection.clamp_to(&self.buffer);
    }

    /// Run a toolbar action. Returns whether the buffer or selection changed.
    pub fn dispatch(&mut self, action: ToolbarAction) -> bool {
        match action {
            ToolbarAction::Undo => self.undo(),
            ToolbarAction::Redo => self.redo(),
            ToolbarAction::Format(action) => {
                self.history.record_before_edit(&self.buffer, self.selection);
                let result = engine::apply(action, &self.buffer, self.selection);
                let changed = result.buffer != self.buffer || result.selection != self.selection;
                tracing::debug!("Applied {} at {:?}", action, self.selection);
                self.buffer = result.buffer;
                self.selection = result.selection;
                self.touch();
                changed
            }
        }
    }

    /// Run a toolbar action by identifier. Unknown identifiers are an error.
    pub fn dispatch_named(&mut self, action: &str) -> Result<bool> {
        let action = action.parse::<ToolbarAction>()?;
        Ok(self.dispatch(action))
    }

    /// Step back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.buffer, self.selection) {
            Some(entry) => {
                tracing::debug!("Undo (remaining: {})", self.history.undo_depth());
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.buffer, self.selection) {
            Some(entry) => {
                tracing::debug!("Redo (remaining: {})", self.history.redo_depth());
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    /// Whether an autosave should run at `now`.
    pub fn autosave_due(&self, now: DateTime<Utc>) -> bool {
        if !self.dirty || !self.config.autosave.enabled {
            return false;
        }
        // Delays too large for chrono never come due
        let Some(delay) = i64::try_from(self.config.autosave.delay_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
        else {
            return false;
        };
        match self.last_edit {
            Some(last_edit) => now.signed_duration_since(last_edit) >= delay,
            None => true,
        }
    }

    /// Write the buffer back to the store and mark the session clean.
    ///
    /// History is untouched, so undo keeps working across saves.
    pub fn save(&mut self, store: &dyn DocumentStore) -> Result<DocumentRecord> {
        let id = self.document_id.as_deref().ok_or(QuillError::Detached)?;
        let record = store.update(id, UpdateDocumentInput::content(self.buffer.clone()))?;
        self.dirty = false;
        self.last_edit = None;
        tracing::debug!("Saved document {}", record.id);
        Ok(record)
    }

    /// Rename the backing document.
    pub fn rename(&mut self, store: &dyn DocumentStore, title: &str) -> Result<DocumentRecord> {
        let id = self.document_id.as_deref().ok_or(QuillError::Detached)?;
        validate_title(title)?;
        let record = store.update(id, UpdateDocumentInput::title(title))?;
        self.title = record.title.clone();
        Ok(record)
    }

    /// Statistics for the live buffer.
    pub fn stats(&self) -> DocumentStats {
        DocumentStats::compute(&self.buffer, self.config.stats.words_per_minute)
    }

    /// Export the live buffer under the session title.
    pub fn export(
        &self,
        format: ExportFormat,
        renderer: Option<&dyn PdfRenderer>,
    ) -> Result<ExportArtifact> {
        Ok(export_document(format, &self.title, &self.buffer, renderer)?)
    }

    fn restore(&mut self, entry: HistoryEntry) {
        self.buffer = entry.buffer;
        self.selection = entry.selection;
        self.touch();
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.last_edit = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MarkdownAction;
    use crate::store::InMemoryDocumentStore;
    use quill_domain::CreateDocumentInput;

    fn session(content: &str) -> EditorSession {
        EditorSession::detached(content, EditorConfig::default())
    }

    #[test]
    fn test_open_starts_clean() {
        let record = DocumentRecord::new("d1", "alice", "Notes", "# Notes", Utc::now());
        let session = EditorSession::open(&record, EditorConfig::default());

        assert_eq!(session.document_id(), Some("d1"));
        assert_eq!(session.title(), "Notes");
        assert_eq!(session.buffer(), "# Notes");
        assert_eq!(session.selection(), SelectionRange::caret(0));
        assert!(!session.is_dirty());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_dispatch_bold_then_undo() {
        let mut s = session("hello world");
        s.set_selection(SelectionRange::new(0, 5));

        assert!(s.dispatch(MarkdownAction::Bold.into()));
        assert_eq!(s.buffer(), "**hello** world");
        assert_eq!(s.selection(), SelectionRange::new(2, 7));
        assert!(s.is_dirty());

        assert!(s.dispatch(ToolbarAction::Undo));
        assert_eq!(s.buffer(), "hello world");
        assert_eq!(s.selection(), SelectionRange::new(0, 5));

        assert!(s.dispatch(ToolbarAction::Redo));
        assert_eq!(s.buffer(), "**hello** world");
        assert_eq!(s.selection(), SelectionRange::new(2, 7));
    }

    #[test]
    fn test_typing_then_undo() {
        let mut s = session("");
        s.input("a", SelectionRange::caret(1));
        s.input("ab", SelectionRange::caret(2));

        assert!(s.undo());
        assert_eq!(s.buffer(), "a");
        assert!(s.undo());
        assert_eq!(s.buffer(), "");
        assert!(!s.undo());
    }

    #[test]
    fn test_input_without_change_records_nothing() {
        let mut s = session("same");
        assert!(!s.input("same", SelectionRange::caret(2)));
        assert_eq!(s.selection(), SelectionRange::caret(2));
        assert!(!s.history().can_undo());
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_edit_after_undo_drops_redo() {
        let mut s = session("x");
        s.input("xy", SelectionRange::caret(2));
        s.undo();
        assert!(s.history().can_redo());

        s.input("xz", SelectionRange::caret(2));
        assert!(!s.redo());
        assert_eq!(s.buffer(), "xz");
    }

    #[test]
    fn test_set_selection_is_not_an_edit() {
        let mut s = session("hello");
        s.set_selection(SelectionRange::new(1, 3));
        assert!(!s.history().can_undo());
        assert!(!s.is_dirty());

        s.set_selection(SelectionRange::new(2, 99));
        assert_eq!(s.selection(), SelectionRange::new(2, 5));
    }

    #[test]
    fn test_undo_marks_dirty() {
        let store = InMemoryDocumentStore::new("alice");
        let record = store.create(CreateDocumentInput::new("Doc")).unwrap();
        let mut s = EditorSession::open(&record, EditorConfig::default());

        s.input("text", SelectionRange::caret(4));
        s.save(&store).unwrap();
        assert!(!s.is_dirty());

        s.undo();
        assert!(s.is_dirty());
        assert_eq!(s.buffer(), "");
    }

    #[test]
    fn test_dispatch_named() {
        let mut s = session("item");
        s.set_selection(SelectionRange::new(0, 4));
        assert!(s.dispatch_named("ul").unwrap());
        assert_eq!(s.buffer(), "- item");

        let err = s.dispatch_named("blink").unwrap_err();
        assert!(matches!(err, QuillError::UnknownAction(_)));
        assert_eq!(s.buffer(), "- item");
    }

    #[test]
    fn test_history_capacity_from_config() {
        let mut config = EditorConfig::default();
        config.history.capacity = Some(2);
        let mut s = EditorSession::detached("", config);
        for text in ["a", "ab", "abc"] {
            s.input(text, SelectionRange::caret(text.len()));
        }

        assert!(s.undo());
        assert!(s.undo());
        assert!(!s.undo());
        assert_eq!(s.buffer(), "a");
    }

    #[test]
    fn test_zero_history_capacity_still_undoes() {
        let mut config = EditorConfig::default();
        config.history.capacity = Some(0);
        let mut s = EditorSession::detached("", config);
        assert_eq!(s.history().capacity(), Some(1));

        s.input("a", SelectionRange::caret(1));
        s.input("ab", SelectionRange::caret(2));
        assert!(s.undo());
        assert_eq!(s.buffer(), "a");
        assert!(!s.undo());
    }

    #[test]
    fn test_autosave_due() {
        let mut s = session("");
        assert!(!s.autosave_due(Utc::now()));

        s.input("a", SelectionRange::caret(1));
        let edited = s.last_edit().unwrap();
        assert!(!s.autosave_due(edited + Duration::milliseconds(2999)));
        assert!(s.autosave_due(edited + Duration::milliseconds(3000)));

        let mut config = EditorConfig::default();
        config.autosave.enabled = false;
        let mut s = EditorSession::detached("", config);
        s.input("a", SelectionRange::caret(1));
        assert!(!s.autosave_due(Utc::now() + Duration::hours(1)));

        let mut config = EditorConfig::default();
        config.autosave.delay_ms = u64::MAX;
        let mut s = EditorSession::detached("", config);
        s.input("a", SelectionRange::caret(1));
        assert!(!s.autosave_due(Utc::now() + Duration::days(365)));
    }

    #[test]
    fn test_save_detached_fails() {
        let store = InMemoryDocumentStore::new("alice");
        let mut s = session("");
        s.input("a", SelectionRange::caret(1));
        assert!(matches!(s.save(&store), Err(QuillError::Detached)));
        assert!(s.is_dirty());
    }

    #[test]
    fn test_save_keeps_history() {
        let store = InMemoryDocumentStore::new("alice");
        let record = store.create(CreateDocumentInput::new("Doc")).unwrap();
        let mut s = EditorSession::open(&record, EditorConfig::default());

        s.input("draft", SelectionRange::caret(5));
        let saved = s.save(&store).unwrap();
        assert_eq!(saved.content, "draft");
        assert_eq!(store.get(&record.id).unwrap().content, "draft");
        assert!(s.history().can_undo());
        assert!(s.last_edit().is_none());
    }

    #[test]
    fn test_rename() {
        let store = InMemoryDocumentStore::new("alice");
        let record = store.create(CreateDocumentInput::new("Old")).unwrap();
        let mut s = EditorSession::open(&record, EditorConfig::default());

        s.rename(&store, "New").unwrap();
        assert_eq!(s.title(), "New");
        assert_eq!(store.get(&record.id).unwrap().title, "New");

        assert!(matches!(s.rename(&store, ""), Err(QuillError::Validation(_))));
        assert_eq!(s.title(), "New");
    }

    #[test]
    fn test_stats_use_configured_speed() {
        let mut config = EditorConfig::default();
        config.stats.words_per_minute = 2;
        let s = EditorSession::detached("one two three", config);
        let stats = s.stats();
        assert_eq!(stats.words, 3);
        assert_eq!(stats.reading_minutes, 2);
    }

    #[test]
    fn test_export_uses_title() {
        let record = DocumentRecord::new("d1", "alice", "Notes", "body", Utc::now());
        let s = EditorSession::open(&record, EditorConfig::default());
        let artifact = s.export(ExportFormat::Markdown, None).unwrap();
        assert_eq!(artifact.file_name, "Notes.md");
        assert_eq!(artifact.bytes, b"body");

        assert!(matches!(
            s.export(ExportFormat::Pdf, None),
            Err(QuillError::Export(_))
        ));
    }
}
