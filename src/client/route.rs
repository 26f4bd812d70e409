use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fmt;

pub const CONVERSATIONS_PATH: &str = "/conversations";
const CONVERSATION_PREFIX: &str = "/conversations/";

/// Everything `encodeURIComponent` escapes.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Extracts the conversation id from a location such as
/// `/conversations/abc?tab=media`.
///
/// The query string and trailing slashes are ignored. Returns `None` when the
/// path is outside `/conversations/`, the id segment is empty, or it does not
/// decode to UTF-8.
#[must_use]
pub fn conversation_id_from_path(url: &str) -> Option<String> {
    let path = url.split('?').next().unwrap_or_default().trim_end_matches('/');
    let rest = path.strip_prefix(CONVERSATION_PREFIX)?;
    let segment = rest.split('/').next().unwrap_or_default();

    let id = percent_decode_str(segment).decode_utf8().ok()?;
    if id.is_empty() { None } else { Some(id.into_owned()) }
}

#[must_use]
pub fn conversation_path(conversation_id: Option<&str>) -> String {
    match conversation_id {
        Some(id) => format!("{CONVERSATION_PREFIX}{}", utf8_percent_encode(id, PATH_SEGMENT)),
        None => CONVERSATIONS_PATH.to_string(),
    }
}

/// The browser's session history as seen by the conversation view.
pub trait History: Send {
    fn current(&self) -> &str;

    /// Adds an entry after the current one, dropping any forward entries.
    fn push(&mut self, path: String);

    /// Moves to the previous entry. Returns false at the start of history.
    fn back(&mut self) -> bool;

    /// Moves to the next entry. Returns false at the end of history.
    fn forward(&mut self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self { entries: vec![initial.into()], index: 0 }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(CONVERSATIONS_PATH)
    }
}

impl History for MemoryHistory {
    fn current(&self) -> &str {
        self.entries.get(self.index).map_or(CONVERSATIONS_PATH, String::as_str)
    }

    fn push(&mut self, path: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path);
        self.index = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

/// Keeps the selected conversation and the history location in step.
pub struct RouteSync {
    history: Box<dyn History>,
    selected: Option<String>,
}

impl fmt::Debug for RouteSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSync")
            .field("current", &self.history.current())
            .field("selected", &self.selected)
            .finish()
    }
}

impl RouteSync {
    #[must_use]
    pub fn new(history: Box<dyn History>) -> Self {
        let selected = conversation_id_from_path(history.current());
        Self { history, selected }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn current_path(&self) -> &str {
        self.history.current()
    }

    /// Selects `conversation_id` and pushes its path.
    pub fn select(&mut self, conversation_id: &str) {
        self.selected = Some(conversation_id.to_string());
        self.history.push(conversation_path(Some(conversation_id)));
    }

    pub fn go_back(&mut self) -> bool {
        let moved = self.history.back();
        self.sync_from_history();
        moved
    }

    pub fn go_forward(&mut self) -> bool {
        let moved = self.history.forward();
        self.sync_from_history();
        moved
    }

    /// Re-reads the selection from the current location (pop-state).
    pub fn sync_from_history(&mut self) {
        self.selected = conversation_id_from_path(self.history.current());
    }
}
