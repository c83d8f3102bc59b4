//! Append-only journey journal.
//!
//! The journal is the player-facing record of what happened: challenge
//! results, threat events, companions arriving and leaving. It is
//! fire-and-forget - nothing in the engine ever reads it back to make a
//! decision. Internal diagnostics go through `tracing` instead.

use std::cell::RefCell;
use std::rc::Rc;

use im::Vector;
use serde::{Deserialize, Serialize};

/// Broad category for a journal entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogCategory {
    System,
    Season,
    Journey,
    Challenge,
    Threat,
    Companion,
    Resource,
}

/// A single journal line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub message: String,
    pub category: LogCategory,
    /// Marks entries the presentation layer should call out.
    pub highlight: bool,
    pub details: Option<String>,
}

impl JournalEntry {
    /// Create a plain entry.
    pub fn new(message: impl Into<String>, category: LogCategory) -> Self {
        Self {
            message: message.into(),
            category,
            highlight: false,
            details: None,
        }
    }

    /// Mark this entry as a highlight.
    #[must_use]
    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }

    /// Attach free-form details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Append-only log sink.
pub trait Journal {
    /// Record one entry. Never inspected for control flow.
    fn record(&mut self, entry: JournalEntry);
}

/// Journal that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullJournal;

impl Journal for NullJournal {
    fn record(&mut self, _entry: JournalEntry) {}
}

/// In-memory journal with a shareable buffer.
///
/// Clones share the same underlying buffer, so a test can keep a handle
/// while the controller owns another. The engine is single-threaded by
/// design, so `Rc<RefCell<_>>` suffices.
#[derive(Clone, Debug, Default)]
pub struct MemoryJournal {
    entries: Rc<RefCell<Vector<JournalEntry>>>,
}

impl MemoryJournal {
    /// Create an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vector<JournalEntry> {
        self.entries.borrow().clone()
    }

    /// Number of entries recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if any entry's message contains the given fragment.
    #[must_use]
    pub fn contains_message(&self, fragment: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.message.contains(fragment))
    }
}

impl Journal for MemoryJournal {
    fn record(&mut self, entry: JournalEntry) {
        self.entries.borrow_mut().push_back(entry);
    }
}
