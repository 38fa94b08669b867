//! Action enum — all user-initiated intents and internal events.

use stax_proto::folder::Folder;
use stax_proto::letters::Bucket;
use stax_proto::pagination::PageSize;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    LetterBar,
    Browser,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    /// Drill into the given row (artist or album; tracks are leaves).
    Open(Folder),
    /// One hierarchy level up.
    Back,
    SelectUp(usize),
    SelectDown(usize),
    SelectFirst,
    SelectLast,

    // ── Pagination ───────────────────────────────────────────────────────────
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CyclePageSize,
    SetPageSize(PageSize),

    // ── Letter index ─────────────────────────────────────────────────────────
    /// Narrow the artist page to one bucket; `None` clears the filter.
    SetBucket(Option<Bucket>),

    // ── UI ───────────────────────────────────────────────────────────────────
    FocusNext,
    FocusPane(ComponentId),
    Quit,
}
