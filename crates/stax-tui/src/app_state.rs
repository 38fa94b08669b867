//! AppState — shared read-only data passed to all components.
//!
//! Components read this during render/event handling; only the App
//! event-loop writes to it.

use stax_proto::browse::BrowseSession;

pub struct AppState {
    /// Cursor, pagination, and the current listing.
    pub session: BrowseSession,
    /// Session token display string. An auth failure lands its error text
    /// here too — auth is display-only and never blocks listing fetches.
    pub sid: String,
}

impl AppState {
    pub fn new(session: BrowseSession) -> Self {
        Self {
            session,
            sid: String::new(),
        }
    }
}
