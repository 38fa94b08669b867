//! BrowseSession — navigation, pagination, and fetch reconciliation.
//!
//! This is the heart of the browser: it owns the cursor and the pagination
//! state, decides which fetch each transition requires, and reconciles
//! asynchronous results with the position the user is actually looking at.
//! It performs no I/O itself — the app loop spawns the fetches and feeds the
//! results back through [`BrowseSession::commit`] / [`BrowseSession::fail`].

use tracing::debug;

use crate::cursor::{AudioSource, Level};
use crate::folder::{compare_tracks, Folder, ListingPage};
use crate::pagination::{PageSize, PaginationState};

/// Identity of an in-flight fetch, captured at dispatch time. A response is
/// committed only while the live cursor still resolves to the same key;
/// anything else is a stale response and is discarded on arrival (requests
/// are never aborted at the network layer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchKey {
    pub level: Level,
    pub dir_id: Option<String>,
}

impl FetchKey {
    pub fn of(cursor: &AudioSource) -> FetchKey {
        FetchKey {
            level: cursor.level(),
            dir_id: cursor.dir_id().map(str::to_string),
        }
    }
}

/// Navigation state machine plus the data the current position has fetched.
#[derive(Debug)]
pub struct BrowseSession {
    cursor: AudioSource,
    pagination: PaginationState,
    folders: Vec<Folder>,
    cover: Option<String>,
    loading: bool,
}

impl BrowseSession {
    /// Fresh session at the root. `seed` is the Artist-level pagination,
    /// parsed from the persisted location path (or the defaults).
    pub fn new(seed: PaginationState) -> Self {
        Self {
            cursor: AudioSource::default(),
            pagination: seed,
            folders: Vec::new(),
            cover: None,
            loading: false,
        }
    }

    // ── Read side ────────────────────────────────────────────────────────────

    pub fn cursor(&self) -> &AudioSource {
        &self.cursor
    }

    pub fn level(&self) -> Level {
        self.cursor.level()
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn cover(&self) -> Option<&str> {
        self.cover.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// All rows of the current listing (unpaged).
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// The rows on the current page. A page index beyond the listing (the
    /// unclamped-size quirk) yields an empty slice.
    pub fn visible(&self) -> &[Folder] {
        let first = self.pagination.first_row();
        if first >= self.folders.len() {
            return &[];
        }
        let end = (first + self.pagination.size().rows()).min(self.folders.len());
        &self.folders[first..end]
    }

    /// The fetch the current position needs — used for the initial load.
    pub fn current_key(&self) -> FetchKey {
        FetchKey::of(&self.cursor)
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    /// Drill into an artist. Returns the fetch to issue, or `None` when the
    /// transition is invalid at the current level (silent no-op).
    pub fn select_artist(&mut self, folder: Folder) -> Option<FetchKey> {
        let next = self.cursor.select_artist(folder)?;
        Some(self.apply(next))
    }

    /// Drill into an album.
    pub fn select_album(&mut self, folder: Folder) -> Option<FetchKey> {
        let next = self.cursor.select_album(folder)?;
        Some(self.apply(next))
    }

    /// One level up. Returning to the root resets pagination to the defaults
    /// rather than restoring the persisted Artist-level page — the observed
    /// asymmetry, preserved.
    pub fn go_back(&mut self) -> Option<FetchKey> {
        let next = self.cursor.go_back()?;
        Some(self.apply(next))
    }

    /// Replace the cursor and invalidate everything derived from the old one.
    /// The stale list is cleared immediately so rows from the previous level
    /// are never shown under the new headers.
    fn apply(&mut self, next: AudioSource) -> FetchKey {
        self.cursor = next;
        self.folders.clear();
        self.cover = None;
        self.pagination = PaginationState::default();
        self.loading = true;
        FetchKey::of(&self.cursor)
    }

    // ── Pagination ───────────────────────────────────────────────────────────
    //
    // Paging is a client-side window over the fetched listing; moving it
    // never refetches. Each mutator reports whether anything changed so the
    // caller knows when to rewrite the Artist-level location path.

    pub fn next_page(&mut self) -> bool {
        self.pagination.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev_page()
    }

    pub fn first_page(&mut self) -> bool {
        self.pagination.first_page()
    }

    pub fn last_page(&mut self) -> bool {
        self.pagination.last_page()
    }

    pub fn set_page_size(&mut self, size: PageSize) -> bool {
        self.pagination.set_size(size)
    }

    // ── Fetch resolution ─────────────────────────────────────────────────────

    /// Apply a fetch result. Returns false — and leaves all state untouched —
    /// when the response no longer corresponds to the live cursor.
    pub fn commit(&mut self, key: &FetchKey, page: ListingPage) -> bool {
        if *key != self.current_key() {
            debug!(?key, "discarding stale listing");
            return false;
        }
        let mut folders = page.folders;
        if self.cursor.level() == Level::Track {
            folders.sort_by(compare_tracks);
        }
        self.folders = folders;
        self.cover = page.cover;
        self.pagination.set_total(page.total);
        self.loading = false;
        true
    }

    /// Record a fetch failure. The listing stays empty; no retry is issued.
    /// Returns false for stale failures, which are ignored entirely.
    pub fn fail(&mut self, key: &FetchKey) -> bool {
        if *key != self.current_key() {
            debug!(?key, "discarding stale fetch error");
            return false;
        }
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, title: &str) -> Folder {
        Folder {
            id: id.to_string(),
            title: title.to_string(),
            ..Folder::default()
        }
    }

    fn listing(total: usize, ids: &[&str]) -> ListingPage {
        ListingPage {
            total,
            cover: None,
            folders: ids.iter().map(|id| folder(id, id)).collect(),
        }
    }

    #[test]
    fn transitions_clear_the_listing_immediately() {
        let mut session = BrowseSession::new(PaginationState::default());
        let key = session.current_key();
        assert!(session.commit(&key, listing(2, &["a", "b"])));
        assert_eq!(session.folders().len(), 2);

        session.select_artist(folder("a", "Artist A")).unwrap();
        assert!(session.folders().is_empty());
        assert!(session.loading());
    }

    #[test]
    fn stale_response_is_discarded_after_cursor_moves() {
        let mut session = BrowseSession::new(PaginationState::default());
        let root_key = session.current_key();

        // Cursor advances before the root fetch resolves.
        session.select_artist(folder("hill", "Hill, Andrew")).unwrap();
        assert!(!session.commit(&root_key, listing(100, &["x"])));
        assert!(session.folders().is_empty());
        assert!(session.loading());
    }

    #[test]
    fn stale_failure_does_not_clear_the_loading_flag() {
        let mut session = BrowseSession::new(PaginationState::default());
        let root_key = session.current_key();
        session.select_artist(folder("hill", "Hill, Andrew")).unwrap();

        assert!(!session.fail(&root_key));
        assert!(session.loading());

        let live = session.current_key();
        assert!(session.fail(&live));
        assert!(!session.loading());
    }

    #[test]
    fn track_listings_are_sorted_on_commit() {
        let mut session = BrowseSession::new(PaginationState::default());
        session.select_artist(folder("hill", "Hill, Andrew")).unwrap();
        let key = session.select_album(folder("alb", "[1964] Solid")).unwrap();

        let page = ListingPage {
            total: 3,
            cover: None,
            folders: vec![
                Folder {
                    id: "t3".into(),
                    title: "Three".into(),
                    album: Some("Solid".into()),
                    track: Some(3),
                    ..Folder::default()
                },
                Folder {
                    id: "t1".into(),
                    title: "One".into(),
                    album: Some("Solid".into()),
                    track: Some(1),
                    ..Folder::default()
                },
                Folder {
                    id: "t2".into(),
                    title: "Two".into(),
                    album: Some("Solid".into()),
                    disc: None,
                    track: Some(2),
                    ..Folder::default()
                },
            ],
        };
        assert!(session.commit(&key, page));
        let ids: Vec<&str> = session.folders().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2", "t3"]);
    }

    #[test]
    fn artist_listings_keep_server_order() {
        let mut session = BrowseSession::new(PaginationState::default());
        let key = session.current_key();
        assert!(session.commit(&key, listing(2, &["z", "a"])));
        let ids: Vec<&str> = session.folders().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["z", "a"]);
    }

    #[test]
    fn seeded_pagination_applies_only_until_first_transition() {
        let mut session = BrowseSession::new(PaginationState::seeded(3, PageSize::Fifty));
        assert_eq!(session.pagination().page(), 3);
        assert_eq!(session.pagination().size(), PageSize::Fifty);

        session.select_artist(folder("hill", "Hill, Andrew")).unwrap();
        assert_eq!(session.pagination().page(), 1);
        assert_eq!(session.pagination().size(), PageSize::TwentyFive);

        // Going back resets to the defaults, not to the seeded page.
        session.go_back().unwrap();
        assert_eq!(session.pagination().page(), 1);
        assert_eq!(session.pagination().size(), PageSize::TwentyFive);
    }

    #[test]
    fn visible_window_follows_the_page() {
        let mut session = BrowseSession::new(PaginationState::default());
        let key = session.current_key();
        let ids: Vec<String> = (0..30).map(|i| format!("f{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        assert!(session.commit(&key, listing(30, &refs)));

        assert_eq!(session.visible().len(), 25);
        assert!(session.next_page());
        assert_eq!(session.visible().len(), 5);
        assert_eq!(session.visible()[0].id, "f25");
    }

    #[test]
    fn out_of_range_page_shows_an_empty_window() {
        let mut session = BrowseSession::new(PaginationState::seeded(4, PageSize::Hundred));
        let key = session.current_key();
        assert!(session.commit(&key, listing(3, &["a", "b", "c"])));
        assert!(session.visible().is_empty());
    }
}
