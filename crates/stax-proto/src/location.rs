//! Session location — the persisted `/artist/<page>/<rows>` path.
//!
//! The browser address bar of the web incarnation survives here as a small
//! session file: read once at startup to seed the Artist-level pagination,
//! rewritten (replace semantics, no history) whenever page or size changes at
//! that level. Album/Track levels never touch it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::pagination::{PageSize, PaginationState};

/// Parse an artist-level path. Absent or malformed segments fall back to the
/// defaults (page 1, 25 rows) segment by segment; a path that is not under
/// `/artist` defaults entirely.
pub fn parse_artist_path(path: &str) -> (usize, PageSize) {
    let mut parts = path.trim_start_matches('/').split('/');
    if parts.next() != Some("artist") {
        return (1, PageSize::default());
    }
    let page = parts
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1);
    let size = parts
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .and_then(PageSize::from_rows)
        .unwrap_or_default();
    (page, size)
}

/// Format an artist-level path for the given page and size.
pub fn format_artist_path(page: usize, size: PageSize) -> String {
    format!("/artist/{}/{}", page, size.rows())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredLocation {
    location: String,
}

/// File-backed location path. Load failures (first run, unreadable file,
/// malformed JSON) degrade to the default path silently; write failures are
/// logged and otherwise ignored — the session keeps working in memory.
#[derive(Debug)]
pub struct SessionLocation {
    file: PathBuf,
    current: String,
}

impl SessionLocation {
    /// Read the persisted path once, at mount.
    pub fn load(file: PathBuf) -> Self {
        let current = std::fs::read_to_string(&file)
            .ok()
            .and_then(|s| serde_json::from_str::<StoredLocation>(&s).ok())
            .map(|s| s.location)
            .unwrap_or_default();
        Self { file, current }
    }

    pub fn path(&self) -> &str {
        &self.current
    }

    /// Artist-level pagination seeded from the stored path.
    pub fn seed_pagination(&self) -> PaginationState {
        let (page, size) = parse_artist_path(&self.current);
        PaginationState::seeded(page, size)
    }

    /// Rewrite the path for a page/size change at the Artist level. The file
    /// is overwritten in place — no history accumulates.
    pub fn replace(&mut self, page: usize, size: PageSize) {
        self.current = format_artist_path(page, size);
        if let Some(parent) = self.file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let stored = StoredLocation {
            location: self.current.clone(),
        };
        match serde_json::to_string(&stored) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.file, json) {
                    warn!("failed to persist location {}: {}", self.current, e);
                }
            }
            Err(e) => warn!("failed to encode location: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_path_round_trips() {
        let path = format_artist_path(3, PageSize::Fifty);
        assert_eq!(path, "/artist/3/50");
        assert_eq!(parse_artist_path(&path), (3, PageSize::Fifty));
    }

    #[test]
    fn malformed_segments_default_individually() {
        assert_eq!(parse_artist_path("/artist/7"), (7, PageSize::TwentyFive));
        assert_eq!(parse_artist_path("/artist/0/50"), (1, PageSize::Fifty));
        assert_eq!(parse_artist_path("/artist/x/33"), (1, PageSize::TwentyFive));
        assert_eq!(parse_artist_path("/artist"), (1, PageSize::TwentyFive));
    }

    #[test]
    fn enormous_persisted_page_is_safe_to_seed() {
        let (page, size) = parse_artist_path("/artist/18446744073709551615/50");
        assert_eq!(page, usize::MAX);
        assert_eq!(size, PageSize::Fifty);
        assert_eq!(PaginationState::seeded(page, size).first_row(), usize::MAX);
    }

    #[test]
    fn foreign_paths_default_entirely() {
        assert_eq!(parse_artist_path(""), (1, PageSize::TwentyFive));
        assert_eq!(parse_artist_path("/album/3/50"), (1, PageSize::TwentyFive));
    }

    #[test]
    fn replace_persists_and_reload_seeds_pagination() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("session.json");

        let mut location = SessionLocation::load(file.clone());
        assert_eq!(location.path(), "");
        location.replace(3, PageSize::Fifty);
        assert_eq!(location.path(), "/artist/3/50");

        let reloaded = SessionLocation::load(file);
        let seeded = reloaded.seed_pagination();
        assert_eq!(seeded.page(), 3);
        assert_eq!(seeded.size(), PageSize::Fifty);
    }

    #[test]
    fn missing_file_seeds_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let location = SessionLocation::load(dir.path().join("absent.json"));
        let seeded = location.seed_pagination();
        assert_eq!(seeded.page(), 1);
        assert_eq!(seeded.size(), PageSize::TwentyFive);
    }
}
