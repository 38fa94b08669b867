//! AudioSource — the navigation cursor over the artist/album/track hierarchy.
//!
//! Exactly one cursor exists at a time and it is the single source of truth
//! for "where am I". Transitions build a fresh value; the cursor is replaced
//! wholesale, never mutated in place, so a fetch always observes a consistent
//! snapshot.

use crate::folder::Folder;

/// Hierarchy depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Artist,
    Album,
    Track,
}

/// The navigation position. The variants make the level invariants
/// unrepresentable: an album can only be selected under an artist, and the
/// track level always carries both ancestors.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AudioSource {
    /// Root — no selection.
    #[default]
    Artist,
    /// One artist selected; its albums are listed.
    Album { artist: Folder },
    /// Artist and album selected; tracks are listed. Terminal for forward
    /// navigation — tracks are leaves, not drill-down targets.
    Track { artist: Folder, album: Folder },
}

impl AudioSource {
    pub fn level(&self) -> Level {
        match self {
            AudioSource::Artist => Level::Artist,
            AudioSource::Album { .. } => Level::Album,
            AudioSource::Track { .. } => Level::Track,
        }
    }

    pub fn artist(&self) -> Option<&Folder> {
        match self {
            AudioSource::Artist => None,
            AudioSource::Album { artist } | AudioSource::Track { artist, .. } => Some(artist),
        }
    }

    pub fn album(&self) -> Option<&Folder> {
        match self {
            AudioSource::Track { album, .. } => Some(album),
            _ => None,
        }
    }

    /// Drill into an artist. Valid only at the root; elsewhere returns `None`
    /// and the caller treats the click as a no-op.
    pub fn select_artist(&self, folder: Folder) -> Option<AudioSource> {
        match self {
            AudioSource::Artist => Some(AudioSource::Album { artist: folder }),
            _ => None,
        }
    }

    /// Drill into an album. Valid only at the album level.
    pub fn select_album(&self, folder: Folder) -> Option<AudioSource> {
        match self {
            AudioSource::Album { artist } => Some(AudioSource::Track {
                artist: artist.clone(),
                album: folder,
            }),
            _ => None,
        }
    }

    /// One step up. Track drops only the album; Album drops everything.
    /// The root has no parent, so `go_back` there is a no-op.
    pub fn go_back(&self) -> Option<AudioSource> {
        match self {
            AudioSource::Artist => None,
            AudioSource::Album { .. } => Some(AudioSource::Artist),
            AudioSource::Track { artist, .. } => Some(AudioSource::Album {
                artist: artist.clone(),
            }),
        }
    }

    /// The `dirId` the data source needs for this position: none at the root,
    /// the artist id at the album level, the album id at the track level.
    pub fn dir_id(&self) -> Option<&str> {
        match self {
            AudioSource::Artist => None,
            AudioSource::Album { artist } => Some(artist.id.as_str()),
            AudioSource::Track { album, .. } => Some(album.id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str) -> Folder {
        Folder {
            id: id.to_string(),
            title: format!("folder {id}"),
            ..Folder::default()
        }
    }

    #[test]
    fn level_invariants_hold_across_transitions() {
        let root = AudioSource::default();
        assert_eq!(root.level(), Level::Artist);
        assert!(root.artist().is_none() && root.album().is_none());

        let album = root.select_artist(folder("hill")).unwrap();
        assert_eq!(album.level(), Level::Album);
        assert!(album.artist().is_some() && album.album().is_none());

        let track = album.select_album(folder("departure")).unwrap();
        assert_eq!(track.level(), Level::Track);
        assert!(track.artist().is_some() && track.album().is_some());
    }

    #[test]
    fn invalid_forward_transitions_are_rejected() {
        let root = AudioSource::default();
        assert!(root.select_album(folder("x")).is_none());

        let album = root.select_artist(folder("a")).unwrap();
        assert!(album.select_artist(folder("b")).is_none());

        let track = album.select_album(folder("c")).unwrap();
        assert!(track.select_artist(folder("d")).is_none());
        assert!(track.select_album(folder("e")).is_none());
    }

    #[test]
    fn go_back_walks_track_album_artist() {
        let track = AudioSource::default()
            .select_artist(folder("hill"))
            .unwrap()
            .select_album(folder("solid"))
            .unwrap();

        let album = track.go_back().unwrap();
        assert_eq!(album.level(), Level::Album);
        assert_eq!(album.artist().unwrap().id, "hill");
        assert!(album.album().is_none());

        let root = album.go_back().unwrap();
        assert_eq!(root, AudioSource::Artist);
        assert!(root.go_back().is_none());
    }

    #[test]
    fn dir_id_follows_the_selection() {
        let root = AudioSource::default();
        assert_eq!(root.dir_id(), None);

        let album = root.select_artist(folder("hill")).unwrap();
        assert_eq!(album.dir_id(), Some("hill"));

        let track = album.select_album(folder("solid")).unwrap();
        assert_eq!(track.dir_id(), Some("solid"));
    }
}
