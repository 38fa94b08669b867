//! Folder model — the single node type of the artist/album/track hierarchy.

use std::cmp::Ordering;

use serde::Deserialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A hierarchy node as returned by the folder data source.
///
/// The same shape is used at every level; which optional fields are populated
/// depends on the depth (album/track metadata is absent on artist rows).
/// Folders are immutable once fetched — navigation replaces whole listings,
/// it never patches rows in place.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub duration_string: Option<String>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_string: Option<String>,
    #[serde(default)]
    pub disc: Option<u32>,
    #[serde(default)]
    pub track: Option<u32>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// One folder listing as returned by `GET /folder`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingPage {
    pub total: usize,
    #[serde(default)]
    pub cover: Option<String>,
    pub folders: Vec<Folder>,
}

/// Diacritic- and case-insensitive key for album-name ordering.
fn album_sort_key(folder: &Folder) -> String {
    folder
        .album
        .as_deref()
        .unwrap_or("")
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Orders track listings by (album name, disc, track number).
/// Missing disc/track values sort as 0. Used with a stable sort so equal
/// keys keep their server order.
pub fn compare_tracks(a: &Folder, b: &Folder) -> Ordering {
    album_sort_key(a)
        .cmp(&album_sort_key(b))
        .then(a.disc.unwrap_or(0).cmp(&b.disc.unwrap_or(0)))
        .then(a.track.unwrap_or(0).cmp(&b.track.unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(album: &str, disc: Option<u32>, track_no: Option<u32>, id: &str) -> Folder {
        Folder {
            id: id.to_string(),
            title: format!("track {id}"),
            album: Some(album.to_string()),
            disc,
            track: track_no,
            ..Folder::default()
        }
    }

    #[test]
    fn tracks_order_by_album_then_disc_then_track() {
        let mut items = vec![
            track("Solid", Some(2), Some(1), "d"),
            track("Black Fire", Some(1), Some(3), "b"),
            track("Solid", Some(1), Some(9), "c"),
            track("Black Fire", Some(1), Some(1), "a"),
        ];
        items.sort_by(compare_tracks);
        let ids: Vec<&str> = items.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn missing_disc_and_track_sort_as_zero() {
        let mut items = vec![
            track("X", Some(1), Some(1), "second"),
            track("X", None, None, "first"),
        ];
        items.sort_by(compare_tracks);
        assert_eq!(items[0].id, "first");
    }

    #[test]
    fn album_comparison_ignores_case_and_accents() {
        let mut items = vec![
            track("Ínsula", None, Some(1), "b"),
            track("zebra", None, Some(1), "c"),
            track("apple", None, Some(1), "a"),
        ];
        items.sort_by(compare_tracks);
        let ids: Vec<&str> = items.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn equal_keys_keep_server_order() {
        let mut items = vec![
            track("Same", Some(1), Some(1), "x"),
            track("Same", Some(1), Some(1), "y"),
        ];
        items.sort_by(compare_tracks);
        assert_eq!(items[0].id, "x");
        assert_eq!(items[1].id, "y");
    }

    #[test]
    fn folder_deserializes_camel_case_fields() {
        let json = r#"{
            "id": "42",
            "title": "[1964] Point of Departure",
            "durationString": "39:21",
            "filesizeString": "92 MB",
            "disc": 1,
            "track": 3
        }"#;
        let folder: Folder = serde_json::from_str(json).unwrap();
        assert_eq!(folder.id, "42");
        assert_eq!(folder.duration_string.as_deref(), Some("39:21"));
        assert_eq!(folder.filesize_string.as_deref(), Some("92 MB"));
        assert_eq!(folder.track, Some(3));
        assert_eq!(folder.album, None);
    }
}
