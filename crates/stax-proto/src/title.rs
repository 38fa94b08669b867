//! Album-title parsing — split `"[1964] Point of Departure"` into year and name.

use std::sync::OnceLock;

use regex::Regex;

/// An album title split into its display name and optional bracketed year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAlbum {
    pub album: String,
    pub year: String,
}

static TITLE_RE: OnceLock<Regex> = OnceLock::new();

/// Parse a raw album/track title of the form `"[Year] Album Name"`.
///
/// The leading bracketed segment is optional and may not nest; whatever
/// remains (at least one character) is the album name. Titles that do not
/// match at all (empty input) yield empty strings for both fields. Artist
/// titles are never passed through here.
pub fn parse_album_title(raw: &str) -> ParsedAlbum {
    let re = TITLE_RE
        .get_or_init(|| Regex::new(r"^(?:\[([^\[\]]*)\]\s*)?(.+)$").expect("title regex"));

    match re.captures(raw) {
        Some(caps) => ParsedAlbum {
            year: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
            album: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
        },
        None => ParsedAlbum::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_and_album_are_split() {
        let parsed = parse_album_title("[1987] Masterpiece");
        assert_eq!(parsed.year, "1987");
        assert_eq!(parsed.album, "Masterpiece");
    }

    #[test]
    fn bare_title_has_empty_year() {
        let parsed = parse_album_title("Masterpiece");
        assert_eq!(parsed.year, "");
        assert_eq!(parsed.album, "Masterpiece");
    }

    #[test]
    fn empty_input_yields_empty_fields() {
        assert_eq!(parse_album_title(""), ParsedAlbum::default());
    }

    #[test]
    fn whitespace_after_bracket_is_dropped() {
        let parsed = parse_album_title("[2001]   Space Out");
        assert_eq!(parsed.year, "2001");
        assert_eq!(parsed.album, "Space Out");
    }

    #[test]
    fn bracket_contents_are_not_only_digits() {
        // The data source occasionally emits non-numeric brackets; the split
        // rule is purely syntactic.
        let parsed = parse_album_title("[Live] At the Vanguard");
        assert_eq!(parsed.year, "Live");
        assert_eq!(parsed.album, "At the Vanguard");
    }

    #[test]
    fn bracket_with_no_remainder_falls_back_to_whole_title() {
        // The album name is required, so a lone bracket group is treated as
        // the name itself rather than a year.
        let parsed = parse_album_title("[1999]");
        assert_eq!(parsed.year, "");
        assert_eq!(parsed.album, "[1999]");
    }
}
