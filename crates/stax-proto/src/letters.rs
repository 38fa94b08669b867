//! Letter-index buckets for alphabetic browsing.
//!
//! The artist page is narrowed by one of 28 buckets: a digits bucket, one per
//! letter a–z, and a trailing catch-all for titles outside the Latin range
//! (CJK and friends). Classification works on the first character of the
//! display title after stripping a leading apostrophe and decomposing
//! diacritics.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// One of the 28 index buckets, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Titles starting with a decimal digit.
    Digits,
    /// Titles starting with the given letter (`'a'..='z'`).
    Letter(char),
    /// Everything that is neither a–z nor a digit after normalization.
    Other,
}

impl Bucket {
    pub const COUNT: usize = 28;

    /// All buckets in their fixed display order: `1`, `a`..`z`, catch-all.
    pub fn all() -> impl Iterator<Item = Bucket> {
        std::iter::once(Bucket::Digits)
            .chain(('a'..='z').map(Bucket::Letter))
            .chain(std::iter::once(Bucket::Other))
    }

    /// Single-character label shown on the bucket selector.
    pub fn label(self) -> char {
        match self {
            Bucket::Digits => '1',
            Bucket::Letter(c) => c,
            Bucket::Other => '高',
        }
    }

    /// Does `title` belong to this bucket?
    pub fn matches(self, title: &str) -> bool {
        match self {
            // The digits bucket tests the raw first character, before any
            // apostrophe stripping or normalization.
            Bucket::Digits => title.chars().next().is_some_and(|c| c.is_ascii_digit()),
            Bucket::Letter(letter) => {
                normalized_first(title).is_some_and(|c| c.eq_ignore_ascii_case(&letter))
            }
            Bucket::Other => match normalized_first(title) {
                Some(c) => !c.is_ascii_alphabetic() && !c.is_ascii_digit(),
                None => true,
            },
        }
    }
}

/// First character of `title`, uppercased and stripped of combining marks.
/// A leading apostrophe (straight or typographic) is skipped first, and the
/// Ø-variant maps onto plain O.
fn normalized_first(title: &str) -> Option<char> {
    let stripped = title.trim_start_matches(['\'', '\u{2018}', '\u{2019}']);
    let first = stripped.chars().next()?;
    let normalized = first
        .to_uppercase()
        .collect::<String>()
        .nfd()
        .find(|c| !is_combining_mark(*c))?;
    Some(if normalized == 'Ø' { 'O' } else { normalized })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_order_is_digits_letters_catch_all() {
        let labels: String = Bucket::all().map(Bucket::label).collect();
        assert_eq!(labels.chars().count(), Bucket::COUNT);
        assert!(labels.starts_with("1abc"));
        assert!(labels.ends_with("yz高"));
    }

    #[test]
    fn digits_bucket_uses_raw_first_character() {
        assert!(Bucket::Digits.matches("5 Seconds"));
        assert!(!Bucket::Digits.matches("Five Seconds"));
    }

    #[test]
    fn accents_are_folded_before_matching() {
        assert!(Bucket::Letter('a').matches("Ångström"));
        assert!(Bucket::Letter('u').matches("über"));
        assert!(!Bucket::Letter('a').matches("über"));
    }

    #[test]
    fn slashed_o_maps_to_o() {
        assert!(Bucket::Letter('o').matches("Øresund"));
        assert!(Bucket::Letter('o').matches("ørkenen"));
    }

    #[test]
    fn leading_apostrophe_is_skipped() {
        assert!(Bucket::Letter('r').matches("'Round About Midnight"));
        assert!(Bucket::Letter('t').matches("'Til Tuesday"));
    }

    #[test]
    fn cjk_titles_land_in_the_catch_all() {
        assert!(Bucket::Other.matches("北京"));
        assert!(!Bucket::Letter('b').matches("北京"));
        assert!(!Bucket::Digits.matches("北京"));
    }

    #[test]
    fn ascii_titles_stay_out_of_the_catch_all() {
        assert!(!Bucket::Other.matches("Abdullah Ibrahim"));
        assert!(!Bucket::Other.matches("4hero"));
    }

    #[test]
    fn every_title_lands_in_exactly_one_letter_or_other_bucket() {
        for title in ["Ånon", "zebra", "北京", "Ümit", "'Til Tuesday"] {
            let hits = Bucket::all()
                .filter(|b| *b != Bucket::Digits)
                .filter(|b| b.matches(title))
                .count();
            assert_eq!(hits, 1, "title {title:?} matched {hits} buckets");
        }
    }
}
