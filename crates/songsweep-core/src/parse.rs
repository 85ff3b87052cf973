//! Filename parsing into song records.
//!
//! Filenames are expected to follow `Title - Artist[_tag].ext`. Anything that
//! does not fit still produces a record: the whole stem becomes the title and
//! the artist is left empty.

use std::path::PathBuf;
use std::sync::LazyLock;

use compact_str::CompactString;
use regex::Regex;

use crate::normalize::normalize_text;
use crate::song::SongFile;

/// Separator between title and artist.
pub const TITLE_ARTIST_SEPARATOR: &str = " - ";

/// Recognized quality/version suffixes, checked in this order.
///
/// The first entry the artist part ends with wins, even when a later entry
/// would be a longer match.
pub const QUALITY_TAGS: &[&str] = &[
    "_eg",
    "_hq",
    "_320k",
    "_flac",
    "_mp3",
    "_aac",
    "_lossless",
    "_explicit",
    "_clean",
    "_remastered",
    "_remix",
    "_live",
    "_acoustic",
    "_instrumental",
    "_demo",
    "_version",
    "_edit",
];

/// Longest suffix (in characters) accepted by the underscore fallback.
const MAX_FALLBACK_TAG_CHARS: usize = 8;

/// Unicode decimal digit (general category Nd). Fractions, roman numerals
/// and other numeric symbols do not count.
static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("digit pattern is valid"));

/// Split a filename into stem and extension.
///
/// The extension starts at the last dot; leading dots belong to the stem, so
/// `.hidden` has no extension.
pub fn split_extension(filename: &str) -> (&str, &str) {
    let leading = filename.len() - filename.trim_start_matches('.').len();
    match filename[leading..].rfind('.') {
        Some(pos) => filename.split_at(leading + pos),
        None => (filename, ""),
    }
}

/// Parse a filename and its size into a [`SongFile`].
///
/// Never fails; malformed names fall back to title-only records.
pub fn parse_filename(filename: &str, full_path: impl Into<PathBuf>, size_bytes: u64) -> SongFile {
    let (stem, ext) = split_extension(filename);

    let (song_title, artist, quality_tag) = match stem.split_once(TITLE_ARTIST_SEPARATOR) {
        Some((title, rest)) => {
            let (artist, tag) = split_quality_tag(rest.trim());
            (title.trim().to_string(), artist.trim().to_string(), tag)
        }
        None => (stem.to_string(), String::new(), CompactString::default()),
    };

    let normalized_title = normalize_text(&song_title);
    let normalized_artist = normalize_text(&artist);

    tracing::trace!(
        filename,
        title = %normalized_title,
        artist = %normalized_artist,
        tag = %quality_tag,
        "parsed filename"
    );

    SongFile {
        filename: filename.to_string(),
        full_path: full_path.into(),
        song_title,
        artist,
        quality_tag,
        normalized_title,
        normalized_artist,
        extension: CompactString::from(ext.to_lowercase()),
        size_bytes,
    }
}

/// Separate a trailing quality tag from the artist part.
///
/// Returns the artist (untrimmed) and the tag, which is empty when none is
/// recognized.
pub fn split_quality_tag(combined: &str) -> (&str, CompactString) {
    if let Some(tag) = QUALITY_TAGS
        .iter()
        .copied()
        .find(|tag| ends_with_ignore_ascii_case(combined, tag))
    {
        return (&combined[..combined.len() - tag.len()], CompactString::from(tag));
    }

    if let Some(idx) = combined.rfind('_') {
        if idx > 0 {
            let candidate = &combined[idx..];
            if candidate.chars().count() <= MAX_FALLBACK_TAG_CHARS
                && DECIMAL_DIGIT.is_match(candidate)
            {
                return (&combined[..idx], CompactString::from(candidate));
            }
        }
    }

    (combined, CompactString::default())
}

fn ends_with_ignore_ascii_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> SongFile {
        parse_filename(name, PathBuf::from("/music").join(name), 0)
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("Song - Artist.mp3"), ("Song - Artist", ".mp3"));
        assert_eq!(split_extension("a.b.FLAC"), ("a.b", ".FLAC"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension(".hidden"), (".hidden", ""));
        assert_eq!(split_extension("..mp3"), ("..mp3", ""));
        assert_eq!(split_extension(".hidden.mp3"), (".hidden", ".mp3"));
    }

    #[test]
    fn test_title_and_artist() {
        let song = parse("Yesterday - The Beatles.mp3");
        assert_eq!(song.song_title, "Yesterday");
        assert_eq!(song.artist, "The Beatles");
        assert_eq!(song.quality_tag, "");
        assert_eq!(song.extension, ".mp3");
        assert_eq!(song.normalized_title, "yesterday");
        assert_eq!(song.normalized_artist, "the beatles");
    }

    #[test]
    fn test_splits_on_first_separator_only() {
        let song = parse("Intro - Outro - Band.mp3");
        assert_eq!(song.song_title, "Intro");
        assert_eq!(song.artist, "Outro - Band");
    }

    #[test]
    fn test_vocabulary_tag_case_insensitive() {
        let song = parse("Song A - Artist_EG.mp3");
        assert_eq!(song.artist, "Artist");
        assert_eq!(song.quality_tag, "_eg");
        assert_eq!(song.normalized_artist, "artist");
    }

    #[test]
    fn test_vocabulary_precedes_fallback() {
        let song = parse("Song - Artist_Remastered.flac");
        assert_eq!(song.quality_tag, "_remastered");
        assert_eq!(song.artist, "Artist");

        // Stored as the vocabulary spelling, not the filename's casing.
        let song = parse("Song - Artist_320K.mp3");
        assert_eq!(song.quality_tag, "_320k");
    }

    #[test]
    fn test_fallback_tag_with_digit() {
        let song = parse("Song - Artist_v2.mp3");
        assert_eq!(song.artist, "Artist");
        assert_eq!(song.quality_tag, "_v2");

        let song = parse("Song - Artist_192kbps.mp3");
        assert_eq!(song.quality_tag, "_192kbps");
    }

    #[test]
    fn test_fallback_rejects_long_or_digitless_suffix() {
        let song = parse("Song - Guns_N_Roses.mp3");
        assert_eq!(song.artist, "Guns_N_Roses");
        assert_eq!(song.quality_tag, "");

        let song = parse("Song - Artist_123456789.mp3");
        assert_eq!(song.artist, "Artist_123456789");
        assert_eq!(song.quality_tag, "");
    }

    #[test]
    fn test_fallback_requires_decimal_digit() {
        let song = parse("Song - Artist_½.mp3");
        assert_eq!(song.artist, "Artist_½");
        assert_eq!(song.quality_tag, "");

        let song = parse("Song - Artist_Ⅻ.mp3");
        assert_eq!(song.artist, "Artist_Ⅻ");
        assert_eq!(song.quality_tag, "");

        let song = parse("Song - Artist_²x.mp3");
        assert_eq!(song.artist, "Artist_²x");
        assert_eq!(song.quality_tag, "");

        // Non-ASCII decimal digits are still digits.
        let song = parse("Song - Artist_v٣.mp3");
        assert_eq!(song.artist, "Artist");
        assert_eq!(song.quality_tag, "_v٣");
    }

    #[test]
    fn test_fallback_ignores_leading_underscore() {
        let song = parse("Song - _1.mp3");
        assert_eq!(song.artist, "_1");
        assert_eq!(song.quality_tag, "");
    }

    #[test]
    fn test_no_separator() {
        let song = parse("JustATitle_eg.wav");
        assert_eq!(song.song_title, "JustATitle_eg");
        assert_eq!(song.artist, "");
        assert_eq!(song.quality_tag, "");
        assert_eq!(song.normalized_artist, "");
    }

    #[test]
    fn test_hyphen_without_spaces_is_not_separator() {
        let song = parse("Song-Artist.mp3");
        assert_eq!(song.song_title, "Song-Artist");
        assert_eq!(song.artist, "");
    }

    #[test]
    fn test_extension_lower_cased() {
        let song = parse("Song - Artist.FLAC");
        assert_eq!(song.extension, ".flac");
    }

    #[test]
    fn test_non_ascii_artist_with_tag() {
        let song = parse("晴天 - 周杰伦_hq.flac");
        assert_eq!(song.song_title, "晴天");
        assert_eq!(song.artist, "周杰伦");
        assert_eq!(song.quality_tag, "_hq");
    }

    #[test]
    fn test_size_is_carried() {
        let song = parse_filename("a - b.mp3", "/music/a - b.mp3", 4096);
        assert_eq!(song.size_bytes, 4096);
        assert_eq!(song.full_path, PathBuf::from("/music/a - b.mp3"));
    }
}
