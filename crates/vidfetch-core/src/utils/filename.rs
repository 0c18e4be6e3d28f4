//! Filename sanitization for titles reported by the media fetcher.
//!
//! Titles are arbitrary user-facing strings. Before one can name a file in
//! the storage directory, every character that is unsafe in a path
//! component is replaced by an underscore. The substitution is strictly
//! character-for-character: nothing is inserted, removed or truncated, so
//! two different titles may still collide on the same name.

/// Characters that may not appear in a stored filename.
pub const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Title used when the media fetcher reports none.
pub const DEFAULT_TITLE: &str = "video";

/// Replace every forbidden filesystem character with `_`.
///
/// ```rust
/// use vidfetch_core::sanitize_filename;
///
/// assert_eq!(sanitize_filename("a/b\\c:d"), "a_b_c_d");
/// assert_eq!(sanitize_filename("plain"), "plain");
/// ```
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Derive the stored file stem from a human-readable title.
///
/// Spaces become underscores first, then forbidden characters are replaced.
///
/// ```rust
/// use vidfetch_core::safe_filename_from_title;
///
/// assert_eq!(safe_filename_from_title("My Video: Part 1"), "My_Video__Part_1");
/// ```
pub fn safe_filename_from_title(title: &str) -> String {
    sanitize_filename(&title.replace(' ', "_"))
}

/// Pick the title to name a file after, falling back to [`DEFAULT_TITLE`]
/// when the fetcher reported no title or a blank one.
pub fn title_or_default(title: Option<&str>) -> &str {
    match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => DEFAULT_TITLE,
    }
}
