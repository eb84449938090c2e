//! String handling utilities
//!
//! ISO9660 identifiers are fixed-width, space-padded byte fields. Name
//! comparisons are ASCII case-insensitive.

use alloc::string::String;

/// Trim trailing spaces from byte slice
pub fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        end -= 1;
    }
    &bytes[..end]
}

/// Convert a fixed-width identifier field into an owned string
///
/// Trailing padding is dropped; bytes that are not valid UTF-8 are replaced.
pub fn identifier_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(trim_trailing_spaces(bytes)).into_owned()
}

/// Strip version suffix from filename (e.g., "FILE.TXT;1" -> "FILE.TXT")
pub fn strip_version(name: &str) -> &str {
    name.split(';').next().unwrap_or(name)
}

/// Match a directory record identifier against a requested file name
///
/// Matches when the identifier equals `name`, or when it is `name`
/// followed by a `;version` suffix. Both comparisons ignore ASCII case.
pub fn file_identifier_matches(identifier: &[u8], name: &[u8]) -> bool {
    match identifier.len().cmp(&name.len()) {
        core::cmp::Ordering::Equal => identifier.eq_ignore_ascii_case(name),
        core::cmp::Ordering::Greater => {
            identifier[name.len()] == b';'
                && identifier[..name.len()].eq_ignore_ascii_case(name)
        }
        core::cmp::Ordering::Less => false,
    }
}

/// Split an absolute path at its last `/`
///
/// Returns `(directory, file_name)`. A path without `/` lives in the root
/// directory, so its directory part is empty.
pub fn split_file_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}
