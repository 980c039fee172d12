// src/readme/markers.rs
// =============================================================================
// This module rewrites the text between a pair of marker comments.
//
// A marker region looks like this in the README:
//
//   <!-- recent_posts starts -->
//   - [Some post](https://example.com/post)
//   <!-- recent_posts ends -->
//
// Rules:
// - The first start comment for a marker wins
// - The region ends at the first end comment after that start comment
// - Everything outside the region is left byte-for-byte untouched
// - Patching twice with the same body gives the same document
//
// Rust concepts:
// - String slicing with byte offsets from str::find
// - Option<T>: "found" vs "not found" without sentinel values
// =============================================================================

use tracing::warn;

// Builds the opening comment for a marker name
pub fn start_comment(marker: &str) -> String {
    format!("<!-- {} starts -->", marker)
}

// Builds the closing comment for a marker name
pub fn end_comment(marker: &str) -> String {
    format!("<!-- {} ends -->", marker)
}

// Locates a marker region
//
// Returns: Some((start, end)) byte offsets where document[start..end] covers
// the start comment, the body, and the end comment. None if either comment
// is missing or the end comment only appears before the start comment.
pub fn find_section(document: &str, marker: &str) -> Option<(usize, usize)> {
    let open = start_comment(marker);
    let close = end_comment(marker);

    let start = document.find(&open)?;
    let body_start = start + open.len();
    let close_offset = document[body_start..].find(&close)?;
    let end = body_start + close_offset + close.len();

    Some((start, end))
}

// Replaces a marker region with a fresh body
//
// Parameters:
//   document: the full README text
//   marker: marker name, e.g. "recent_activity"
//   body: the new content to place between the comments
//
// Returns: Some(new_document) if the marker pair exists, None otherwise
pub fn replace_section(document: &str, marker: &str, body: &str) -> Option<String> {
    let (start, end) = find_section(document, marker)?;

    let replacement = format!("{}\n{}\n{}", start_comment(marker), body, end_comment(marker));

    let mut patched = String::with_capacity(document.len() - (end - start) + replacement.len());
    patched.push_str(&document[..start]);
    patched.push_str(&replacement);
    patched.push_str(&document[end..]);

    Some(patched)
}

// Same as replace_section, but never fails
//
// A missing marker is not an error for a profile README: the template may
// simply not have that section. We log a warning and hand the text back.
pub fn patch(document: &str, marker: &str, body: &str) -> String {
    match replace_section(document, marker, body) {
        Some(patched) => patched,
        None => {
            warn!(marker, "marker not found in README, leaving it unchanged");
            document.to_string()
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why byte offsets instead of a regex?
//    - str::find returns the byte index where a match starts
//    - Both comments are plain ASCII, so slicing at those indices always
//      lands on a char boundary
//    - A regex like `starts -->.*ends -->` is greedy and would swallow
//      everything up to the LAST end comment
//
// 2. What does the `?` do inside find_section?
//    - find() returns Option<usize>
//    - `?` on an Option returns None early from the whole function
//    - Same idea as `?` on a Result, just for "not found" instead of errors
//
// 3. Why String::with_capacity?
//    - We know the final size up front, so the String allocates once
// -----------------------------------------------------------------------------
