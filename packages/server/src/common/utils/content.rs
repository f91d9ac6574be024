//! Pure utility functions for text manipulation
//!
//! These functions contain NO side effects - they take inputs and return outputs
//! without touching the network or spawning processes.

/// Longest prefix of `text` holding at most `max_chars` characters.
///
/// Never splits a multi-byte character.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
