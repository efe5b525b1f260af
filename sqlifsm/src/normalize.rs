//! Pre-scan normalization of candidate fields.
//!
//! Only `%20` and `%27` are decoded. Payloads hidden behind any other escape
//! (`%2D%2D`, `%3B`, double encoding, `+` for space in a raw query string)
//! reach the automaton undecoded and are not detected there. Decoded query
//! and form values are unaffected because the extractor already
//! percent-decodes them.

use std::borrow::Cow;

/// Replaces `%20` with a space, then `%27` with `'`. Everything else is
/// passed through. Borrows when there is nothing to replace.
pub fn normalize(field: &str) -> Cow<'_, str> {
    if !field.contains("%20") && !field.contains("%27") {
        return Cow::Borrowed(field);
    }
    Cow::Owned(field.replace("%20", " ").replace("%27", "'"))
}
