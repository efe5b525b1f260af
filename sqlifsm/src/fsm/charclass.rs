//! Character classes shared by every transition rule.
//!
//! All tests expect the character to be lowercased already; the automaton
//! lowers each input character once before dispatching to the states.

/// Space, tab or newline. Carriage return is not included.
#[inline]
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Identifier character: `[a-z0-9_]`.
#[inline]
pub fn is_word(c: char) -> bool {
    c.is_ascii_lowercase() || is_digit(c) || c == '_'
}

/// Characters allowed inside a tautology operand: word characters and `'`.
#[inline]
pub fn is_operand(c: char) -> bool {
    is_word(c) || c == '\''
}
