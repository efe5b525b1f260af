use super::charclass::{is_operand, is_space, is_word};
use super::Frontier;
use crate::Signature;

pub(crate) const UNION: &str = "union";
pub(crate) const ALL: &str = "all";
pub(crate) const SELECT: &str = "select";

/// Statement keywords that confirm a stacked query.
pub const KEYWORDS: [&str; 7] = ["select", "insert", "update", "delete", "drop", "alter", "create"];

/// One position in one of the four signature patterns.
///
/// Literal words are tracked by the number of characters matched so far, so
/// two branches matching the same literal at different offsets are simply two
/// distinct states in the frontier and never share a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Start,

    // Tautology: '+ <sep> (or|and) \s* value1 (\s|=) \s* value2
    Quote,
    SpaceOrAnd,
    Or,
    AndA,
    AndN,
    /// `or`/`and` complete, waiting for the first operand.
    Operator,
    Value1,
    Equals,
    Value2,

    // Comment: -- or /*
    Dash,
    Slash,
    Comment,

    // UNION \s* (ALL \s+)? SELECT
    /// `1..=4` characters of "union".
    Union(u8),
    UnionSpace,
    /// `1..=3` characters of "all"; 3 waits for whitespace.
    All(u8),
    AllSpace,
    /// `1..=6` characters of "select"; 6 accepts.
    Select(u8),

    // Stacked query: ; \s* keyword
    Semicolon,
    SpaceKeyword,
    /// `matched` characters of `KEYWORDS[keyword]`, always short of the full word.
    Keyword { keyword: u8, matched: u8 },
    KeywordConfirm,
}

// Bit layout of the frontier. Literal states occupy one bit per prefix length.
const UNION_BASE: u32 = 13;
const UNION_SPACE: u32 = UNION_BASE + UNION.len() as u32 - 1;
const ALL_BASE: u32 = UNION_SPACE + 1;
const ALL_SPACE: u32 = ALL_BASE + ALL.len() as u32;
const SELECT_BASE: u32 = ALL_SPACE + 1;
const SEMICOLON: u32 = SELECT_BASE + SELECT.len() as u32;
const SPACE_KEYWORD: u32 = SEMICOLON + 1;
const KEYWORD_BASE: u32 = SPACE_KEYWORD + 1;
const KEYWORD_OFFSETS: [u32; KEYWORDS.len()] = keyword_offsets();
const KEYWORD_CONFIRM: u32 = KEYWORD_BASE + partial_keyword_states();

/// Number of distinct states; every one has a bit in a `u64` frontier.
pub const STATE_COUNT: usize = KEYWORD_CONFIRM as usize + 1;

const _: () = assert!(STATE_COUNT <= 64);

const fn keyword_offsets() -> [u32; KEYWORDS.len()] {
    let mut out = [0; KEYWORDS.len()];
    let mut i = 1;
    while i < KEYWORDS.len() {
        out[i] = out[i - 1] + KEYWORDS[i - 1].len() as u32 - 1;
        i += 1;
    }
    out
}

const fn partial_keyword_states() -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < KEYWORDS.len() {
        total += KEYWORDS[i].len() as u32 - 1;
        i += 1;
    }
    total
}

/// Returns the character a literal expects after `matched` characters.
#[inline]
fn literal_at(literal: &str, matched: u8) -> Option<char> {
    literal.as_bytes().get(usize::from(matched)).map(|&b| char::from(b))
}

impl State {
    /// Bit index of this state, or `None` for a payload outside its literal.
    pub fn index(self) -> Option<u32> {
        let index = match self {
            State::Start => 0,
            State::Quote => 1,
            State::SpaceOrAnd => 2,
            State::Or => 3,
            State::AndA => 4,
            State::AndN => 5,
            State::Operator => 6,
            State::Value1 => 7,
            State::Equals => 8,
            State::Value2 => 9,
            State::Dash => 10,
            State::Slash => 11,
            State::Comment => 12,
            State::Union(n) if (1..UNION.len()).contains(&usize::from(n)) => {
                UNION_BASE + u32::from(n) - 1
            }
            State::UnionSpace => UNION_SPACE,
            State::All(n) if (1..=ALL.len()).contains(&usize::from(n)) => {
                ALL_BASE + u32::from(n) - 1
            }
            State::AllSpace => ALL_SPACE,
            State::Select(n) if (1..=SELECT.len()).contains(&usize::from(n)) => {
                SELECT_BASE + u32::from(n) - 1
            }
            State::Semicolon => SEMICOLON,
            State::SpaceKeyword => SPACE_KEYWORD,
            State::Keyword { keyword, matched } => {
                let word = KEYWORDS.get(usize::from(keyword))?;
                if matched == 0 || usize::from(matched) >= word.len() {
                    return None;
                }
                KEYWORD_BASE + KEYWORD_OFFSETS[usize::from(keyword)] + u32::from(matched) - 1
            }
            State::KeywordConfirm => KEYWORD_CONFIRM,
            State::Union(_) | State::All(_) | State::Select(_) => return None,
        };
        Some(index)
    }

    /// Inverse of [`State::index`].
    pub fn from_index(index: u32) -> Option<State> {
        let state = match index {
            0 => State::Start,
            1 => State::Quote,
            2 => State::SpaceOrAnd,
            3 => State::Or,
            4 => State::AndA,
            5 => State::AndN,
            6 => State::Operator,
            7 => State::Value1,
            8 => State::Equals,
            9 => State::Value2,
            10 => State::Dash,
            11 => State::Slash,
            12 => State::Comment,
            i if (UNION_BASE..UNION_SPACE).contains(&i) => State::Union((i - UNION_BASE + 1) as u8),
            UNION_SPACE => State::UnionSpace,
            i if (ALL_BASE..ALL_SPACE).contains(&i) => State::All((i - ALL_BASE + 1) as u8),
            ALL_SPACE => State::AllSpace,
            i if (SELECT_BASE..SEMICOLON).contains(&i) => {
                State::Select((i - SELECT_BASE + 1) as u8)
            }
            SEMICOLON => State::Semicolon,
            SPACE_KEYWORD => State::SpaceKeyword,
            i if (KEYWORD_BASE..KEYWORD_CONFIRM).contains(&i) => {
                let rel = i - KEYWORD_BASE;
                let keyword = KEYWORD_OFFSETS.iter().rposition(|&off| off <= rel)?;
                State::Keyword {
                    keyword: keyword as u8,
                    matched: (rel - KEYWORD_OFFSETS[keyword] + 1) as u8,
                }
            }
            KEYWORD_CONFIRM => State::KeywordConfirm,
            _ => return None,
        };
        Some(state)
    }

    /// The family this state accepts for, if it is accepting.
    pub fn accepts(self) -> Option<Signature> {
        match self {
            State::Value2 => Some(Signature::Tautology),
            State::Comment => Some(Signature::Comment),
            State::Select(n) if usize::from(n) == SELECT.len() => Some(Signature::UnionSelect),
            State::KeywordConfirm => Some(Signature::StackedQuery),
            _ => None,
        }
    }

    /// Adds to `next` every state reachable from `self` on the lowercased
    /// character `c`. A character that fits no rule contributes nothing, which
    /// drops the branch; `Start` keeps itself alive on every character.
    pub(crate) fn advance(self, c: char, next: &mut Frontier) {
        match self {
            State::Start => {
                match c {
                    '\'' => next.insert(State::Quote),
                    '-' => next.insert(State::Dash),
                    '/' => next.insert(State::Slash),
                    'u' => next.insert(State::Union(1)),
                    ';' => next.insert(State::Semicolon),
                    _ => {}
                }
                next.insert(State::Start);
            }

            State::Quote => {
                // A non-quote character after the quote run may be the
                // separator before the operator or its first letter.
                if c == '\'' {
                    next.insert(State::Quote);
                } else {
                    next.insert(State::SpaceOrAnd);
                    State::SpaceOrAnd.advance(c, next);
                }
            }
            State::SpaceOrAnd => match c {
                'o' => next.insert(State::Or),
                'a' => next.insert(State::AndA),
                c if is_space(c) => next.insert(State::SpaceOrAnd),
                _ => {}
            },
            State::Or => {
                if c == 'r' {
                    next.insert(State::Operator);
                }
            }
            State::AndA => {
                if c == 'n' {
                    next.insert(State::AndN);
                }
            }
            State::AndN => {
                if c == 'd' {
                    next.insert(State::Operator);
                }
            }
            State::Operator => {
                if is_space(c) {
                    next.insert(State::Operator);
                } else if is_operand(c) {
                    next.insert(State::Value1);
                }
            }
            State::Value1 => {
                if is_operand(c) {
                    next.insert(State::Value1);
                } else if is_space(c) || c == '=' {
                    next.insert(State::Equals);
                }
            }
            State::Equals => {
                // Whitespace may sit on either side of the `=`.
                if is_space(c) || c == '=' {
                    next.insert(State::Equals);
                } else if is_operand(c) {
                    next.insert(State::Value2);
                }
            }
            State::Value2 => {
                if is_operand(c) {
                    next.insert(State::Value2);
                }
            }

            State::Dash => {
                if c == '-' {
                    next.insert(State::Comment);
                }
            }
            State::Slash => {
                if c == '*' {
                    next.insert(State::Comment);
                }
            }
            State::Comment => {}

            State::Union(n) => {
                if literal_at(UNION, n) == Some(c) {
                    let matched = n + 1;
                    if usize::from(matched) == UNION.len() {
                        next.insert(State::UnionSpace);
                    } else {
                        next.insert(State::Union(matched));
                    }
                }
            }
            State::UnionSpace => match c {
                'a' => next.insert(State::All(1)),
                's' => next.insert(State::Select(1)),
                c if is_space(c) => next.insert(State::UnionSpace),
                _ => {}
            },
            State::All(n) => {
                if usize::from(n) == ALL.len() {
                    if is_space(c) {
                        next.insert(State::AllSpace);
                    }
                } else if literal_at(ALL, n) == Some(c) {
                    next.insert(State::All(n + 1));
                }
            }
            State::AllSpace => {
                if is_space(c) {
                    next.insert(State::AllSpace);
                } else if c == 's' {
                    next.insert(State::Select(1));
                }
            }
            State::Select(n) => {
                if literal_at(SELECT, n) == Some(c) {
                    next.insert(State::Select(n + 1));
                }
            }

            State::Semicolon | State::SpaceKeyword => {
                if is_space(c) {
                    next.insert(State::SpaceKeyword);
                } else {
                    for (keyword, word) in KEYWORDS.iter().enumerate() {
                        if word.starts_with(c) {
                            next.insert(State::Keyword {
                                keyword: keyword as u8,
                                matched: 1,
                            });
                        }
                    }
                }
            }
            State::Keyword { keyword, matched } => {
                let Some(word) = KEYWORDS.get(usize::from(keyword)) else {
                    return;
                };
                if literal_at(word, matched) == Some(c) {
                    let matched = matched + 1;
                    if usize::from(matched) == word.len() {
                        next.insert(State::KeywordConfirm);
                    } else {
                        next.insert(State::Keyword { keyword, matched });
                    }
                }
            }
            State::KeywordConfirm => {
                if is_space(c) || is_word(c) {
                    next.insert(State::KeywordConfirm);
                }
            }
        }
    }
}
