//! The signature automaton.
//!
//! A non-deterministic matcher over a fixed, closed set of [`State`]s. The
//! active states live in a [`Frontier`] bitset; each input character is
//! lowercased once and every active state contributes its successors to the
//! next frontier. `Start` re-enters itself on every character, so a signature
//! may begin at any offset of the text.

use core::fmt;

use crate::{Signature, SignatureSet};

mod charclass;
mod state;


pub use charclass::{is_digit, is_operand, is_space, is_word};
pub use state::{State, KEYWORDS, STATE_COUNT};

/// Set of active states, one bit per [`State::index`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Frontier {
    bits: u64,
}

impl Frontier {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The initial frontier, `{Start}`.
    pub fn start() -> Self {
        let mut frontier = Self::empty();
        frontier.insert(State::Start);
        frontier
    }

    /// Adds a state. States with an out-of-range literal payload have no bit
    /// and are ignored.
    #[inline]
    pub fn insert(&mut self, state: State) {
        if let Some(index) = state.index() {
            self.bits |= 1u64 << index;
        }
    }

    #[inline]
    pub fn contains(&self, state: State) -> bool {
        state
            .index()
            .is_some_and(|index| self.bits & (1u64 << index) != 0)
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> FrontierIter {
        FrontierIter { bits: self.bits }
    }

    /// Families with an accepting state in this frontier.
    pub fn accepting(&self) -> SignatureSet {
        self.iter()
            .filter_map(State::accepts)
            .fold(SignatureSet::empty(), |set, sig| set | sig.as_set())
    }
}

impl fmt::Debug for Frontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl IntoIterator for Frontier {
    type Item = State;
    type IntoIter = FrontierIter;

    fn into_iter(self) -> FrontierIter {
        self.iter()
    }
}

/// Iterates the states of a [`Frontier`] in bit order.
#[derive(Debug, Clone)]
pub struct FrontierIter {
    bits: u64,
}

impl Iterator for FrontierIter {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        while self.bits != 0 {
            let index = self.bits.trailing_zeros();
            self.bits &= self.bits - 1;
            if let Some(state) = State::from_index(index) {
                return Some(state);
            }
        }
        None
    }
}

/// Position and families of the first acceptance in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Index, in characters, of the character on which the text was accepted.
    pub offset: usize,
    /// Every family accepting on that character.
    pub signatures: SignatureSet,
}

impl Hit {
    /// The reported family, chosen by [`Signature::PRIORITY`].
    pub fn signature(&self) -> Option<Signature> {
        self.signatures.first()
    }
}

/// Streaming matcher for the four signature families.
///
/// One instance holds all per-scan state, so instances must not be shared
/// between concurrent scans. Reusing one across fields or requests is fine as
/// long as [`Automaton::reset`] runs in between, which [`Automaton::find`]
/// does itself.
#[derive(Debug, Clone)]
pub struct Automaton {
    frontier: Frontier,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    pub fn new() -> Self {
        Self {
            frontier: Frontier::start(),
        }
    }

    /// Restores the frontier to `{Start}`. All literal progress lives in the
    /// frontier, so nothing else survives.
    pub fn reset(&mut self) {
        self.frontier = Frontier::start();
    }

    /// Advances the frontier by one character.
    pub fn step(&mut self, c: char) {
        let c = c.to_ascii_lowercase();
        let mut next = Frontier::empty();
        for state in self.frontier.iter() {
            state.advance(c, &mut next);
        }
        if next.is_empty() {
            next = Frontier::start();
        }
        self.frontier = next;
    }

    pub fn is_accepting(&self) -> bool {
        !self.frontier.accepting().is_empty()
    }

    /// Families currently accepting.
    pub fn accepting(&self) -> SignatureSet {
        self.frontier.accepting()
    }

    pub fn frontier(&self) -> Frontier {
        self.frontier
    }

    /// Resets, then feeds `text` until one of the `enabled` families accepts.
    ///
    /// Acceptances of families outside `enabled` are ignored and scanning
    /// continues past them.
    pub fn find(&mut self, text: &str, enabled: SignatureSet) -> Option<Hit> {
        self.reset();
        for (offset, c) in text.chars().enumerate() {
            self.step(c);
            let signatures = self.frontier.accepting() & enabled;
            if !signatures.is_empty() {
                return Some(Hit { offset, signatures });
            }
        }
        None
    }

    /// Resets, then feeds `text` with every family enabled.
    pub fn feed(&mut self, text: &str) -> Option<SignatureSet> {
        self.find(text, SignatureSet::all()).map(|hit| hit.signatures)
    }
}
