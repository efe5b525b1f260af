#![doc = include_str!("../README.md")]
//!
//! ## API Guide
//!
//! ### For End Users
//!
//! Most applications only need the high-level functions:
//!
//! - [`scan_request`] - Scan a raw HTTP request (recommended)
//! - [`scan_text`] - Scan one already-extracted string
//! - [`version`] - Library version information
//!
//! ### For Advanced Users and Debugging
//!
//! - [`Scanner`] - Reusable scanner with a configurable [`SignatureSet`]
//! - [`FieldExtractor`] / [`extract`] - The candidate fields of a request,
//!   with their provenance and any extraction issues
//! - [`Automaton`] - Direct access to the signature NFA and its [`Frontier`]
//!
//! The detection is heuristic. Nothing here parses SQL, and only `%20` and
//! `%27` are decoded before matching (see [`normalize`]).

use thiserror::Error;

pub mod fsm;
pub mod normalize;
pub mod request;
pub mod scan;
mod signature;

#[cfg(test)]
mod tests;

pub use fsm::{Automaton, Frontier, Hit, State};
pub use normalize::normalize;
pub use request::{extract, CandidateField, ExtractError, FieldExtractor, FieldSource, HttpRequest};
pub use scan::{Detection, Scanner, Verdict};
pub use signature::{Signature, SignatureSet};

/// Errors surfaced by the library's fallible helpers. Scanning itself never
/// fails; extraction problems are collected as [`ExtractError`]s instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("unknown signature family: {0:?}")]
    UnknownSignature(String),
}

/// Scans a raw HTTP request with every signature family enabled.
///
/// The request is split into candidate fields (query string and values, form
/// or JSON body, cookie values, `User-Agent`, `Referer`), each field is
/// normalized and fed to a fresh automaton, and the first match wins.
///
/// # Examples
///
/// ```
/// use sqlifsm::{scan_request, Signature};
///
/// let raw = "GET /profile HTTP/1.1\nHost: example.com\nCookie: session=abc' OR '1'='1";
/// let verdict = scan_request(raw);
/// assert!(verdict.is_malicious());
/// assert_eq!(verdict.signature(), Some(Signature::Tautology));
///
/// let raw = "GET /search?q=shoes HTTP/1.1\nHost: example.com";
/// assert!(!scan_request(raw).is_malicious());
/// ```
pub fn scan_request(raw: &str) -> Verdict<'_> {
    Scanner::new().scan(raw)
}

/// Scans a single string, normalized first, with every family enabled.
///
/// Returns the families accepting on the first matching character.
///
/// # Examples
///
/// ```
/// use sqlifsm::{scan_text, SignatureSet};
///
/// assert_eq!(scan_text("id=1'--"), Some(SignatureSet::COMMENT));
/// assert_eq!(scan_text("Please select an option"), None);
/// ```
pub fn scan_text(text: &str) -> Option<SignatureSet> {
    Scanner::new().scan_text(text)
}

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
