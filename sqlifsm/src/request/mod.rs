//! Minimal view over a raw HTTP request.
//!
//! Only as much structure is recovered as the field extractor needs: the
//! request line, header lines and the body. Nothing here validates the
//! request.

use thiserror::Error;

mod extract;
mod json;
mod query;

#[cfg(test)]
mod tests;

pub use extract::{extract, CandidateField, FieldExtractor, FieldSource};
pub use json::{escape_pointer_token, JsonLeaves};
pub use query::{decode_component, parse_query, QueryPairs};

/// A problem met while harvesting fields. Never fatal: the affected source
/// yields no fields and extraction carries on with the rest.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the body is decoded into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// `application/x-www-form-urlencoded`
    Form,
    /// `application/json`
    Json,
    /// Anything else, or no `Content-Type`. The body is not scanned.
    Other,
}

impl ContentKind {
    /// Classifies a `Content-Type` value by its media type, ignoring
    /// parameters and case.
    pub fn from_header(value: &str) -> ContentKind {
        let media_type = value.split(';').next().unwrap_or_default().trim();
        if media_type.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            ContentKind::Form
        } else if media_type.eq_ignore_ascii_case("application/json") {
            ContentKind::Json
        } else {
            ContentKind::Other
        }
    }
}

/// Method and target of the first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub target: &'a str,
    pub version: Option<&'a str>,
}

impl<'a> RequestLine<'a> {
    pub fn parse(line: &'a str) -> Result<Self, ExtractError> {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(method), Some(target)) => Ok(RequestLine {
                method,
                target,
                version: parts.next(),
            }),
            _ => Err(ExtractError::MalformedRequestLine(line.to_string())),
        }
    }

    /// Query component of the target: after the first `?`, fragment removed.
    /// `None` when there is no query or it is empty.
    pub fn query(&self) -> Option<&'a str> {
        let without_fragment = match self.target.split_once('#') {
            Some((before, _)) => before,
            None => self.target,
        };
        without_fragment
            .split_once('?')
            .map(|(_, query)| query)
            .filter(|query| !query.is_empty())
    }
}

/// Borrowed split of a raw request into head and body.
#[derive(Debug, Clone)]
pub struct HttpRequest<'a> {
    request_line: &'a str,
    header_lines: Vec<&'a str>,
    body: Option<&'a str>,
}

impl<'a> HttpRequest<'a> {
    /// Splits at the first blank line. Both `\n\n` and `\r\n\r\n` count,
    /// whichever comes first.
    pub fn parse(raw: &'a str) -> Self {
        let (head, body) = split_head_body(raw);
        let mut lines = head.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));
        let request_line = lines.next().unwrap_or_default();
        HttpRequest {
            request_line,
            header_lines: lines.collect(),
            body: body.filter(|body| !body.is_empty()),
        }
    }

    pub fn request_line(&self) -> Result<RequestLine<'a>, ExtractError> {
        RequestLine::parse(self.request_line)
    }

    pub fn header_lines(&self) -> &[&'a str] {
        &self.header_lines
    }

    /// `(name, value)` pairs, both trimmed. Lines without a colon are skipped.
    pub fn headers(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.header_lines.iter().filter_map(|line| {
            line.split_once(':')
                .map(|(name, value)| (name.trim(), value.trim()))
        })
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn content_kind(&self) -> ContentKind {
        self.header("content-type")
            .map(ContentKind::from_header)
            .unwrap_or(ContentKind::Other)
    }

    /// The body, if present and non-empty.
    pub fn body(&self) -> Option<&'a str> {
        self.body
    }
}

fn split_head_body(raw: &str) -> (&str, Option<&str>) {
    let lf = raw.find("\n\n").map(|at| (at, 2));
    let crlf = raw.find("\r\n\r\n").map(|at| (at, 4));
    let boundary = match (lf, crlf) {
        (Some(lf), Some(crlf)) => Some(if crlf.0 < lf.0 { crlf } else { lf }),
        (lf, crlf) => lf.or(crlf),
    };
    match boundary {
        Some((at, len)) => (&raw[..at], Some(&raw[at + len..])),
        None => (raw, None),
    }
}
