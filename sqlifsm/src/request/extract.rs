use std::borrow::Cow;
use std::fmt;

use tracing::debug;

use super::json::JsonLeaves;
use super::query::parse_query;
use super::{ContentKind, ExtractError, HttpRequest};

/// Where a candidate field came from. Diagnostic only; matching ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldSource {
    /// The undecoded query string.
    QueryString,
    /// A decoded query value, tagged with its parameter name.
    QueryParam(String),
    /// The undecoded form body.
    FormBody,
    /// A decoded form value, tagged with its field name.
    FormField(String),
    /// A JSON string leaf, tagged with its JSON pointer.
    JsonLeaf(String),
    /// A cookie value, tagged with the cookie name.
    Cookie(String),
    /// A header value, tagged with the header name as written.
    Header(String),
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSource::QueryString => write!(f, "query string"),
            FieldSource::QueryParam(name) => write!(f, "query param {name:?}"),
            FieldSource::FormBody => write!(f, "form body"),
            FieldSource::FormField(name) => write!(f, "form field {name:?}"),
            FieldSource::JsonLeaf(pointer) => write!(f, "json leaf {pointer:?}"),
            FieldSource::Cookie(name) => write!(f, "cookie {name:?}"),
            FieldSource::Header(name) => write!(f, "header {name:?}"),
        }
    }
}

/// A substring of the request handed to the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateField<'a> {
    pub source: FieldSource,
    pub value: Cow<'a, str>,
}

impl<'a> CandidateField<'a> {
    pub fn new(source: FieldSource, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            source,
            value: value.into(),
        }
    }

    pub fn into_owned(self) -> CandidateField<'static> {
        CandidateField {
            source: self.source,
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

impl fmt::Display for CandidateField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.source, self.value)
    }
}

/// Harvests candidate fields from one raw request.
///
/// Order: query string, query values, body (raw form plus form values, or
/// JSON string leaves), cookie values, then `User-Agent` and `Referer`.
/// Problems with one source are recorded in [`FieldExtractor::issues`] and
/// do not affect the other sources.
#[derive(Debug)]
pub struct FieldExtractor<'a> {
    request: HttpRequest<'a>,
    issues: Vec<ExtractError>,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            request: HttpRequest::parse(raw),
            issues: Vec::new(),
        }
    }

    /// Issues met by the last [`FieldExtractor::extract`] call.
    pub fn issues(&self) -> &[ExtractError] {
        &self.issues
    }

    pub fn extract(&mut self) -> Vec<CandidateField<'a>> {
        self.issues.clear();
        let mut fields = Vec::new();
        self.query_fields(&mut fields);
        self.body_fields(&mut fields);
        self.cookie_fields(&mut fields);
        self.header_fields(&mut fields);
        fields
    }

    fn query_fields(&mut self, fields: &mut Vec<CandidateField<'a>>) {
        let line = match self.request.request_line() {
            Ok(line) => line,
            Err(err) => {
                debug!(error = %err, "skipping query fields");
                self.issues.push(err);
                return;
            }
        };
        let Some(query) = line.query() else {
            return;
        };
        fields.push(CandidateField::new(FieldSource::QueryString, query));
        for (name, values) in parse_query(query) {
            fields.extend(
                values
                    .into_iter()
                    .map(|value| CandidateField::new(FieldSource::QueryParam(name.clone()), value)),
            );
        }
    }

    fn body_fields(&mut self, fields: &mut Vec<CandidateField<'a>>) {
        let Some(body) = self.request.body() else {
            return;
        };
        match self.request.content_kind() {
            ContentKind::Form => {
                fields.push(CandidateField::new(FieldSource::FormBody, body));
                for (name, values) in parse_query(body) {
                    fields.extend(values.into_iter().map(|value| {
                        CandidateField::new(FieldSource::FormField(name.clone()), value)
                    }));
                }
            }
            ContentKind::Json => match serde_json::from_str::<serde_json::Value>(body) {
                Ok(root) => {
                    fields.extend(JsonLeaves::new(&root).map(|(pointer, leaf)| {
                        CandidateField::new(FieldSource::JsonLeaf(pointer), leaf.to_string())
                    }));
                }
                Err(err) => {
                    debug!(error = %err, "skipping json body");
                    self.issues.push(ExtractError::Json(err));
                }
            },
            ContentKind::Other => {
                debug!("body not scanned: unrecognized content type");
            }
        }
    }

    fn cookie_fields(&self, fields: &mut Vec<CandidateField<'a>>) {
        for (name, value) in self.request.headers() {
            if !name.eq_ignore_ascii_case("cookie") {
                continue;
            }
            for cookie in value.split(';') {
                if let Some((cookie_name, cookie_value)) = cookie.split_once('=') {
                    fields.push(CandidateField::new(
                        FieldSource::Cookie(cookie_name.trim().to_string()),
                        cookie_value.trim(),
                    ));
                }
            }
        }
    }

    fn header_fields(&self, fields: &mut Vec<CandidateField<'a>>) {
        for (name, value) in self.request.headers() {
            if name.eq_ignore_ascii_case("user-agent") || name.eq_ignore_ascii_case("referer") {
                fields.push(CandidateField::new(FieldSource::Header(name.to_string()), value));
            }
        }
    }
}

/// Extracts every candidate field of `raw`, in scan order.
pub fn extract(raw: &str) -> Vec<CandidateField<'_>> {
    FieldExtractor::new(raw).extract()
}
