#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::panic)]

use super::*;

fn values(fields: &[CandidateField<'_>]) -> Vec<String> {
    fields.iter().map(|f| f.value.to_string()).collect()
}

#[test]
fn test_split_lf_and_crlf() {
    let req = HttpRequest::parse("POST /a HTTP/1.1\nHost: x\n\nbody=1");
    assert_eq!(req.body(), Some("body=1"));
    assert_eq!(req.header_lines(), &["Host: x"]);

    let req = HttpRequest::parse("POST /a HTTP/1.1\r\nHost: x\r\n\r\nbody=1");
    assert_eq!(req.body(), Some("body=1"));
    assert_eq!(req.header("host"), Some("x"));
    assert_eq!(req.request_line().unwrap().method, "POST");
}

#[test]
fn test_body_split_at_first_blank_line_only() {
    let req = HttpRequest::parse("POST / HTTP/1.1\n\na\n\nb");
    assert_eq!(req.body(), Some("a\n\nb"));
}

#[test]
fn test_empty_body_is_absent() {
    let req = HttpRequest::parse("GET / HTTP/1.1\nHost: x\n\n");
    assert_eq!(req.body(), None);
    let req = HttpRequest::parse("GET / HTTP/1.1");
    assert_eq!(req.body(), None);
    assert!(req.header_lines().is_empty());
}

#[test]
fn test_request_line_query() {
    let line = RequestLine::parse("GET /search?id=1&x=2#frag HTTP/1.1").unwrap();
    assert_eq!(line.target, "/search?id=1&x=2#frag");
    assert_eq!(line.version, Some("HTTP/1.1"));
    assert_eq!(line.query(), Some("id=1&x=2"));

    let line = RequestLine::parse("GET http://host/p?a=b").unwrap();
    assert_eq!(line.query(), Some("a=b"));
    assert_eq!(line.version, None);

    assert_eq!(RequestLine::parse("GET /plain HTTP/1.1").unwrap().query(), None);
    assert_eq!(RequestLine::parse("GET /empty? HTTP/1.1").unwrap().query(), None);
}

#[test]
fn test_malformed_request_line() {
    assert!(matches!(
        RequestLine::parse("GARBAGE"),
        Err(ExtractError::MalformedRequestLine(line)) if line == "GARBAGE"
    ));
    assert!(RequestLine::parse("").is_err());
}

#[test]
fn test_content_kind() {
    assert_eq!(
        ContentKind::from_header("application/x-www-form-urlencoded"),
        ContentKind::Form
    );
    assert_eq!(
        ContentKind::from_header("Application/JSON; charset=utf-8"),
        ContentKind::Json
    );
    assert_eq!(ContentKind::from_header("text/plain"), ContentKind::Other);
    let req = HttpRequest::parse("POST / HTTP/1.1\ncontent-type: application/json\n\n{}");
    assert_eq!(req.content_kind(), ContentKind::Json);
    let req = HttpRequest::parse("POST / HTTP/1.1\n\n{}");
    assert_eq!(req.content_kind(), ContentKind::Other);
}

#[test]
fn test_parse_query_keeps_blank_values_and_groups_keys() {
    let pairs = parse_query("a=1&b=&a=2&c&&d=x%20y+z");
    let collected: Vec<(&str, Vec<&str>)> = pairs
        .iter()
        .map(|(name, values)| (name, values.iter().map(String::as_str).collect()))
        .collect();
    assert_eq!(
        collected,
        vec![
            ("a", vec!["1", "2"]),
            ("b", vec![""]),
            ("c", vec![""]),
            ("d", vec!["x y z"]),
        ]
    );
    assert_eq!(pairs.get("a").unwrap().len(), 2);
    assert!(pairs.get("missing").is_none());
}

#[test]
fn test_decode_component_is_lossy_not_fallible() {
    assert_eq!(decode_component("%27%20OR"), "' OR");
    assert_eq!(decode_component("100%"), "100%");
    assert_eq!(decode_component("%zz"), "%zz");
    assert_eq!(decode_component("%FF"), "\u{FFFD}");
    assert_eq!(decode_component("a=b"), "a=b");
}

#[test]
fn test_json_leaves_in_document_order() {
    let value: serde_json::Value = serde_json::from_str(
        concat!(
            r#"{"b": "first", "a": {"x": ["second", 3, null, {"y": "third"}]}, "#,
            r#""c/d~e": "fourth", "n": true}"#,
        ),
    )
    .unwrap();
    let leaves: Vec<(String, &str)> = JsonLeaves::new(&value).collect();
    assert_eq!(
        leaves,
        vec![
            ("/b".to_string(), "first"),
            ("/a/x/0".to_string(), "second"),
            ("/a/x/3/y".to_string(), "third"),
            ("/c~1d~0e".to_string(), "fourth"),
        ]
    );
}

#[test]
fn test_json_scalar_root() {
    let value = serde_json::Value::String("root".into());
    assert_eq!(JsonLeaves::new(&value).collect::<Vec<_>>(), vec![(String::new(), "root")]);
    let value = serde_json::json!(42);
    assert_eq!(JsonLeaves::new(&value).count(), 0);
}

#[test]
fn test_extract_order_and_sources() {
    let raw = "POST /login?next=%2Fhome&ref= HTTP/1.1\n\
               Host: example.com\n\
               Content-Type: application/x-www-form-urlencoded\n\
               Cookie: session=abc; theme=dark\n\
               User-Agent: curl/8.0\n\
               Referer: http://example.com/\n\
               \n\
               user=admin&pass=secret";
    let fields = extract(raw);
    let sources: Vec<FieldSource> = fields.iter().map(|f| f.source.clone()).collect();
    assert_eq!(
        sources,
        vec![
            FieldSource::QueryString,
            FieldSource::QueryParam("next".into()),
            FieldSource::QueryParam("ref".into()),
            FieldSource::FormBody,
            FieldSource::FormField("user".into()),
            FieldSource::FormField("pass".into()),
            FieldSource::Cookie("session".into()),
            FieldSource::Cookie("theme".into()),
            FieldSource::Header("User-Agent".into()),
            FieldSource::Header("Referer".into()),
        ]
    );
    assert_eq!(
        values(&fields),
        vec![
            "next=%2Fhome&ref=",
            "/home",
            "",
            "user=admin&pass=secret",
            "admin",
            "secret",
            "abc",
            "dark",
            "curl/8.0",
            "http://example.com/",
        ]
    );
}

#[test]
fn test_extract_json_body() {
    let raw = "POST /api HTTP/1.1\nContent-Type: application/json\n\n\
               {\"email\": \"a@b.c\", \"tags\": [\"x\", 1], \"nested\": {\"k\": \"v\"}}";
    let fields = extract(raw);
    assert_eq!(values(&fields), vec!["a@b.c", "x", "v"]);
    assert_eq!(fields[2].source, FieldSource::JsonLeaf("/nested/k".into()));
}

#[test]
fn test_bad_json_does_not_abort_other_sources() {
    let raw = "POST /api?q=1 HTTP/1.1\nContent-Type: application/json\nCookie: s=v\n\n{not json";
    let mut extractor = FieldExtractor::new(raw);
    let fields = extractor.extract();
    assert_eq!(values(&fields), vec!["q=1", "1", "v"]);
    assert_eq!(extractor.issues().len(), 1);
    assert!(matches!(extractor.issues()[0], ExtractError::Json(_)));
}

#[test]
fn test_malformed_request_line_still_yields_headers() {
    let raw = "BROKEN\nCookie: a=1\nUser-Agent: ua";
    let mut extractor = FieldExtractor::new(raw);
    let fields = extractor.extract();
    assert_eq!(values(&fields), vec!["1", "ua"]);
    assert!(matches!(
        extractor.issues(),
        [ExtractError::MalformedRequestLine(_)]
    ));
}

#[test]
fn test_unrecognized_content_type_skips_body() {
    let raw = "POST / HTTP/1.1\nContent-Type: text/plain\n\n' OR '1'='1";
    assert!(extract(raw).is_empty());
    let raw = "POST / HTTP/1.1\n\nid=1'--";
    assert!(extract(raw).is_empty());
}

#[test]
fn test_cookie_segments_without_equals_are_skipped() {
    let raw = "GET / HTTP/1.1\ncookie: flag; a = 1 ;b=x=y";
    let fields = extract(raw);
    assert_eq!(values(&fields), vec!["1", "x=y"]);
    assert_eq!(fields[0].source, FieldSource::Cookie("a".into()));
}

#[test]
fn test_every_cookie_header_is_used() {
    let raw = "GET / HTTP/1.1\nCookie: a=1\nCookie: b=2";
    assert_eq!(values(&extract(raw)), vec!["1", "2"]);
}

#[test]
fn test_raw_query_borrows_from_request() {
    let raw = "GET /?id=7 HTTP/1.1";
    let fields = extract(raw);
    assert!(matches!(fields[0].value, std::borrow::Cow::Borrowed("id=7")));
}

#[test]
fn test_field_source_display() {
    assert_eq!(FieldSource::QueryParam("id".into()).to_string(), "query param \"id\"");
    assert_eq!(FieldSource::QueryString.to_string(), "query string");
    let field = CandidateField::new(FieldSource::Cookie("s".into()), "v");
    assert_eq!(field.to_string(), "cookie \"s\": \"v\"");
}
