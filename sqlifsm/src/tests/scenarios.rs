// End-to-end scans of complete requests.

use crate::{scan_request, FieldSource, Scanner, Signature, SignatureSet};

const FORM_LOGIN: &str = "POST /login HTTP/1.1
Host: example.com
Content-Type: application/x-www-form-urlencoded
Content-Length: 36

username=admin&password=' OR '1'='1";

const QUERY_COMMENT: &str = "GET /search?id=1'-- HTTP/1.1
Host: example.com";

const QUERY_UNION: &str =
    "GET /search?id=1'%20UNION%20SELECT%20username,%20password%20FROM%20users-- HTTP/1.1
Host: example.com";

const JSON_STACKED: &str = "POST /api/update HTTP/1.1
Host: example.com
Content-Type: application/json
Content-Length: 44

{\"email\": \"test@ex.com'; DROP TABLE users; --\"}";

const FORM_BENIGN: &str = "POST /submit HTTP/1.1
Host: example.com
Content-Type: application/x-www-form-urlencoded
Content-Length: 33

description=Please select an option";

const COOKIE_TAUTOLOGY: &str = "GET /profile HTTP/1.1
Host: example.com
Cookie: session=abc' OR '1'='1";

#[test]
fn test_form_tautology() {
    let verdict = scan_request(FORM_LOGIN);
    assert!(verdict.is_malicious());
    assert_eq!(verdict.signature(), Some(Signature::Tautology));
    assert_eq!(verdict.field().unwrap().source, FieldSource::FormBody);
}

#[test]
fn test_query_comment() {
    let verdict = scan_request(QUERY_COMMENT);
    assert!(verdict.is_malicious());
    assert_eq!(verdict.signature(), Some(Signature::Comment));
    let detection = verdict.detection.unwrap();
    assert_eq!(detection.field.source, FieldSource::QueryString);
    assert_eq!(detection.field.value, "id=1'--");
    assert_eq!(detection.offset, 6);
}

#[test]
fn test_query_union_select() {
    let verdict = scan_request(QUERY_UNION);
    assert!(verdict.is_malicious());
    assert_eq!(verdict.signature(), Some(Signature::UnionSelect));
    // the raw query string is scanned before its decoded values
    assert_eq!(verdict.field().unwrap().source, FieldSource::QueryString);
    assert_eq!(verdict.fields_scanned, 1);
}

#[test]
fn test_json_stacked_query() {
    let verdict = scan_request(JSON_STACKED);
    assert!(verdict.is_malicious());
    assert!(matches!(
        verdict.signature(),
        Some(Signature::StackedQuery) | Some(Signature::Comment)
    ));
    assert_eq!(verdict.signature(), Some(Signature::StackedQuery));
    assert_eq!(
        verdict.field().unwrap().source,
        FieldSource::JsonLeaf("/email".into())
    );
}

#[test]
fn test_benign_form() {
    let verdict = scan_request(FORM_BENIGN);
    assert!(!verdict.is_malicious());
    assert_eq!(verdict.signature(), None);
    // raw body plus one decoded value
    assert_eq!(verdict.fields_scanned, 2);
}

#[test]
fn test_cookie_tautology() {
    let verdict = scan_request(COOKIE_TAUTOLOGY);
    assert!(verdict.is_malicious());
    assert_eq!(verdict.signature(), Some(Signature::Tautology));
    assert_eq!(
        verdict.field().unwrap().source,
        FieldSource::Cookie("session".into())
    );
}

#[test]
fn test_crlf_request() {
    let raw = "POST /login HTTP/1.1\r\n\
               Content-Type: application/x-www-form-urlencoded\r\n\
               \r\n\
               user=x&note=a%3B%20drop%20table%20t";
    let verdict = scan_request(raw);
    assert_eq!(verdict.signature(), Some(Signature::StackedQuery));
    assert_eq!(
        verdict.field().unwrap().source,
        FieldSource::FormField("note".into())
    );
}

#[test]
fn test_encoded_quote_in_raw_query_is_normalized() {
    let raw = "GET /item?id=1%27%20or%20%271%27=%271 HTTP/1.1";
    let verdict = scan_request(raw);
    assert_eq!(verdict.signature(), Some(Signature::Tautology));
    assert_eq!(verdict.field().unwrap().source, FieldSource::QueryString);
}

#[test]
fn test_header_payloads() {
    let raw = "GET / HTTP/1.1\nUser-Agent: sqlmap'; drop table x";
    let verdict = scan_request(raw);
    assert_eq!(verdict.signature(), Some(Signature::StackedQuery));
    assert_eq!(
        verdict.field().unwrap().source,
        FieldSource::Header("User-Agent".into())
    );

    let raw = "GET / HTTP/1.1\nReferer: http://evil/?q=1 union select 1";
    assert_eq!(scan_request(raw).signature(), Some(Signature::UnionSelect));
}

#[test]
fn test_unscanned_headers_are_ignored() {
    let raw = "GET / HTTP/1.1\nX-Custom: ' OR '1'='1\nHost: a--b";
    assert!(!scan_request(raw).is_malicious());
}

#[test]
fn test_browser_request_is_benign() {
    let raw = "GET /products?category=shoes&sort=price_asc&page=2 HTTP/1.1\r\n\
               Host: shop.example.com\r\n\
               User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
               AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36\r\n\
               Referer: https://shop.example.com/\r\n\
               Cookie: sid=8f14e45f; theme=dark; consent=yes\r\n\
               \r\n";
    let verdict = scan_request(raw);
    assert!(!verdict.is_malicious(), "{verdict:?}");
    assert_eq!(verdict.fields_scanned, 9);
}

#[test]
fn test_malformed_json_falls_through_to_cookies() {
    let raw = "POST /api HTTP/1.1\n\
               Content-Type: application/json\n\
               Cookie: s=1'--\n\n{\"a\": ";
    let verdict = scan_request(raw);
    assert_eq!(verdict.signature(), Some(Signature::Comment));
    assert_eq!(verdict.field().unwrap().source, FieldSource::Cookie("s".into()));
}

#[test]
fn test_disabled_family_is_not_reported() {
    let mut scanner =
        Scanner::new().with_signatures(SignatureSet::UNION_SELECT | SignatureSet::STACKED_QUERY);
    assert!(!scanner.scan(QUERY_COMMENT).is_malicious());
    assert!(!scanner.scan(COOKIE_TAUTOLOGY).is_malicious());
    assert_eq!(scanner.scan(QUERY_UNION).signature(), Some(Signature::UnionSelect));
}

#[test]
fn test_scanner_reuse_across_requests() {
    let mut scanner = Scanner::new();
    let requests = [
        FORM_LOGIN,
        QUERY_COMMENT,
        QUERY_UNION,
        JSON_STACKED,
        FORM_BENIGN,
        COOKIE_TAUTOLOGY,
    ];
    let expected = [true, true, true, true, false, true];
    for (raw, malicious) in requests.iter().zip(expected) {
        assert_eq!(scanner.scan(raw).is_malicious(), malicious, "{raw}");
    }
    // same answers from fresh scanners
    for (raw, malicious) in requests.iter().zip(expected) {
        assert_eq!(scan_request(raw).is_malicious(), malicious, "{raw}");
    }
}

#[test]
fn test_verdict_into_owned_outlives_request() {
    let verdict = {
        let raw = String::from("GET /?id=1'-- HTTP/1.1");
        scan_request(&raw).into_owned()
    };
    assert_eq!(verdict.field().unwrap().value, "id=1'--");
}
