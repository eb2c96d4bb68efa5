//! Tests for the ordered header multimap.

use transceiver::error::ParseError;
use transceiver::http::headers::HeaderMap;
use transceiver::http::parser::ByteCursor;

#[test]
fn test_append_accumulates_values() {
    let mut headers = HeaderMap::new();
    headers.append("X", "a");
    headers.append("X", "b");
    assert_eq!(headers.get("X").unwrap(), ["a", "b"]);
}

#[test]
fn test_replace_discards_prior_values() {
    let mut headers = HeaderMap::new();
    headers.append("X", "a");
    headers.append("X", "b");
    headers.replace("X", "c");
    assert_eq!(headers.get("X").unwrap(), ["c"]);
}

#[test]
fn test_ensure_present_is_noop_when_set() {
    let mut headers = HeaderMap::new();
    headers.append("Server", "custom");
    headers.ensure_present("Server", "default");
    assert_eq!(headers.get("Server").unwrap(), ["custom"]);

    headers.ensure_present("Host", "example.com");
    assert_eq!(headers.get("Host").unwrap(), ["example.com"]);
}

#[test]
fn test_lookup_is_case_sensitive() {
    let mut headers = HeaderMap::new();
    headers.append("Host", "example.com");
    assert!(headers.get("host").is_none());
}

#[test]
fn test_serialization_preserves_insertion_order() {
    let mut headers = HeaderMap::new();
    headers.append("B", "2");
    headers.append("A", "1");
    headers.append("B", "3");

    let mut buf = Vec::new();
    headers.write_to(&mut buf);
    assert_eq!(buf, b"B: 2\r\nB: 3\r\nA: 1\r\n\r\n");
}

#[test]
fn test_parse_splits_list_values_on_comma() {
    let raw = b"Accept: text/html, application/json\r\n\r\n";
    let headers = HeaderMap::parse(&mut ByteCursor::new(raw)).unwrap();
    assert_eq!(headers.get("Accept").unwrap(), ["text/html", "application/json"]);
}

#[test]
fn test_parse_keeps_date_values_whole() {
    let raw = b"Date: Tue, 03 Jun 2008 11:05:30 GMT\r\nIf-Modified-Since: Sat, 29 Oct 1994 19:43:31 GMT\r\n\r\n";
    let headers = HeaderMap::parse(&mut ByteCursor::new(raw)).unwrap();
    assert_eq!(headers.get("Date").unwrap(), ["Tue, 03 Jun 2008 11:05:30 GMT"]);
    assert_eq!(
        headers.get("If-Modified-Since").unwrap(),
        ["Sat, 29 Oct 1994 19:43:31 GMT"]
    );
}

#[test]
fn test_parse_rejects_colonless_line() {
    let raw = b"Host example.com\r\n\r\n";
    let err = HeaderMap::parse(&mut ByteCursor::new(raw)).unwrap_err();
    assert!(matches!(err, ParseError::MalformedHeaderLine(_)));
}

#[test]
fn test_parse_stops_at_blank_line() {
    let raw = b"Host: example.com\r\n\r\nNot-A-Header\r\n";
    let mut cursor = ByteCursor::new(raw);
    let headers = HeaderMap::parse(&mut cursor).unwrap();
    assert_eq!(headers.first("Host"), Some("example.com"));
    assert_eq!(cursor.remaining(), b"Not-A-Header\r\n");
}
