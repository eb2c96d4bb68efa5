//! Tests for content-type classification.

use transceiver::error::ParseError;
use transceiver::http::mime::{self, ContentType};

#[test]
fn test_text_type_is_always_text() {
    assert!(mime::is_text("text", "plain"));
    assert!(mime::is_text("text", "completely-novel-subtype"));
}

#[test]
fn test_known_binary_subtypes() {
    assert!(!mime::is_text("application", "octet-stream"));
    assert!(!mime::is_text("image", "png"));
}

#[test]
fn test_known_text_subtypes() {
    assert!(mime::is_text("application", "json"));
    assert!(mime::is_text("application", "javascript"));
    assert!(mime::is_text("application", "csv"));
}

#[test]
fn test_unknown_defaults_to_binary() {
    assert!(!mime::is_text("bogus", "type"));
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert!(!mime::is_text("application", "JSON"));
}

#[test]
fn test_multipart_detection() {
    assert!(mime::is_multipart("multipart"));
    assert!(!mime::is_multipart("text"));
    assert!(!mime::is_text("multipart", "plain"));
}

#[test]
fn test_parse_and_render_round_trip() {
    let content = ContentType::parse("application/json");
    assert_eq!(content.kind, "application");
    assert_eq!(content.subtype, "json");
    assert_eq!(content.header_value(), "application/json");
}

#[test]
fn test_parse_tolerates_missing_subtype() {
    let content = ContentType::parse("text");
    assert_eq!(content.kind, "text");
    assert_eq!(content.subtype, "");
    assert_eq!(content.header_value(), "text");
}

#[test]
fn test_multipart_boundary_extraction() {
    let content = ContentType::parse("multipart/mixed; boundary=B1");
    assert_eq!(content.multipart_boundary().unwrap(), "B1");
}

#[test]
fn test_multipart_boundary_stops_at_next_parameter() {
    let content = ContentType::parse("multipart/mixed; boundary=B1; charset=utf-8");
    assert_eq!(content.multipart_boundary().unwrap(), "B1");
}

#[test]
fn test_multipart_boundary_missing_parameter() {
    let content = ContentType::parse("multipart/mixed");
    assert!(matches!(
        content.multipart_boundary(),
        Err(ParseError::MissingMultipartBoundary)
    ));
}

#[test]
fn test_boundary_on_non_multipart_type() {
    let content = ContentType::parse("text/plain");
    assert!(matches!(
        content.multipart_boundary(),
        Err(ParseError::MissingMultipartBoundary)
    ));
}

#[test]
fn test_bare_subtype_strips_parameters() {
    let content = ContentType::parse("multipart/mixed; boundary=B1");
    assert_eq!(content.bare_subtype(), "mixed");
}
