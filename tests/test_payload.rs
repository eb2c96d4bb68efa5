//! Tests for the payload variants and their framing.

use transceiver::http::message::Message;
use transceiver::http::mime::ContentType;
use transceiver::http::parser::ByteCursor;
use transceiver::http::payload::Payload;

#[test]
fn test_variant_specific_emptiness() {
    assert!(Payload::Text(String::new()).is_empty());
    assert!(!Payload::Text("x".to_string()).is_empty());
    assert!(Payload::Binary(Vec::new()).is_empty());
    assert!(
        Payload::Multipart {
            boundary: "B".to_string(),
            parts: Vec::new(),
        }
        .is_empty()
    );
}

#[test]
fn test_text_byte_len_is_utf8_length() {
    assert_eq!(Payload::Text("héllo".to_string()).byte_len(), 6);
}

#[test]
fn test_text_parse_reads_to_end_without_boundary() {
    let mut cursor = ByteCursor::new(b"line one\r\nline two");
    let payload = Payload::parse_text(&mut cursor, None);
    assert_eq!(payload, Payload::Text("line one\r\nline two".to_string()));
}

#[test]
fn test_text_parse_stops_at_boundary_line_without_consuming() {
    let mut cursor = ByteCursor::new(b"content line\r\n--B1\r\nafter");
    let payload = Payload::parse_text(&mut cursor, Some("B1"));
    assert_eq!(payload, Payload::Text("content line".to_string()));
    // The delimiter line is peeked, not consumed.
    assert_eq!(cursor.peek_line().as_deref(), Some("--B1"));
}

#[test]
fn test_text_parse_ignores_inline_boundary_substring() {
    let mut cursor = ByteCursor::new(b"mentions B1 mid-line\r\nand --B1 too\r\n--B1\r\n");
    let payload = Payload::parse_text(&mut cursor, Some("B1"));
    assert_eq!(
        payload,
        Payload::Text("mentions B1 mid-line\r\nand --B1 too".to_string())
    );
}

#[test]
fn test_text_parse_stops_at_terminator_line() {
    let mut cursor = ByteCursor::new(b"content\r\n--B1--\r\n");
    let payload = Payload::parse_text(&mut cursor, Some("B1"));
    assert_eq!(payload, Payload::Text("content".to_string()));
}

#[test]
fn test_binary_parse_reads_to_end_without_boundary() {
    let bytes = [0u8, 159, 146, 150];
    let mut cursor = ByteCursor::new(&bytes);
    let payload = Payload::parse_binary(&mut cursor, None);
    assert_eq!(payload, Payload::Binary(bytes.to_vec()));
}

#[test]
fn test_binary_parse_stops_at_boundary_match() {
    let mut cursor = ByteCursor::new(b"\x00\x01\x02BOUND tail");
    let payload = Payload::parse_binary(&mut cursor, Some("BOUND"));
    assert_eq!(payload, Payload::Binary(vec![0, 1, 2]));
}

#[test]
fn test_multipart_round_trip() {
    let mut text_part = Message::new();
    text_part.set_text(
        ContentType::text_plain(),
        "first part\r\nmentions B1 inline without being a boundary",
    );
    let mut binary_part = Message::new();
    binary_part.set_binary(ContentType::octet_stream(), vec![1, 2, 3, 4]);

    let payload = Payload::Multipart {
        boundary: "B1".to_string(),
        parts: vec![text_part.clone(), binary_part.clone()],
    };
    let mut wire = Vec::new();
    payload.write_to(&mut wire);

    let parsed = Payload::parse_multipart(&mut ByteCursor::new(&wire), "B1").unwrap();
    let Payload::Multipart { boundary, parts } = parsed else {
        panic!("expected a multipart payload");
    };
    assert_eq!(boundary, "B1");
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].payload, text_part.payload);
    assert_eq!(parts[1].payload, binary_part.payload);
}

#[test]
fn test_multipart_binary_part_ending_in_crlf_round_trips() {
    let mut part = Message::new();
    part.set_binary(ContentType::octet_stream(), vec![1, 2, 13, 10]);
    let payload = Payload::Multipart {
        boundary: "B1".to_string(),
        parts: vec![part],
    };

    let mut wire = Vec::new();
    payload.write_to(&mut wire);
    let parsed = Payload::parse_multipart(&mut ByteCursor::new(&wire), "B1").unwrap();
    let Payload::Multipart { parts, .. } = parsed else {
        panic!("expected a multipart payload");
    };
    assert_eq!(parts[0].payload, Some(Payload::Binary(vec![1, 2, 13, 10])));
}

#[test]
fn test_text_parse_keeps_padded_delimiter_lookalike_as_content() {
    // Only a line that is exactly the delimiter stops the parse.
    let mut cursor = ByteCursor::new(b"  --B1  \r\n--B1\r\n");
    let payload = Payload::parse_text(&mut cursor, Some("B1"));
    assert_eq!(payload, Payload::Text("  --B1  ".to_string()));
    assert_eq!(cursor.peek_line().as_deref(), Some("--B1"));
}

#[test]
fn test_multipart_serialization_shape() {
    let mut part = Message::new();
    part.set_text(ContentType::text_plain(), "hi");
    let payload = Payload::Multipart {
        boundary: "B1".to_string(),
        parts: vec![part],
    };

    let mut wire = Vec::new();
    payload.write_to(&mut wire);
    let text = String::from_utf8(wire).unwrap();
    assert!(text.starts_with("--B1\r\n"));
    assert!(text.ends_with("--B1--\r\n"));
}

#[test]
fn test_multipart_byte_len_matches_serialization() {
    let mut part = Message::new();
    part.set_text(ContentType::text_plain(), "hi");
    let payload = Payload::Multipart {
        boundary: "B1".to_string(),
        parts: vec![part],
    };

    let mut wire = Vec::new();
    payload.write_to(&mut wire);
    assert_eq!(payload.byte_len(), wire.len());
}

#[test]
fn test_empty_multipart_is_just_the_terminator() {
    let payload = Payload::Multipart {
        boundary: "B1".to_string(),
        parts: Vec::new(),
    };
    let mut wire = Vec::new();
    payload.write_to(&mut wire);
    assert_eq!(wire, b"--B1--\r\n");
}
