//! Ordered, case-sensitive header multimap.
//!
//! A header name may legally repeat (`Set-Cookie` being the classic case),
//! so each name maps to an ordered list of values. Insertion order is
//! preserved for serialization; lookups are exact and case-sensitive.

use chrono::Utc;

use crate::error::ParseError;
use crate::http::parser::ByteCursor;

pub const DATE_HEADER: &str = "Date";
pub const SERVER_HEADER: &str = "Server";
pub const HOST_HEADER: &str = "Host";
pub const CONTENT_LENGTH_HEADER: &str = "Content-Length";

/// Header names whose value is a single date-like string. Their values
/// contain commas that are not list separators and must not be split.
const SINGLE_VALUE_DATE_HEADERS: [&str; 6] = [
    "Date",
    "Last-Modified",
    "Expires",
    "Accept-Datetime",
    "If-Modified-Since",
    "If-Unmodified-Since",
];

/// The current time rendered RFC-1123 style in GMT, as HTTP dates require.
pub fn http_date() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// An insertion-ordered multimap of header name to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values)
    }

    /// Adds a value without removing existing entries for the name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.append_all(name, vec![value.into()]);
    }

    /// Adds several values without removing existing entries for the name.
    pub fn append_all(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        match self.entry_mut(&name) {
            Some(existing) => existing.extend(values),
            None => self.entries.push((name, values)),
        }
    }

    /// Discards all prior values for the name, then stores the one value.
    /// Used for computed headers (`Date`, `Host`, `Content-Length`) that
    /// must not duplicate.
    pub fn replace(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entry_mut(&name) {
            Some(existing) => {
                existing.clear();
                existing.push(value);
            }
            None => self.entries.push((name, vec![value])),
        }
    }

    /// No-op when the name already has a value, else `replace`.
    pub fn ensure_present(&mut self, name: &str, default: impl Into<String>) {
        if self.get(name).is_none() {
            self.replace(name, default);
        }
    }

    /// All values stored for the name, in insertion order.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
    }

    /// The first value stored for the name.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|values| values.first()).map(String::as_str)
    }

    /// Removes and returns all values for the name.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Emits one `name: value` CRLF line per stored value in insertion
    /// order, then the blank-line terminator.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        for (name, values) in &self.entries {
            for value in values {
                buf.extend_from_slice(name.as_bytes());
                buf.extend_from_slice(b": ");
                buf.extend_from_slice(value.as_bytes());
                buf.extend_from_slice(b"\r\n");
            }
        }
        buf.extend_from_slice(b"\r\n");
    }

    /// Reads header lines until the blank terminator line.
    ///
    /// Date-like headers keep their value whole; all other values are split
    /// on `,` into a list. A non-blank line with no colon is malformed
    /// rather than silently dropped.
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self, ParseError> {
        let mut headers = Self::new();
        while let Some(line) = cursor.read_line() {
            if line.trim().is_empty() {
                break;
            }
            let (name, raw_value) = line
                .split_once(':')
                .ok_or_else(|| ParseError::MalformedHeaderLine(line.clone()))?;
            let name = name.trim().to_string();
            let raw_value = raw_value.trim();
            if SINGLE_VALUE_DATE_HEADERS.contains(&name.as_str()) {
                headers.append(name, raw_value);
            } else {
                let values = raw_value
                    .split(',')
                    .map(|value| value.trim().to_string())
                    .collect();
                headers.append_all(name, values);
            }
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_existing_values() {
        let mut headers = HeaderMap::new();
        headers.append("X", "a");
        headers.append("X", "b");
        assert_eq!(headers.get("X").unwrap(), ["a", "b"]);
    }

    #[test]
    fn replace_discards_existing_values() {
        let mut headers = HeaderMap::new();
        headers.append("X", "a");
        headers.append("X", "b");
        headers.replace("X", "c");
        assert_eq!(headers.get("X").unwrap(), ["c"]);
    }

    #[test]
    fn date_headers_keep_commas() {
        let raw = b"Date: Tue, 03 Jun 2008 11:05:30 GMT\r\nAccept: text/html, application/json\r\n\r\n";
        let headers = HeaderMap::parse(&mut ByteCursor::new(raw)).unwrap();
        assert_eq!(headers.get("Date").unwrap(), ["Tue, 03 Jun 2008 11:05:30 GMT"]);
        assert_eq!(headers.get("Accept").unwrap(), ["text/html", "application/json"]);
    }
}
