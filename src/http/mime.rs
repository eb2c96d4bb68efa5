//! Content-type classification.
//!
//! The registry is a fixed table mapping MIME subtypes to a textual/binary
//! flag, built once at first use and never mutated. Unknown tokens are
//! treated as binary: misclassifying text as binary only costs a copy, while
//! the reverse can corrupt data.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::ParseError;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
const BOUNDARY_PARAMETER: &str = "boundary=";

/// Subtypes with a known classification. Everything absent from this table
/// is binary.
static SUBTYPE_TABLE: LazyLock<HashMap<&'static str, bool>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    let mut put = |subtype: &'static str, is_text: bool| {
        table.insert(subtype, is_text);
    };
    put("base64", true);
    put("comma-separated-values", true);
    put("css", true);
    put("csv", true);
    put("ecmascript", true);
    put("html", true);
    put("java", true);
    put("javascript", true);
    put("json", true);
    put("pascal", true);
    put("plain", true);
    put("richtext", true);
    put("rtf", true);
    put("tab-separated-values", true);
    put("vrml", true);
    put("x-javascript", true);
    put("x-json", true);
    put("x-lisp", true);
    put("x-rtf", true);
    put("x-script.lisp", true);
    put("x-script.perl", true);
    put("x-vrml", true);
    put("avi", false);
    put("bmp", false);
    put("book", false);
    put("crescendo", false);
    put("excel", false);
    put("form-data", false);
    put("gif", false);
    put("java-byte-code", false);
    put("jpeg", false);
    put("mac-binary", false);
    put("macbinary", false);
    put("midi", false);
    put("mime", false);
    put("mixed", false);
    put("movie", false);
    put("mpeg", false);
    put("mpeg3", false);
    put("ms-powerpoint", false);
    put("mspowerpoint", false);
    put("msword", false);
    put("mswrite", false);
    put("octet-stream", false);
    put("pdf", false);
    put("png", false);
    put("postscript", false);
    put("powerpoint", false);
    put("quicktime", false);
    put("rn-realtext", false);
    put("tiff", false);
    put("vnd.ms-excel", false);
    put("vnd.ms-project", false);
    put("wav", false);
    put("wordperfect", false);
    put("wordperfect6.0", false);
    put("wordperfect6.1", false);
    put("x-bzip", false);
    put("x-bzip2", false);
    put("x-chat", false);
    put("x-compress", false);
    put("x-compressed", false);
    put("x-conference", false);
    put("x-dvi", false);
    put("x-excel", false);
    put("x-fortran", false);
    put("x-gzip", false);
    put("x-java-class", false);
    put("x-karaoke", false);
    put("x-mid", false);
    put("x-midi", false);
    put("x-motion-jpeg", false);
    put("x-mpeg", false);
    put("x-mpeg-3", false);
    put("x-mpeq2a", false);
    put("x-msexcel", false);
    put("x-pn-realaudio", false);
    put("x-pn-realaudio-plugin", false);
    put("x-quicktime", false);
    put("x-realaudio", false);
    put("x-tiff", false);
    put("x-visio", false);
    put("x-wav", false);
    put("x-world", false);
    put("x-www-form-urlencoded", false);
    put("x-xbitmap", false);
    put("x-xbm", false);
    put("x-xpixmap", false);
    put("x-zip", false);
    put("x-zip-compressed", false);
    put("xbm", false);
    put("xml", false);
    put("xpm", false);
    put("zip", false);
    table
});

/// Whether a `type/subtype` pair denotes textual content.
///
/// Type `text` is always textual and type `multipart` never is; otherwise
/// the subtype decides via an exact, case-sensitive lookup.
///
/// # Example
///
/// ```
/// # use transceiver::http::mime;
/// assert!(mime::is_text("text", "plain"));
/// assert!(mime::is_text("application", "json"));
/// assert!(!mime::is_text("application", "octet-stream"));
/// assert!(!mime::is_text("bogus", "type"));
/// ```
pub fn is_text(kind: &str, subtype: &str) -> bool {
    if kind == "multipart" {
        return false;
    }
    if kind == "text" {
        return true;
    }
    *SUBTYPE_TABLE.get(subtype).unwrap_or(&false)
}

/// True iff the type token is `multipart`.
pub fn is_multipart(kind: &str) -> bool {
    kind == "multipart"
}

/// A parsed `Content-Type` header value.
///
/// The subtype keeps any parameters verbatim (for multipart types the
/// `boundary=` parameter lives there), so rendering the descriptor back out
/// reproduces the original header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub kind: String,
    pub subtype: String,
}

impl ContentType {
    pub fn new(kind: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            subtype: subtype.into(),
        }
    }

    /// `text/plain`, the usual type for string payloads.
    pub fn text_plain() -> Self {
        Self::new("text", "plain")
    }

    /// `application/octet-stream`, the usual type for binary payloads.
    pub fn octet_stream() -> Self {
        Self::new("application", "octet-stream")
    }

    /// A multipart type carrying its boundary parameter,
    /// e.g. `multipart/mixed; boundary=B1`.
    pub fn multipart(subtype: &str, boundary: &str) -> Self {
        Self::new(
            "multipart",
            format!("{subtype}; {BOUNDARY_PARAMETER}{boundary}"),
        )
    }

    /// Splits a header value on the first `/`. A missing subtype is
    /// tolerated and left empty.
    pub fn parse(value: &str) -> Self {
        match value.split_once('/') {
            Some((kind, subtype)) => Self::new(kind.trim(), subtype.trim()),
            None => Self::new(value.trim(), ""),
        }
    }

    /// The subtype with any `;`-separated parameters removed, used for
    /// registry lookups.
    pub fn bare_subtype(&self) -> &str {
        self.subtype
            .split_once(';')
            .map(|(bare, _)| bare)
            .unwrap_or(&self.subtype)
            .trim()
    }

    pub fn is_multipart(&self) -> bool {
        is_multipart(&self.kind)
    }

    pub fn is_text(&self) -> bool {
        is_text(&self.kind, self.bare_subtype())
    }

    /// Extracts the `boundary=` parameter of a multipart type.
    pub fn multipart_boundary(&self) -> Result<&str, ParseError> {
        if !self.is_multipart() {
            return Err(ParseError::MissingMultipartBoundary);
        }
        let index = self
            .subtype
            .rfind(BOUNDARY_PARAMETER)
            .ok_or(ParseError::MissingMultipartBoundary)?;
        let value = &self.subtype[index + BOUNDARY_PARAMETER.len()..];
        // The boundary ends at the next parameter, not the end of the value.
        let value = value.split_once(';').map(|(b, _)| b).unwrap_or(value);
        Ok(value.trim())
    }

    /// Renders the header value, omitting the delimiter when there is no
    /// subtype.
    pub fn header_value(&self) -> String {
        if self.subtype.is_empty() {
            self.kind.clone()
        } else {
            format!("{}/{}", self.kind, self.subtype)
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.header_value())
    }
}
