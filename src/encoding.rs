//! Charset handling for saved comparison pages.
//!
//! Pages saved from the browser usually come as UTF-8, sometimes with a BOM,
//! and occasionally in a legacy charset declared through a meta tag. Bytes
//! are decoded to UTF-8 before parsing; invalid sequences become U+FFFD.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Bytes scanned for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset="...">` or `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+?charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("valid regex")
});

/// Charset label declared in the head of the document, if any.
fn declared_charset(head: &str) -> Option<&str> {
    META_CHARSET
        .captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Pick the encoding of a saved page.
///
/// A byte-order mark wins, then a meta declaration in the first kilobyte;
/// anything else is read as UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    declared_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode a saved page to a UTF-8 string.
///
/// # Examples
///
/// ```
/// use perflab_scrape::encoding::transcode_to_utf8;
///
/// let html = b"<html><body><p>1 / 4</p></body></html>";
/// assert!(transcode_to_utf8(html).contains("1 / 4"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        log::warn!("Invalid {} sequences replaced while decoding page", used.name());
    }
    decoded.into_owned()
}
