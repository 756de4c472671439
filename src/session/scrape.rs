//! Markup scraping for the legacy console pages
//!
//! The legacy UI offers no structured endpoint for the session token or the
//! key identifier, so both are pulled out of the inventory page line by
//! line. The token extraction must match what the console emits exactly:
//! first marker line, strip `<>"'\`, keep whatever follows the last `=`.

use quick_xml::{Reader, events::Event};
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    Error, Result,
    types::{KeyId, RecoveryKey, SessionToken},
};

/// Substring identifying the line that carries the session token
pub const SESSION_TOKEN_MARKER: &str = "session-token";

/// Substring identifying the line with the "show key" action
pub const KEY_MARKER: &str = "SHOW_KEY";

/// Element holding the key in the ajax XML response
pub const INDIVIDUAL_KEY_ELEMENT: &str = "individualKey";

const STRIPPED_CHARS: [char; 5] = ['<', '>', '"', '\'', '\\'];

// `\r\n`, a bare `\r` and `\n` all end a line
const LINE_BREAKS: [char; 2] = ['\r', '\n'];

// `retrieveFV2Key(77,` with the paren either literal or HTML-encoded
static KEY_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"retrieveFV2Key(?:\(|&#x28;|&#40;)\s*([0-9]+)\s*,").expect("valid key id pattern")
});

/// Extract the session token from an inventory page.
///
/// Only the first line containing [`SESSION_TOKEN_MARKER`] is considered.
pub fn extract_session_token(page: &str) -> Result<SessionToken> {
    let line = page
        .split(LINE_BREAKS)
        .find(|line| line.contains(SESSION_TOKEN_MARKER))
        .ok_or(Error::SessionTokenNotFound)?;

    let cleaned: String = line
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();

    let token = cleaned.rsplit('=').next().unwrap_or_default();
    SessionToken::new(token).ok_or(Error::SessionTokenNotFound)
}

/// Extract the FileVault key identifier from an inventory page.
///
/// Fails with [`Error::KeyIdNotFound`] when the device has no escrowed key.
pub fn extract_key_id(page: &str) -> Result<KeyId> {
    page.split(LINE_BREAKS)
        .filter(|line| line.contains(KEY_MARKER))
        .find_map(|line| KEY_ID_PATTERN.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| KeyId::new(m.as_str()))
        .ok_or(Error::KeyIdNotFound)
}

/// Read the text of the first [`INDIVIDUAL_KEY_ELEMENT`] element.
///
/// Only text directly inside the element counts; text in child elements is
/// ignored.
pub fn extract_individual_key(xml: &str) -> Result<RecoveryKey> {
    let mut reader = Reader::from_str(xml);
    // 0 outside the element, 1 directly inside it, deeper within children
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e)
                if depth == 0 && e.local_name().as_ref() == INDIVIDUAL_KEY_ELEMENT.as_bytes() =>
            {
                depth = 1;
            }
            Event::Start(_) if depth > 0 => depth += 1,
            Event::End(_) if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Err(Error::KeyNotFound);
                }
            }
            Event::Text(text) if depth == 1 => {
                let text = text.unescape()?;
                let key = text.trim();
                if !key.is_empty() {
                    return Ok(RecoveryKey::new(key));
                }
            }
            Event::CData(data) if depth == 1 => {
                let data = data.into_inner();
                let key = String::from_utf8_lossy(&data);
                let key = key.trim();
                if !key.is_empty() {
                    return Ok(RecoveryKey::new(key));
                }
            }
            Event::Eof => return Err(Error::KeyNotFound),
            _ => {}
        }
    }
}
