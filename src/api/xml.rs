//! XML Decoding
//!
//! Shared helpers for turning Finstat XML bodies into result types. Wire
//! structs read every leaf as optional text; these helpers normalize it.

use crate::error::{FinstatError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;

/// Deserialize an XML document whose root element must be `root`
pub fn from_xml<T: DeserializeOwned>(body: &str, root: &str) -> Result<T> {
    if body.trim().is_empty() {
        return Err(FinstatError::Parse("empty response body".to_string()));
    }

    let found = root_name(body)?;
    if found != root {
        return Err(FinstatError::Parse(format!(
            "expected <{}> document, got <{}>",
            root, found
        )));
    }

    Ok(quick_xml::de::from_str(body)?)
}

/// Local name of the first element, skipping the prolog
fn root_name(body: &str) -> Result<String> {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Ok(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => {
                return Err(FinstatError::Parse("no root element".to_string()));
            }
            Ok(_) => {}
            Err(e) => return Err(FinstatError::Parse(e.to_string())),
        }
    }
}

/// Trimmed text, or `None` when missing or blank
pub fn text(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Boolean flag; missing or blank means `false`
pub fn flag(field: &str, value: Option<String>) -> Result<bool> {
    match text(value).as_deref() {
        None => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(FinstatError::Parse(format!(
            "invalid boolean '{}' in {}",
            v, field
        ))),
    }
}

/// Unsigned integer; missing or blank means `0`
pub fn number(field: &str, value: Option<String>) -> Result<u64> {
    match text(value) {
        None => Ok(0),
        Some(v) => v
            .parse::<u64>()
            .map_err(|_| FinstatError::Parse(format!("invalid number '{}' in {}", v, field))),
    }
}

/// Optional date-time.
///
/// Accepts local ISO date-times (`2001-03-15T00:00:00`, optional fraction),
/// RFC 3339 with offset (kept as the local wall time) and plain dates.
pub fn date(field: &str, value: Option<String>) -> Result<Option<NaiveDateTime>> {
    let Some(raw) = text(value) else {
        return Ok(None);
    };

    if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.naive_local()));
    }
    for format in ["%Y-%m-%d", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(&raw, format) {
            return Ok(d.and_hms_opt(0, 0, 0));
        }
    }

    Err(FinstatError::Parse(format!(
        "invalid date '{}' in {}",
        raw, field
    )))
}
