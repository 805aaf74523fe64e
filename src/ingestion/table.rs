//! Parsing of the delimited window-activity export.
//!
//! Expects a header row with at least `Title`, `Begin` and `End`. Any other
//! column (typically `Type`) is ignored. Quoted fields may contain the
//! delimiter, newlines and `""` escapes. Every row must be exactly as wide
//! as the header.

use chrono::{DateTime, NaiveDateTime};
use log::{debug, info};

use crate::error::InputValidationError;
use crate::models::RawEvent;

const TITLE: &str = "Title";
const BEGIN: &str = "Begin";
const END: &str = "End";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a timestamp in any of the accepted layouts.
///
/// Offset-carrying values keep their local wall-clock time, so the calendar
/// date is the one the user saw.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_local());
        }
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Parse the uploaded table into events.
///
/// Fails on the first malformed row: a log with broken timestamps would
/// silently distort the duration ranking.
pub fn parse_log(text: &str, delimiter: char) -> Result<Vec<RawEvent>, InputValidationError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_records(text, delimiter).into_iter();

    let header = records.next().ok_or(InputValidationError::Empty)?;
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| InputValidationError::MissingColumn(name.to_string()))
    };
    let title_idx = column(TITLE)?;
    let begin_idx = column(BEGIN)?;
    let end_idx = column(END)?;

    let mut events = Vec::new();
    let mut skipped = 0usize;

    for (i, fields) in records.enumerate() {
        let row = i + 1;
        if fields.len() != header.len() {
            return Err(InputValidationError::RowShape {
                row,
                expected: header.len(),
                found: fields.len(),
            });
        }

        // The title is kept verbatim: it is the grouping key downstream.
        let title = fields[title_idx].as_str();
        if title.trim().is_empty() {
            skipped += 1;
            continue;
        }

        let begin = timestamp_field(&fields[begin_idx], row, BEGIN)?;
        let end = timestamp_field(&fields[end_idx], row, END)?;
        if end < begin {
            return Err(InputValidationError::NegativeDuration {
                row,
                title: title.to_string(),
            });
        }

        events.push(RawEvent::new(title, begin, end));
    }

    if skipped > 0 {
        debug!("Skipped {} rows without a title", skipped);
    }
    if events.is_empty() {
        return Err(InputValidationError::Empty);
    }

    info!("Parsed {} events from uploaded log", events.len());
    Ok(events)
}

fn timestamp_field(
    raw: &str,
    row: usize,
    column: &'static str,
) -> Result<NaiveDateTime, InputValidationError> {
    parse_timestamp(raw).ok_or_else(|| InputValidationError::Timestamp {
        row,
        column,
        value: raw.to_string(),
    })
}

/// Split text into records of fields, honouring double-quoted fields.
/// Blank lines are dropped.
fn split_records(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            c if c == delimiter => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut fields));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, fields);
    }

    records
}

fn push_record(records: &mut Vec<Vec<String>>, fields: Vec<String>) {
    let blank = fields.iter().all(|f| f.trim().is_empty());
    if !blank {
        records.push(fields);
    }
}
