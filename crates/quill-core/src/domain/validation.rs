//! Schema validation for untrusted post payloads.
//!
//! Every field is checked and every failure is reported, so a client gets the
//! complete list of problems from a single request.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use super::{BlogPost, Category};

/// Kind of schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    InvalidEnumValue,
    InvalidUrl,
    InvalidDate,
}

/// A single field failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    /// Field path; empty when the payload itself has the wrong shape.
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    fn new(code: IssueCode, field: &str, message: impl Into<String>) -> Self {
        Self {
            code,
            path: vec![field.to_string()],
            message: message.into(),
        }
    }

    /// Name of the offending field, if the issue is tied to one.
    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

/// All issues found while validating a payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    /// Whether any issue names `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|i| i.field() == Some(field))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|i| format!("{}: {}", i.path.join("."), i.message))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collects issues while pulling typed fields out of a JSON object.
struct FieldReader<'a> {
    input: &'a Map<String, Value>,
    issues: Vec<ValidationIssue>,
}

impl<'a> FieldReader<'a> {
    fn new(input: &'a Map<String, Value>) -> Self {
        Self {
            input,
            issues: Vec::new(),
        }
    }

    fn required(&mut self, field: &str, expected: &str) -> Option<&'a Value> {
        match self.input.get(field) {
            Some(value) => Some(value),
            None => {
                self.issues.push(ValidationIssue::new(
                    IssueCode::InvalidType,
                    field,
                    format!("Required: expected {expected}"),
                ));
                None
            }
        }
    }

    fn mismatch(&mut self, field: &str, expected: &str, got: &Value) {
        self.issues.push(ValidationIssue::new(
            IssueCode::InvalidType,
            field,
            format!("Expected {expected}, received {}", type_name(got)),
        ));
    }

    fn string(&mut self, field: &str) -> Option<String> {
        let value = self.required(field, "string")?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.mismatch(field, "string", value);
                None
            }
        }
    }

    fn number(&mut self, field: &str) -> Option<f64> {
        let value = self.required(field, "number")?;
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.mismatch(field, "number", value);
                None
            }
        }
    }

    fn optional_bool(&mut self, field: &str) -> Option<bool> {
        let value = self.input.get(field)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.mismatch(field, "boolean", value);
                None
            }
        }
    }

    fn category(&mut self, field: &str) -> Option<Category> {
        let raw = self.string(field)?;
        match raw.parse::<Category>() {
            Ok(category) => Some(category),
            Err(()) => {
                let expected: Vec<String> =
                    Category::ALL.iter().map(|c| format!("'{c}'")).collect();
                self.issues.push(ValidationIssue::new(
                    IssueCode::InvalidEnumValue,
                    field,
                    format!(
                        "Invalid enum value. Expected {}, received '{raw}'",
                        expected.join(" | ")
                    ),
                ));
                None
            }
        }
    }

    fn url(&mut self, field: &str) -> Option<String> {
        let raw = self.string(field)?;
        if is_absolute_url(&raw) {
            Some(raw)
        } else {
            self.issues
                .push(ValidationIssue::new(IssueCode::InvalidUrl, field, "Invalid url"));
            None
        }
    }

    fn date(&mut self, field: &str) -> Option<String> {
        let raw = self.string(field)?;
        if parse_calendar_date(&raw).is_some() {
            Some(raw)
        } else {
            self.issues.push(ValidationIssue::new(
                IssueCode::InvalidDate,
                field,
                "Invalid date format",
            ));
            None
        }
    }
}

impl BlogPost {
    /// Validate an untrusted JSON payload into a normalized post.
    ///
    /// Unknown fields, including any client-supplied `id`, are dropped.
    pub fn validate(input: &Value) -> Result<BlogPost, ValidationErrors> {
        let Some(object) = input.as_object() else {
            return Err(ValidationErrors(vec![ValidationIssue {
                code: IssueCode::InvalidType,
                path: Vec::new(),
                message: format!("Expected object, received {}", type_name(input)),
            }]));
        };

        let mut reader = FieldReader::new(object);
        let slug = reader.string("slug");
        let title = reader.string("title");
        let excerpt = reader.string("excerpt");
        let content = reader.string("content");
        let category = reader.category("category");
        let category_label = reader.string("categoryLabel");
        let featured_image = reader.url("featuredImage");
        let author = reader.string("author");
        let publish_date = reader.date("publishDate");
        let reading_time = reader.number("readingTime");
        let featured = reader.optional_bool("featured");

        // Every reader that yields `None` has recorded an issue, so the error
        // arm always carries at least one.
        match (
            slug,
            title,
            excerpt,
            content,
            category,
            category_label,
            featured_image,
            author,
            publish_date,
            reading_time,
        ) {
            (
                Some(slug),
                Some(title),
                Some(excerpt),
                Some(content),
                Some(category),
                Some(category_label),
                Some(featured_image),
                Some(author),
                Some(publish_date),
                Some(reading_time),
            ) if reader.issues.is_empty() => Ok(BlogPost {
                slug,
                title,
                excerpt,
                content,
                category,
                category_label,
                featured_image,
                author,
                publish_date,
                reading_time,
                featured,
            }),
            _ => {
                debug_assert!(!reader.issues.is_empty());
                Err(ValidationErrors(reader.issues))
            }
        }
    }
}

/// A URL with both a scheme and an authority component.
pub fn is_absolute_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| url.has_host() && !url.cannot_be_a_base())
        .unwrap_or(false)
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a, %d %b %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%a %b %d %Y",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%a %b %d %Y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

/// Zoned forms printed by browser `Date#toString`, after any trailing
/// `(Zone Name)` comment is removed.
const ZONED_FORMATS: &[&str] = &["%a %b %d %Y %H:%M:%S GMT%z", "%a %b %d %Y %H:%M:%S %z"];

/// Parse the common date notations accepted by web date parsers.
///
/// Returns the calendar day the input denotes. Callers only use this as a
/// validity check; the raw string is what gets stored.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    let unzoned = strip_zone_comment(s);
    if let Some(dt) = ZONED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(unzoned, fmt).ok())
    {
        return Some(dt.date_naive());
    }
    if let Some(date) = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(date.date());
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }

    // Reduced ISO forms: "YYYY" and "YYYY-MM".
    let bytes = s.as_bytes();
    let all_digits = |b: &[u8]| b.iter().all(u8::is_ascii_digit);
    match bytes.len() {
        4 if all_digits(bytes) => NaiveDate::parse_from_str(&format!("{s}-01-01"), "%Y-%m-%d").ok(),
        7 if all_digits(&bytes[..4]) && bytes[4] == b'-' && all_digits(&bytes[5..]) => {
            NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

/// Drop a trailing parenthesized zone name, e.g. `(Central European Time)`.
fn strip_zone_comment(s: &str) -> &str {
    match s.strip_suffix(')').and_then(|rest| rest.rfind('(').map(|i| &rest[..i])) {
        Some(head) => head.trim_end(),
        None => s,
    }
}
