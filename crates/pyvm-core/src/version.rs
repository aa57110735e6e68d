//! Runtime version identifiers
//!
//! A [`RuntimeVersion`] is exactly three dot-separated numeric segments
//! (`major.minor.patch`). It doubles as the display identifier and as the
//! key used to name cache archives and runtime directories, so every
//! user-supplied version goes through [`RuntimeVersion::parse`] first.

use crate::error::{PyvmError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Validated `major.minor.patch` version
///
/// Segments are kept as digit strings with leading zeros stripped, so any
/// length of digits is accepted and still compares numerically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuntimeVersion {
    raw: String,
    parts: [String; 3],
}

impl RuntimeVersion {
    /// Parse and validate a free-form version string
    ///
    /// Surrounding whitespace is ignored. Each of the three segments must be
    /// a non-empty run of ASCII digits.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let segments: Vec<&str> = trimmed.split('.').collect();

        if segments.len() != 3 {
            return Err(PyvmError::InvalidVersion {
                input: input.to_string(),
                reason: format!("expected 3 segments, found {}", segments.len()),
            });
        }

        if let Some(bad) = segments
            .iter()
            .find(|segment| segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(PyvmError::InvalidVersion {
                input: input.to_string(),
                reason: format!("segment '{}' is not numeric", bad),
            });
        }

        Ok(Self {
            raw: trimmed.to_string(),
            parts: [
                normalize(segments[0]),
                normalize(segments[1]),
                normalize(segments[2]),
            ],
        })
    }

    pub fn major(&self) -> &str {
        &self.parts[0]
    }

    pub fn minor(&self) -> &str {
        &self.parts[1]
    }

    pub fn patch(&self) -> &str {
        &self.parts[2]
    }

    /// `major.minor`, as used in the installed interpreter name (`python3.12`)
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major(), self.minor())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn normalize(segment: &str) -> String {
    let stripped = segment.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Numeric order of two normalized digit strings
fn cmp_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl FromStr for RuntimeVersion {
    type Err = PyvmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RuntimeVersion {
    type Error = PyvmError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RuntimeVersion> for String {
    fn from(value: RuntimeVersion) -> Self {
        value.raw
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for RuntimeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for RuntimeVersion {}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RuntimeVersion {
    // Numeric first; raw text breaks ties such as "3.01.0" vs "3.1.0"
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts
            .iter()
            .zip(&other.parts)
            .map(|(a, b)| cmp_digits(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}
