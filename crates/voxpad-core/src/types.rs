use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VoxpadError;

// =============================================================================
// Locale
// =============================================================================

/// A supported language/region tag.
///
/// The same locale governs both the recognition grammar and the synthesis
/// voice. Recognition sessions are bound to one locale at creation, so
/// changing the selected locale forces a session rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// English as spoken in the United States.
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// Hindi.
    #[serde(rename = "hi-IN")]
    HiIn,
    /// Gujarati.
    #[serde(rename = "gu-IN")]
    GuIn,
}

impl Locale {
    /// All supported locales, in selector order.
    pub const ALL: [Locale; 3] = [Locale::EnUs, Locale::HiIn, Locale::GuIn];

    /// The BCP-47 tag handed to the speech engines.
    pub const fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::HiIn => "hi-IN",
            Locale::GuIn => "gu-IN",
        }
    }

    /// Human-readable name shown in the locale selector.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Locale::EnUs => "English (US)",
            Locale::HiIn => "Hindi",
            Locale::GuIn => "Gujarati",
        }
    }

    /// Parse a BCP-47 tag, case-insensitively. Returns `None` for tags
    /// outside the supported set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Locale::ALL
            .iter()
            .copied()
            .find(|locale| locale.tag().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = VoxpadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_tag(s).ok_or_else(|| VoxpadError::UnsupportedLocale { tag: s.to_string() })
    }
}

// =============================================================================
// Transcript
// =============================================================================

/// The accumulated user-visible text.
///
/// Mutable two ways: direct overwrite from the editing surface, or appending
/// a recognized utterance. Latest edit wins; there is no history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript(String);

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Replace the entire transcript with `text`.
    pub fn overwrite(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    /// Append a recognized utterance.
    ///
    /// Always inserts a single separating space before the utterance, even
    /// when the transcript is empty.
    pub fn append_utterance(&mut self, utterance: &str) {
        self.0.push(' ');
        self.0.push_str(utterance);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Transcript {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

// =============================================================================
// Timestamp
// =============================================================================

/// Unix timestamp in seconds.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

// =============================================================================
// Tests
// =============================================================================
