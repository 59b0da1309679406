//! Slot value object - a bookable time-of-day label.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A bookable time-of-day value for a given vendor and date.
///
/// Slots carry a zero-padded 24-hour `HH:MM` label ("09:00", "14:30").
/// Lexical comparison of that form matches chronological order, so ordered
/// slot collections can sort on the label directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(String);

impl Slot {
    /// Creates a slot from an `HH:MM` label, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the trimmed label is empty
    /// - `InvalidFormat` if the label is not a zero-padded 24-hour time
    pub fn new(label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("slot"));
        }
        if !Self::is_valid_label(trimmed) {
            return Err(ValidationError::invalid_format(
                "slot",
                "expected zero-padded 24-hour HH:MM",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the slot label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the slot, returning the label.
    pub fn into_string(self) -> String {
        self.0
    }

    fn is_valid_label(label: &str) -> bool {
        let bytes = label.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return false;
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        hour <= 23 && minute <= 59
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
