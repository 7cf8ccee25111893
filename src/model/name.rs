use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;

/// Maximum polygon name length, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// A validated polygon name.
///
/// Surrounding whitespace is trimmed; the remainder must be non-empty, at
/// most [`MAX_NAME_LENGTH`] characters, and use only ASCII letters, digits,
/// whitespace, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PolygonName(String);

impl PolygonName {
    /// Validates and normalizes a raw name.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first rule the name breaks.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let length = name.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ValidationError::NameTooLong {
                length,
                max: MAX_NAME_LENGTH,
            });
        }
        if !name.chars().all(is_name_char) {
            return Err(ValidationError::InvalidNameCharacters(name.to_owned()));
        }
        Ok(Self(name.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c.is_whitespace()
}

impl fmt::Display for PolygonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PolygonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PolygonName {
    type Error = ValidationError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_parcel_names() {
        for raw in ["Parcel-A", "lot_12", "Block 7 North", "A"] {
            assert_eq!(PolygonName::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(PolygonName::parse("  Parcel-B \t").unwrap().as_str(), "Parcel-B");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(PolygonName::parse(""), Err(ValidationError::EmptyName));
        assert_eq!(PolygonName::parse("   "), Err(ValidationError::EmptyName));
    }

    #[test]
    fn rejects_long_names() {
        let ok = "x".repeat(MAX_NAME_LENGTH);
        assert!(PolygonName::parse(&ok).is_ok());

        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            PolygonName::parse(&long),
            Err(ValidationError::NameTooLong {
                length: MAX_NAME_LENGTH + 1,
                max: MAX_NAME_LENGTH
            })
        );
    }

    #[test]
    fn rejects_restricted_characters() {
        for raw in ["Parcel/1", "lot#3", "Ünterfeld", "a;DROP TABLE"] {
            assert!(matches!(
                PolygonName::parse(raw),
                Err(ValidationError::InvalidNameCharacters(_))
            ));
        }
    }
}
