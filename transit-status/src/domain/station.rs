//! Station identifier types.

use std::fmt;

/// Maximum length accepted for a station identifier.
const MAX_LEN: usize = 32;

/// Error returned when parsing an invalid station ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station ID: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A HAFAS stop identifier, e.g. `900100003` for Berlin Alexanderplatz.
///
/// IDs are non-empty ASCII alphanumeric strings of at most 32 characters.
/// Since they end up in a URL path, this type guarantees that any
/// `StationId` value is safe to interpolate by construction.
///
/// # Examples
///
/// ```
/// use transit_status::domain::StationId;
///
/// let alex = StationId::parse("900100003").unwrap();
/// assert_eq!(alex.as_str(), "900100003");
///
/// // Path separators and whitespace are rejected
/// assert!(StationId::parse("900/100").is_err());
/// assert!(StationId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    /// Parse a station ID from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidStationId {
                reason: "must be at most 32 characters",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStationId {
                reason: "must be ASCII letters or digits",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Parse after trimming surrounding whitespace.
    ///
    /// Useful for comma-separated lists from the environment.
    pub fn parse_trimmed(s: &str) -> Result<Self, InvalidStationId> {
        Self::parse(s.trim())
    }

    /// Returns the station ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StationId::parse("900100003").is_ok());
        assert!(StationId::parse("900003201").is_ok());
        assert!(StationId::parse("de900100003").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StationId::parse("").is_err());
        assert!(StationId::parse_trimmed("   ").is_err());
    }

    #[test]
    fn reject_separators() {
        assert!(StationId::parse("900/100").is_err());
        assert!(StationId::parse("900 100").is_err());
        assert!(StationId::parse("900?x=1").is_err());
        assert!(StationId::parse("9001ö").is_err());
    }

    #[test]
    fn reject_too_long() {
        let long = "9".repeat(MAX_LEN + 1);
        assert!(StationId::parse(&long).is_err());
        assert!(StationId::parse(&"9".repeat(MAX_LEN)).is_ok());
    }

    #[test]
    fn trimmed_parse() {
        let id = StationId::parse_trimmed(" 900100003 ").unwrap();
        assert_eq!(id.as_str(), "900100003");
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::parse("900100003").unwrap();
        assert_eq!(format!("{}", id), "900100003");
        assert_eq!(format!("{:?}", id), "StationId(900100003)");
    }

    #[test]
    fn error_display() {
        let err = StationId::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid station ID: must not be empty");
    }
}
