//! Network disruption status.

use std::fmt;

use serde::Serialize;

/// Overall disruption severity of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Disruption at or below the degraded threshold.
    Fine,
    /// Disruption above the degraded threshold.
    Degraded,
    /// Disruption above the fucked threshold.
    Fucked,
    /// No data, or data too old to trust.
    #[default]
    Unknown,
}

impl Status {
    /// All status values, in severity order.
    pub const ALL: [Status; 4] = [
        Status::Fine,
        Status::Degraded,
        Status::Fucked,
        Status::Unknown,
    ];

    /// Lowercase label used on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Fine => "fine",
            Status::Degraded => "degraded",
            Status::Fucked => "fucked",
            Status::Unknown => "unknown",
        }
    }

    /// Parse a label, falling back to `Unknown` for anything unrecognised.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "fine" | "normal" => Status::Fine,
            "degraded" => Status::Degraded,
            "fucked" => Status::Fucked,
            _ => Status::Unknown,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_roundtrip() {
        for status in Status::ALL {
            assert_eq!(Status::from_label(status.as_str()), status);
        }
    }

    #[test]
    fn unrecognised_label_is_unknown() {
        assert_eq!(Status::from_label("on fire"), Status::Unknown);
        assert_eq!(Status::from_label(""), Status::Unknown);
    }

    #[test]
    fn label_parse_is_lenient() {
        assert_eq!(Status::from_label(" DEGRADED "), Status::Degraded);
        assert_eq!(Status::from_label("normal"), Status::Fine);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Status::Fucked).unwrap(),
            "\"fucked\""
        );
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(Status::default(), Status::Unknown);
    }
}
