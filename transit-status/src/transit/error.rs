//! Transit data source error types.

/// Errors from fetching departures for a station.
///
/// Any of these means "no data from this station this cycle", which is not
/// the same as a successful fetch that returned zero departures.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Station is unknown to the API
    #[error("station not found: {0}")]
    StationNotFound(String),

    /// Rate limited by the API
    #[error("rate limited by transit API")]
    RateLimited,

    /// Client could not be set up
    #[error("not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TransitError::RateLimited;
        assert_eq!(err.to_string(), "rate limited by transit API");

        let err = TransitError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = TransitError::StationNotFound("900000000".into());
        assert_eq!(err.to_string(), "station not found: 900000000");

        let err = TransitError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected value"));
    }
}
