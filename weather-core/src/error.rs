//! Classification of weather fetch failures into user-facing messages.

use reqwest::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The provider does not know the location.
    NotFound,
    /// Invalid or missing API key.
    Unauthorized,
    /// Any other non-2xx response.
    ServerError(u16),
    /// The request went out but no response came back.
    NetworkUnavailable,
    /// The request could not be built or sent.
    RequestSetup,
    /// 2xx response whose body does not match the expected schema.
    InvalidResponse,
    Unknown,
}

impl ErrorKind {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
            other => ErrorKind::ServerError(other.as_u16()),
        }
    }

    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            ErrorKind::RequestSetup
        } else if err.is_decode() {
            ErrorKind::InvalidResponse
        } else {
            ErrorKind::NetworkUnavailable
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ErrorKind::NotFound => "City not found. Please try another city.".to_string(),
            ErrorKind::Unauthorized => {
                "Invalid API key. Please check your configuration.".to_string()
            }
            ErrorKind::ServerError(status) => format!("Server error: {status}"),
            ErrorKind::NetworkUnavailable => {
                "No response from server. Please check your internet connection.".to_string()
            }
            ErrorKind::RequestSetup => {
                "Error setting up the request. Please try again.".to_string()
            }
            ErrorKind::InvalidResponse => {
                "Unexpected response from the weather service. Please try again.".to_string()
            }
            ErrorKind::Unknown => "Failed to fetch weather data. Please try again.".to_string(),
        }
    }

    /// Rank used to pick one error when both requests of a query fail.
    pub fn priority(&self) -> u8 {
        match self {
            ErrorKind::Unauthorized => 6,
            ErrorKind::NotFound => 5,
            ErrorKind::ServerError(_) => 4,
            ErrorKind::InvalidResponse => 3,
            ErrorKind::NetworkUnavailable => 2,
            ErrorKind::RequestSetup => 1,
            ErrorKind::Unknown => 0,
        }
    }
}

/// A failed query: its classification plus the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, message: kind.user_message() }
    }

    /// Keeps whichever of the two errors ranks higher; ties keep `self`.
    pub fn prefer(self, other: FetchError) -> FetchError {
        if other.kind.priority() > self.kind.priority() { other } else { self }
    }
}

impl From<ErrorKind> for FetchError {
    fn from(kind: ErrorKind) -> Self {
        FetchError::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(ErrorKind::from_status(StatusCode::NOT_FOUND), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(StatusCode::UNAUTHORIZED), ErrorKind::Unauthorized);
        assert_eq!(
            ErrorKind::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorKind::ServerError(500)
        );
        assert_eq!(
            ErrorKind::from_status(StatusCode::TOO_MANY_REQUESTS),
            ErrorKind::ServerError(429)
        );
    }

    #[test]
    fn messages_are_distinct_per_kind() {
        let kinds = [
            ErrorKind::NotFound,
            ErrorKind::Unauthorized,
            ErrorKind::ServerError(502),
            ErrorKind::NetworkUnavailable,
            ErrorKind::RequestSetup,
            ErrorKind::InvalidResponse,
            ErrorKind::Unknown,
        ];
        let mut messages: Vec<String> = kinds.iter().map(ErrorKind::user_message).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), kinds.len());
    }

    #[test]
    fn server_error_message_carries_status() {
        assert_eq!(ErrorKind::ServerError(503).user_message(), "Server error: 503");
    }

    #[test]
    fn prefer_picks_higher_priority() {
        let not_found = FetchError::new(ErrorKind::NotFound);
        let unauthorized = FetchError::new(ErrorKind::Unauthorized);

        assert_eq!(not_found.clone().prefer(unauthorized.clone()).kind, ErrorKind::Unauthorized);
        assert_eq!(unauthorized.prefer(not_found).kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn prefer_keeps_first_on_tie() {
        let first = FetchError::new(ErrorKind::ServerError(500));
        let second = FetchError::new(ErrorKind::ServerError(502));
        assert_eq!(first.prefer(second).kind, ErrorKind::ServerError(500));
    }

    #[test]
    fn display_is_user_message() {
        let err = FetchError::from(ErrorKind::NotFound);
        assert_eq!(err.to_string(), "City not found. Please try another city.");
    }
}
