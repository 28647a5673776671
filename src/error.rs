//! Error types for the poller.

use thiserror::Error;

/// Fatal errors raised while assembling [`Settings`](crate::config::Settings).
///
/// These stop the process before the poll loop starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required credentials are absent or empty.
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    /// The configuration sources could not be read.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A duration setting could not be parsed.
    #[error("invalid duration for `{key}`: {value}")]
    InvalidDuration { key: String, value: String },
}

/// Broad classification of a [`PollError`].
///
/// The poll loop decides how to handle a failure from this, not from
/// the individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The status API could not be reached.
    Transport,
    /// The status API answered with a non-2xx status.
    ResponseStatus,
    /// The response body did not have the expected shape.
    Shape,
    /// The newest item carried a status code outside the verdict table.
    HomeworkStatus,
}

/// Errors raised during a single poll cycle.
#[derive(Debug, Error)]
pub enum PollError {
    /// Connection refused, DNS failure, timeout and similar.
    #[error("failed to reach {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API returned a non-success status code.
    #[error("API returned status {status} ({reason}): {body}")]
    ResponseStatus {
        status: u16,
        reason: String,
        body: String,
    },

    /// A value had a different JSON type than expected.
    #[error("expected {expected} for `{field}`, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A required key was absent (or, for names, empty).
    #[error("missing field `{0}` in API response")]
    MissingField(&'static str),

    /// The body of a successful response was not valid JSON.
    #[error("failed to decode API response: {0}")]
    Decode(String),

    /// The status code is not one of the known verdicts.
    #[error("unexpected homework status: {0}")]
    UnknownStatus(String),
}

impl PollError {
    /// Classify this error for the poll loop.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::Transport { .. } => ErrorKind::Transport,
            PollError::ResponseStatus { .. } => ErrorKind::ResponseStatus,
            PollError::TypeMismatch { .. } | PollError::MissingField(_) | PollError::Decode(_) => {
                ErrorKind::Shape
            }
            PollError::UnknownStatus(_) => ErrorKind::HomeworkStatus,
        }
    }
}

/// Failures while delivering a message. Never leaves the notifier.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The messaging API could not be reached.
    #[error("failed to reach messaging API: {0}")]
    Transport(#[source] reqwest::Error),

    /// The messaging API returned a non-success status code.
    #[error("messaging API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The messaging API answered with a body that is not a Bot API reply.
    #[error("failed to parse messaging API reply: {0}")]
    Decode(String),

    /// The messaging API accepted the request but refused the message.
    #[error("messaging API rejected the message: {0}")]
    Rejected(String),
}

/// An HTTP client could not be constructed.
///
/// Only raised while building the API client or notifier at startup, so it
/// never reaches the poll loop.
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] pub reqwest::Error);

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            PollError::MissingField("homeworks").kind(),
            ErrorKind::Shape
        );
        assert_eq!(
            PollError::Decode("eof".to_string()).kind(),
            ErrorKind::Shape
        );
        assert_eq!(
            PollError::UnknownStatus("lost".to_string()).kind(),
            ErrorKind::HomeworkStatus
        );
        assert_eq!(
            PollError::ResponseStatus {
                status: 500,
                reason: "Internal Server Error".to_string(),
                body: String::new(),
            }
            .kind(),
            ErrorKind::ResponseStatus
        );
    }

    #[test]
    fn test_transport_is_its_own_kind() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = PollError::Transport {
            endpoint: "not a url".to_string(),
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_client_build_error_wraps_reqwest() {
        let err = ClientBuildError::from(
            reqwest::Client::new().get("not a url").build().unwrap_err(),
        );
        assert!(err.to_string().starts_with("failed to build HTTP client: "));
    }

    #[test]
    fn test_missing_lists_every_name() {
        let err = ConfigError::Missing(vec![
            "PRACTICUM_TOKEN".to_string(),
            "TELEGRAM_CHAT_ID".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!(1)), "number");
    }
}
