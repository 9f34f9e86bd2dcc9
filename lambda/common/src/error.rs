use thiserror::Error;

/// Errors raised by a [`TableStore`](crate::store::TableStore) backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The service rejected the call (missing table, throttling, validation).
    #[error("{message}")]
    Service {
        operation: &'static str,
        message: String,
    },
    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

/// Everything that can go wrong while handling one request.
///
/// All variants collapse to a 400 response carrying the display text.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing key attribute: {0}")]
    MissingKey(&'static str),
    #[error("Key attribute {0} must be a string")]
    InvalidKey(&'static str),
    #[error("Missing query string parameter: {0}")]
    MissingParameter(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = HandlerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_service_display_is_service_message() {
        let error = StoreError::Service {
            operation: "UpdateItem",
            message: "Requested resource not found".to_string(),
        };
        assert_eq!(error.to_string(), "Requested resource not found");
    }

    #[test]
    fn test_handler_error_wraps_store_error_transparently() {
        let error = HandlerError::from(StoreError::InvalidItem("bad".to_string()));
        assert_eq!(error.to_string(), "Invalid item: bad");
    }

    #[test]
    fn test_handler_error_invalid_json_uses_parser_message() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let expected = parse.to_string();
        assert_eq!(HandlerError::from(parse).to_string(), expected);
    }

    #[test]
    fn test_handler_error_missing_parameter_display() {
        assert_eq!(
            HandlerError::MissingParameter("email").to_string(),
            "Missing query string parameter: email"
        );
    }
}
