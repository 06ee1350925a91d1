use serde_json::Value;
use std::error::Error as StdError;
use thiserror::Error;

/// Failures reported by a [`Table`](crate::Table).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Dynamo(#[from] aws_sdk_dynamodb::Error),

    #[error("could not marshal attribute values: {0}")]
    Marshal(#[from] serde_dynamo::Error),

    /// The engine refused the request, e.g. an empty update expression.
    #[error("{0}")]
    Rejected(String),
}

/// Everything that can go wrong while serving a request. All of it ends up as a 500.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Unsupported route: \"{0}\"")]
    UnsupportedRoute(String),

    #[error("missing path parameter `{0}`")]
    MissingPathParameter(&'static str),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    BodyNotObject,

    #[error("primary key `id` must be a string, got {0}")]
    InvalidKey(Value),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Renders an error and its chain of sources, one per line.
pub fn error_stack(error: &(dyn StdError + 'static)) -> String {
    let mut stack = format!("{error:?}");
    let mut source = error.source();
    while let Some(cause) = source {
        stack.push_str(&format!("\n    caused by: {cause}"));
        source = cause.source();
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_route_names_the_method() {
        let err = HandlerError::UnsupportedRoute("PATCH".to_string());
        assert_eq!(err.to_string(), "Unsupported route: \"PATCH\"");
    }

    #[test]
    fn stack_includes_sources() {
        let inner = serde_json::from_str::<Value>("{").unwrap_err();
        let err = HandlerError::from(inner);
        let stack = error_stack(&err);

        assert!(stack.starts_with("InvalidBody("));
        assert!(stack.contains("caused by: EOF while parsing"));
    }
}
