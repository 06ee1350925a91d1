use lambda_http::{Request, RequestExt};
use serde_json::Value;

use crate::{HandlerError, Record};

/// The request path as the client sent it, without any API Gateway stage prefix.
pub fn request_path(event: &Request) -> &str {
    match event.raw_http_path() {
        "" => event.uri().path(),
        raw => raw,
    }
}

pub fn path_parameter<'a>(event: &'a Request, name: &str) -> Option<&'a str> {
    event
        .path_parameters_ref()
        .and_then(|params| params.first(name))
}

/// Decodes the body into a record. Anything but a JSON object is refused.
pub fn json_body(event: &Request) -> Result<Record, HandlerError> {
    match serde_json::from_slice::<Value>(event.body().as_ref())? {
        Value::Object(record) => Ok(record),
        _ => Err(HandlerError::BodyNotObject),
    }
}
