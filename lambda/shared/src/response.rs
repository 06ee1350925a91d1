use lambda_http::{Body, Error, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::error::error_stack;
use crate::HandlerError;

/// Cross-origin headers a function answers with on success.
#[derive(Debug, Clone, Copy)]
pub struct Cors {
    pub allow_headers: &'static str,
    pub allow_methods: &'static str,
}

#[derive(Serialize)]
struct Success<'a> {
    message: String,
    #[serde(skip_serializing_if = "is_null")]
    body: &'a Value,
}

fn is_null(body: &&Value) -> bool {
    body.is_null()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Failure {
    message: &'static str,
    error_msg: String,
    error_stack: String,
}

/// 200 with `{message, body}`. A null `body` is left out.
pub fn success(cors: &Cors, operation: &str, body: &Value) -> Result<Response<Body>, Error> {
    let payload = serde_json::to_string(&Success {
        message: format!("Successfully finished operation: \"{operation}\""),
        body,
    })?;

    Ok(Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", cors.allow_headers)
        .header("Access-Control-Allow-Methods", cors.allow_methods)
        .body(Body::Text(payload))?)
}

/// 500 with `{message, errorMsg, errorStack}`, whatever went wrong.
pub fn failure(err: &HandlerError) -> Result<Response<Body>, Error> {
    let payload = serde_json::to_string(&Failure {
        message: "Failed to perform operation.",
        error_msg: err.to_string(),
        error_stack: error_stack(err),
    })?;

    Ok(Response::builder()
        .status(500)
        .header("content-type", "application/json")
        .body(Body::Text(payload))?)
}

/// Logs the outcome of an operation and turns it into the response envelope.
pub fn respond(
    cors: &Cors,
    outcome: Result<(String, Value), HandlerError>,
) -> Result<Response<Body>, Error> {
    match outcome {
        Ok((operation, body)) => {
            info!(operation = %operation, body = %body, "operation finished");
            success(cors, &operation, &body)
        }
        Err(err) => {
            error!(error = %err, stack = %error_stack(&err), "operation failed");
            failure(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CORS: Cors = Cors {
        allow_headers: "Content-Type",
        allow_methods: "POST,GET",
    };

    fn json_of(response: &Response<Body>) -> Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    #[test]
    fn success_wraps_body_with_cors() {
        let response = success(&CORS, "GET", &json!({ "id": "a" })).unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers()["Access-Control-Allow-Methods"], "POST,GET");
        assert_eq!(
            json_of(&response),
            json!({
                "message": "Successfully finished operation: \"GET\"",
                "body": { "id": "a" }
            })
        );
    }

    #[test]
    fn null_body_is_omitted() {
        let response = success(&CORS, "POST", &Value::Null).unwrap();
        assert_eq!(
            json_of(&response),
            json!({ "message": "Successfully finished operation: \"POST\"" })
        );
    }

    #[test]
    fn failure_is_always_500() {
        let response = failure(&HandlerError::UnsupportedRoute("PATCH".into())).unwrap();
        let payload = json_of(&response);

        assert_eq!(response.status(), 500);
        assert!(response.headers().get("Access-Control-Allow-Origin").is_none());
        assert_eq!(payload["message"], "Failed to perform operation.");
        assert_eq!(payload["errorMsg"], "Unsupported route: \"PATCH\"");
        assert!(payload["errorStack"].as_str().unwrap().contains("UnsupportedRoute"));
    }
}
