//! The response envelope shared by both handlers.
//!
//! Every response carries the same CORS headers and a JSON-encoded body.
//! Failures of any kind become a 400 whose body is the error message.

use lambda_http::{Body, Error, Response};
use serde_json::Value;

use crate::error::HandlerError;

pub const USERS_ALLOWED_METHODS: &str = "OPTIONS,POST,GET,DELETE";
pub const TASKS_ALLOWED_METHODS: &str = "OPTIONS,POST,GET,PUT,DELETE";

/// Body of a successful create-or-update. Existing clients match on it.
pub const UPDATED_MESSAGE: &str = "Succesfully updated record";

pub fn json_response(
    status: u16,
    allowed_methods: &str,
    payload: &Value,
) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(payload)?;
    Ok(Response::builder()
        .status(status)
        .header("Access-Control-Allow-Headers", "Content-Type")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", allowed_methods)
        .header("content-type", "application/json")
        .body(Body::Text(body))?)
}

/// Wraps the outcome of a dispatched request.
pub fn envelope(
    outcome: Result<Value, HandlerError>,
    allowed_methods: &str,
) -> Result<Response<Body>, Error> {
    match outcome {
        Ok(payload) => json_response(200, allowed_methods, &payload),
        Err(e) => {
            tracing::warn!(error = %e, "request failed");
            json_response(400, allowed_methods, &Value::String(e.to_string()))
        }
    }
}
