use lambda_http::{Request, RequestExt};

use crate::error::{HandlerError, Result};

/// First value of a required query string parameter.
pub fn query_parameter<'a>(event: &'a Request, name: &'static str) -> Result<&'a str> {
    event
        .query_string_parameters_ref()
        .and_then(|params| params.first(name))
        .ok_or(HandlerError::MissingParameter(name))
}
