//! Maps AWS SDK errors to [`StoreError`].

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::error::StoreError;

/// Keeps the service's own message so callers see exactly what DynamoDB said.
pub fn map_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    tracing::warn!(
        operation,
        code = err.code().unwrap_or("unknown"),
        error = %DisplayErrorContext(&err),
        "DynamoDB call failed"
    );

    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    StoreError::Service { operation, message }
}
