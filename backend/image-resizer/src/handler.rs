//! Lambda entry glue
//!
//! Payloads arrive as raw JSON so that malformed events reach the service
//! and come back as `error` results instead of runtime deserialisation
//! faults.

use crate::models::HandlerResult;
use crate::services::ThumbnailService;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::debug;

/// Handle one invocation. Always returns `Ok`; failures are in the result.
pub async fn handler(
    service: &ThumbnailService,
    event: LambdaEvent<Value>,
) -> Result<HandlerResult, Error> {
    let (payload, context) = event.into_parts();
    debug!(request_id = %context.request_id, "Received event");

    Ok(service.process(payload).await)
}
