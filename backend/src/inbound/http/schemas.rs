//! Shared OpenAPI schemas for HTTP error responses.

use serde::Serialize;
use utoipa::ToSchema;

/// Wire shape of the error envelope returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    pub code: String,
    /// Human-readable message.
    #[schema(example = "match request already exists")]
    pub message: String,
    /// Optional structured detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
