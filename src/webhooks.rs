//! Client for the `/v1/outgoing-webhooks` resource family.
//!
//! Payload shapes are passed through near-opaquely: the fields this SDK
//! itself needs are typed, everything else rides in flattened JSON maps.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::{config, Result, Transport};

/// Request body for creating an outgoing webhook.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWebhookRequest {
    pub data: WebhookInput,
}

/// Webhook definition sent on create.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookInput {
    /// Webhook type discriminator, e.g. `"GENERIC"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Type-specific configuration (method, uuid, headers, ...) for
    /// generic webhooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_webhook: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebhookResponse {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetWebhookResponse {
    pub webhook: Webhook,
}

/// Stored webhook definition as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: Option<String>,
    /// Numeric id referenced by alert notification groups.
    pub external_id: Option<i64>,
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed facade over [`Transport`] for outgoing webhooks.
///
/// Binds the fixed resource path and delegates every call to the shared
/// transport; retry, auth, and error classification all live there.
#[derive(Debug, Clone)]
pub struct WebhooksClient {
    transport: Arc<Transport>,
    path: String,
}

impl WebhooksClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            transport,
            path: config::resource_path(config::V1, config::WEBHOOKS_RESOURCE),
        }
    }

    /// Creates an outgoing webhook and returns its id.
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        request: &CreateWebhookRequest,
    ) -> Result<CreateWebhookResponse> {
        self.transport.post(cancel, &self.path, request).await
    }

    /// Fetches a single webhook by id.
    pub async fn get(&self, cancel: &CancellationToken, id: &str) -> Result<GetWebhookResponse> {
        let path = format!("{}/{id}", self.path);
        self.transport.get(cancel, &path).await
    }
}
