//! Client for the `/v3/alert-defs` resource family.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::{config, Result, Transport};

/// Alert definition properties sent on create.
///
/// Only the fields this SDK touches are typed; condition payloads such as
/// `logsRatioThreshold` are vendor-shaped JSON passed through unchanged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    pub name: String,
    /// Alert priority, e.g. `"ALERT_DEF_PRIORITY_P2"`.
    pub priority: String,
    /// Alert type discriminator, e.g. `"ALERT_DEF_TYPE_LOGS_RATIO_THRESHOLD"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs_ratio_threshold: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_group: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertResponse {
    pub alert_def: AlertDef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDef {
    pub id: Option<String>,
    pub alert_def_properties: AlertDefProperties,
}

/// Stored alert properties as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDefProperties {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub enabled: Option<bool>,
    pub notification_group: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed facade over [`Transport`] for alert definitions.
#[derive(Debug, Clone)]
pub struct AlertsClient {
    transport: Arc<Transport>,
    path: String,
}

impl AlertsClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            transport,
            path: config::resource_path(config::V3, config::ALERTS_RESOURCE),
        }
    }

    /// Creates an alert definition.
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        request: &CreateAlertRequest,
    ) -> Result<CreateAlertResponse> {
        self.transport.post(cancel, &self.path, request).await
    }
}
