//! Provisions a generic outgoing webhook, then a logs-ratio alert that
//! notifies through it.
//!
//! Reads `CORALOGIX_API_KEY`, `CORALOGIX_WEBHOOK_URL`, and optionally
//! `CORALOGIX_REGION` from the environment.

use std::time::Duration;

use coralogix_http::{
    CoralogixClient, CreateAlertRequest, CreateWebhookRequest, TransportOptions, WebhookInput,
};
use serde_json::{json, Map};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let callback_url = std::env::var("CORALOGIX_WEBHOOK_URL")?;
    let webhook_uuid = uuid::Uuid::new_v4().to_string();

    let client = CoralogixClient::from_env()
        .map_err(anyhow::Error::msg)?
        .with_options(
            TransportOptions::new()
                .timeout(Duration::from_secs(10))
                .max_retries(3)
                .backoff(Duration::from_millis(100)),
        );
    let cancel = CancellationToken::new();

    let webhooks = client.webhooks();
    let created = webhooks
        .create(
            &cancel,
            &CreateWebhookRequest {
                data: WebhookInput {
                    kind: "GENERIC".to_owned(),
                    name: format!("API Webhook - {webhook_uuid}"),
                    url: Some(callback_url),
                    generic_webhook: Some(json!({
                        "method": "GET",
                        "uuid": webhook_uuid,
                        "headers": { "Content-Type": "application/json" }
                    })),
                    extra: Map::new(),
                },
            },
        )
        .await?;
    println!("Webhook created successfully, ID: {}", created.id);

    let fetched = webhooks.get(&cancel, &created.id).await?;
    let external_id = fetched
        .webhook
        .external_id
        .ok_or_else(|| anyhow::anyhow!("webhook {} has no external id", created.id))?;
    println!("Webhook fetched successfully, External ID: {external_id}");

    let alert = client
        .alerts()
        .create(
            &cancel,
            &CreateAlertRequest {
                name: format!("Error to Info Ratio - {webhook_uuid}"),
                priority: "ALERT_DEF_PRIORITY_P2".to_owned(),
                kind: "ALERT_DEF_TYPE_LOGS_RATIO_THRESHOLD".to_owned(),
                logs_ratio_threshold: Some(json!({
                    "numeratorAlias": "Error Logs",
                    "numerator": {
                        "simpleFilter": {
                            "luceneQuery": "logRecord.severityNumber: 17",
                            "labelFilters": {
                                "applicationName": [{ "value": "sample-app" }]
                            }
                        }
                    },
                    "denominatorAlias": "Informative Logs",
                    "denominator": {
                        "simpleFilter": {
                            "luceneQuery": "logRecord.severityNumber: 9",
                            "labelFilters": {
                                "applicationName": [{ "value": "sample-app" }]
                            }
                        }
                    },
                    "rules": [{
                        "condition": {
                            "threshold": 1.5,
                            "timeWindow": {
                                "logsRatioTimeWindowSpecificValue":
                                    "LOGS_RATIO_TIME_WINDOW_VALUE_MINUTES_10"
                            }
                        },
                        "override": { "priority": "ALERT_DEF_PRIORITY_P2" }
                    }]
                })),
                notification_group: Some(json!({
                    "webhooks": [{
                        "integration": { "integrationId": external_id }
                    }]
                })),
                extra: Map::new(),
            },
        )
        .await?;

    let properties = &alert.alert_def.alert_def_properties;
    println!(
        "Alert created successfully, Name: {:?} Type: {:?} Enabled: {:?}",
        properties.name, properties.kind, properties.enabled
    );

    Ok(())
}
