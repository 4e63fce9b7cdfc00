use std::sync::Arc;

use crate::{config, AlertsClient, Transport, TransportOptions, WebhooksClient};

/// Entry point of the SDK: builds one shared [`Transport`] for a region
/// and API key and hands out resource clients backed by it.
///
/// All clients obtained from the same `CoralogixClient` share the same
/// transport instance, so they also share its HTTP connection pool and
/// retry configuration.
///
/// # Example
///
/// ```no_run
/// use coralogix_http::{config, CoralogixClient};
///
/// let client = CoralogixClient::new(config::REGION_EU2, "my-api-key");
/// let alerts = client.alerts();
/// let webhooks = client.webhooks();
/// ```
#[derive(Debug, Clone)]
pub struct CoralogixClient {
    transport: Arc<Transport>,
}

impl CoralogixClient {
    /// Creates a client for a region with default options.
    ///
    /// The base URL is derived automatically:
    /// `https://api.<region>.coralogix.com/mgmt/openapi`
    pub fn new(region: &str, api_key: impl Into<String>) -> Self {
        Self::with_base_url(config::base_url(region), api_key)
    }

    /// Creates a client against an explicit base URL.
    ///
    /// Useful for private clusters or tests against a local mock server.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            transport: Arc::new(Transport::new(base_url, api_key)),
        }
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `CORALOGIX_API_KEY` — management API key
    /// - `CORALOGIX_REGION` — region identifier (defaults to `eu2` when
    ///   unset)
    ///
    /// Returns an error if the API key is missing or empty.
    pub fn from_env() -> std::result::Result<Self, String> {
        let api_key = std::env::var("CORALOGIX_API_KEY")
            .map_err(|_| "missing CORALOGIX_API_KEY environment variable".to_owned())?;
        if api_key.trim().is_empty() {
            return Err("CORALOGIX_API_KEY is set but empty".to_owned());
        }
        let region =
            std::env::var("CORALOGIX_REGION").unwrap_or_else(|_| config::REGION_EU2.to_owned());
        Ok(Self::new(&region, api_key))
    }

    /// Applies transport options such as timeout and retry behavior.
    ///
    /// Rebuilds the shared transport; call this before requesting resource
    /// clients so they all pick up the same configuration.
    pub fn with_options(self, options: TransportOptions) -> Self {
        let transport = (*self.transport).clone().with_options(options);
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Returns an alert-definitions client sharing this client's transport.
    pub fn alerts(&self) -> AlertsClient {
        AlertsClient::new(Arc::clone(&self.transport))
    }

    /// Returns an outgoing-webhooks client sharing this client's transport.
    pub fn webhooks(&self) -> WebhooksClient {
        WebhooksClient::new(Arc::clone(&self.transport))
    }
}

#[cfg(test)]
mod tests {
    use super::CoralogixClient;

    #[test]
    fn new_derives_base_url_from_region() {
        let client = CoralogixClient::new("eu2", "key");
        let debug = format!("{client:?}");
        assert!(debug.contains("https://api.eu2.coralogix.com/mgmt/openapi"));
    }

    #[test]
    fn debug_never_leaks_the_api_key() {
        let client = CoralogixClient::new("eu2", "super-secret");
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
    }
}
