//! Region, endpoint, and default-tunable constants for the management API.

use std::time::Duration;

/// EU cluster 2, the region the hosted demo environment runs in.
pub const REGION_EU2: &str = "eu2";

/// API version segment for outgoing webhooks.
pub const V1: &str = "v1";
/// API version segment for alert definitions.
pub const V3: &str = "v3";

/// Resource segment for alert definitions.
pub const ALERTS_RESOURCE: &str = "alert-defs";
/// Resource segment for outgoing webhooks.
pub const WEBHOOKS_RESOURCE: &str = "outgoing-webhooks";

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;
pub(crate) const DEFAULT_BACKOFF: Duration = Duration::from_millis(100);

/// Formats a region identifier into the canonical management API base URL.
///
/// Example: `"eu2"` → `"https://api.eu2.coralogix.com/mgmt/openapi"`
pub fn base_url(region: &str) -> String {
    format!("https://api.{}.coralogix.com/mgmt/openapi", region.trim())
}

/// Builds a versioned resource path.
///
/// Example: `("v3", "alert-defs")` → `"/v3/alert-defs"`
pub fn resource_path(version: &str, resource: &str) -> String {
    format!("/{version}/{resource}")
}

#[cfg(test)]
mod tests {
    use super::{base_url, resource_path};

    #[test]
    fn base_url_embeds_region() {
        assert_eq!(
            base_url("eu2"),
            "https://api.eu2.coralogix.com/mgmt/openapi"
        );
    }

    #[test]
    fn base_url_trims_whitespace() {
        assert_eq!(
            base_url(" us1 "),
            "https://api.us1.coralogix.com/mgmt/openapi"
        );
    }

    #[test]
    fn resource_path_joins_version_and_resource() {
        assert_eq!(resource_path("v1", "outgoing-webhooks"), "/v1/outgoing-webhooks");
    }
}
