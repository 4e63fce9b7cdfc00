use std::fmt;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{CoralogixError, ErrorKind, Result, TransportOptions};

/// Executor for one logical API call, including auth, JSON marshaling,
/// retry with exponential backoff, and error classification.
///
/// Holds only immutable configuration plus a `reqwest::Client` handle, so
/// one instance may be shared freely across concurrent callers. Resource
/// clients delegate every request here and add no transport logic of
/// their own.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    headers: HeaderMap,
    options: TransportOptions,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl Transport {
    /// Creates a transport for a fully resolved base URL with default
    /// options.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let options = TransportOptions::default();
        let headers = build_headers(&api_key, &options.headers);
        // 3xx responses are surfaced as classified errors, never followed.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
            api_key,
            headers,
            options,
        }
    }

    /// Applies transport options such as timeout, retry behavior, and
    /// custom headers.
    pub fn with_options(mut self, options: TransportOptions) -> Self {
        self.headers = build_headers(&self.api_key, &options.headers);
        self.options = options;
        self
    }

    /// Executes a request and deserializes the response body into `Out`.
    ///
    /// `path` must already carry its version and resource segments, e.g.
    /// `/v3/alert-defs`. `payload` of `None` omits the request body.
    /// Performs up to `max_retries + 1` attempts; only 429 and 5xx
    /// responses are retried (plus connection-level failures when
    /// [`TransportOptions::retry_on_network_errors`] is set). Both the
    /// backoff sleep and the in-flight call abort early with
    /// [`CoralogixError::Canceled`] when `cancel` fires.
    pub async fn request<In, Out>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        payload: Option<&In>,
    ) -> Result<Out>
    where
        In: Serialize + ?Sized,
        Out: DeserializeOwned,
    {
        let (status, body) = self.execute(cancel, method, path, payload).await?;
        serde_json::from_str(&body).map_err(|source| CoralogixError::Decode {
            status,
            body,
            source,
        })
    }

    /// Executes a request and discards the response body.
    pub async fn request_empty<In>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        payload: Option<&In>,
    ) -> Result<()>
    where
        In: Serialize + ?Sized,
    {
        self.execute(cancel, method, path, payload).await?;
        Ok(())
    }

    pub async fn get<Out: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        path: &str,
    ) -> Result<Out> {
        self.request::<(), Out>(cancel, Method::GET, path, None).await
    }

    pub async fn post<In, Out>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        payload: &In,
    ) -> Result<Out>
    where
        In: Serialize + ?Sized,
        Out: DeserializeOwned,
    {
        self.request(cancel, Method::POST, path, Some(payload)).await
    }

    pub async fn put<In, Out>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        payload: &In,
    ) -> Result<Out>
    where
        In: Serialize + ?Sized,
        Out: DeserializeOwned,
    {
        self.request(cancel, Method::PUT, path, Some(payload)).await
    }

    pub async fn patch<In, Out>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        payload: &In,
    ) -> Result<Out>
    where
        In: Serialize + ?Sized,
        Out: DeserializeOwned,
    {
        self.request(cancel, Method::PATCH, path, Some(payload)).await
    }

    pub async fn delete(&self, cancel: &CancellationToken, path: &str) -> Result<()> {
        self.request_empty::<()>(cancel, Method::DELETE, path, None).await
    }

    /// Retry loop around [`Transport::do_request`]. Returns the status and
    /// raw body of the first successful attempt.
    async fn execute<In>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        payload: Option<&In>,
    ) -> Result<(u16, String)>
    where
        In: Serialize + ?Sized,
    {
        // Serialization failures are deterministic, so marshal once before
        // the first attempt rather than per attempt.
        let body = match payload {
            Some(payload) => {
                Some(serde_json::to_string(payload).map_err(CoralogixError::Serialize)?)
            }
            None => None,
        };

        let mut attempt: u32 = 0;
        loop {
            let outcome = tokio::select! {
                _ = cancel.cancelled() => return Err(CoralogixError::Canceled),
                outcome = self.do_request(method.clone(), path, body.as_deref()) => outcome,
            };

            let err = match outcome {
                Ok(success) => return Ok(success),
                Err(err) => err,
            };

            if !self.should_retry(&err) {
                return Err(err);
            }
            if attempt >= self.options.max_retries {
                tracing::warn!(
                    retries = self.options.max_retries,
                    kind = %err.kind(),
                    "giving up after exhausting retries"
                );
                return Err(CoralogixError::RetriesExhausted {
                    retries: self.options.max_retries,
                    source: Box::new(err),
                });
            }
            self.wait_before_retry(cancel, attempt, &err).await?;
            attempt += 1;
        }
    }

    /// Performs a single HTTP round trip.
    async fn do_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> Result<(u16, String)> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .headers(self.headers.clone())
            .timeout(self.options.timeout);
        if let Some(body) = body {
            request = request.body(body.to_owned());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| CoralogixError::BodyRead { status, source })?;

        // No automatic redirect handling: anything outside 2xx is an error,
        // 3xx included.
        if !(200..300).contains(&status) {
            return Err(CoralogixError::Api {
                kind: ErrorKind::from_status(status),
                status,
                body,
            });
        }

        Ok((status, body))
    }

    fn should_retry(&self, err: &CoralogixError) -> bool {
        match err.kind() {
            ErrorKind::RateLimited | ErrorKind::ServerError => true,
            ErrorKind::NetworkError | ErrorKind::ContextDeadlineExceeded => {
                self.options.retry_on_network_errors
            }
            _ => false,
        }
    }

    /// Sleeps `backoff * 2^attempt` before the next attempt, racing the
    /// caller's cancellation token.
    async fn wait_before_retry(
        &self,
        cancel: &CancellationToken,
        attempt: u32,
        err: &CoralogixError,
    ) -> Result<()> {
        let exp = attempt.min(16);
        let delay = self.options.backoff.saturating_mul(1 << exp);

        tracing::debug!(
            attempt = attempt + 1,
            delay_ms = delay.as_millis() as u64,
            kind = %err.kind(),
            status = err.status(),
            "retrying request after backoff"
        );

        tokio::select! {
            _ = cancel.cancelled() => Err(CoralogixError::Canceled),
            _ = sleep(delay) => Ok(()),
        }
    }
}

/// Default headers plus the configured extras; extras win on collision so
/// `Authorization` can be overridden.
fn build_headers(api_key: &str, custom: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    if let Ok(mut auth) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
    }
    for (name, value) in custom {
        headers.insert(name.clone(), value.clone());
    }
    headers
}

#[cfg(test)]
mod tests {
    use reqwest::header;

    use super::{build_headers, Transport};
    use crate::TransportOptions;

    #[test]
    fn debug_redacts_api_key() {
        let transport = Transport::new("https://api.eu2.coralogix.com/mgmt/openapi", "secret-key");
        let debug = format!("{transport:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn default_headers_carry_bearer_auth() {
        let headers = build_headers("abc123", &header::HeaderMap::new());
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc123");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn custom_header_overrides_authorization() {
        let options = TransportOptions::new().header("Authorization", "Basic xyz");
        let headers = build_headers("abc123", &options.headers);
        assert_eq!(headers[header::AUTHORIZATION], "Basic xyz");
    }
}
