//! `coralogix-http` is an async client SDK for the Coralogix management
//! OpenAPI.
//!
//! Typed resource clients ([`AlertsClient`], [`WebhooksClient`]) sit on a
//! shared [`Transport`] that applies bearer authentication, JSON
//! marshaling, retry with exponential backoff, and error classification
//! uniformly. Cancellation is cooperative: every call takes a
//! [`tokio_util::sync::CancellationToken`] that aborts both backoff sleeps
//! and in-flight requests.

mod alerts;
mod client;
pub mod config;
mod error;
mod options;
mod transport;
mod webhooks;

pub use alerts::{
    AlertDef, AlertDefProperties, AlertsClient, CreateAlertRequest, CreateAlertResponse,
};
pub use client::CoralogixClient;
pub use error::{CoralogixError, ErrorKind};
pub use options::TransportOptions;
pub use transport::Transport;
pub use webhooks::{
    CreateWebhookRequest, CreateWebhookResponse, GetWebhookResponse, Webhook, WebhookInput,
    WebhooksClient,
};

pub type Result<T> = std::result::Result<T, CoralogixError>;
