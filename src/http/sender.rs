//! HTTP message sender: one outbound exchange per call.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use std::collections::HashMap;

use super::status::{check_status, has_error};
use crate::message::Message;

/// The raw reply from the remote endpoint, returned to the caller unchanged.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: String,
}

/// Sends messages to a fixed endpoint with a fixed method.
///
/// The URL and method are set once at construction; the underlying
/// `reqwest::Client` may be shared across senders.
#[derive(Clone)]
pub struct HttpSender {
    client: Client,
    url: String,
    method: Method,
}

impl HttpSender {
    /// Creates a sender for the given endpoint and method, reusing the
    /// provided transport.
    pub fn new(client: Client, url: impl Into<String>, method: Method) -> Self {
        Self {
            client,
            url: url.into(),
            method,
        }
    }

    /// Returns the configured target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the configured HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Serializes the message and performs one HTTP exchange with the given
    /// headers.
    ///
    /// A message that renders to nothing produces no network call and
    /// `Ok(None)`. Otherwise the full reply (status + body) is returned.
    /// Error statuses are classified after the exchange completes: 4xx maps
    /// to the client bucket, > 500 to the server bucket, and exactly 500
    /// passes the reply through unclassified.
    #[tracing::instrument(skip(self, headers, message))]
    pub async fn send<M: Message + ?Sized>(
        &self,
        headers: &HashMap<String, String>,
        message: &M,
    ) -> Result<Option<HttpReply>> {
        let Some(body) = message.to_request_body()? else {
            debug!("Message rendered to an empty body, skipping {}", self.url);
            return Ok(None);
        };

        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid header name {:?}", name))?;
            let header_value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header {:?}", name))?;
            header_map.insert(header_name, header_value);
        }

        debug!("{} {} ({} bytes)", self.method, self.url, body.len());

        let response = self
            .client
            .request(self.method.clone(), &self.url)
            .headers(header_map)
            .body(body)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if has_error(status) {
            check_status(status)?;
            // Only exactly 500 reaches here: flagged as an error but
            // classified as neither bucket.
            warn!(
                "{} from {} reported as error but left unclassified",
                status, self.url
            );
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(Some(HttpReply { status, body }))
    }
}
