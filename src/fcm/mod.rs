//! Firebase Cloud Messaging sender.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::http::{HttpReply, HttpSender};
use crate::message::Message;
use crate::service::MessagingService;

/// FCM legacy HTTP send endpoint.
pub const FCM_SEND_URL: &str = "https://fcm.googleapis.com/fcm/send";

/// Visible notification content of a push message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A push message addressed to a single device token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FcmMessage {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub data: HashMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl FcmMessage {
    /// Creates a bare message for the given device token.
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            notification: None,
            data: HashMap::new(),
            priority: None,
        }
    }
}

impl Message for FcmMessage {
    fn to_request_body(&self) -> Result<Option<String>, serde_json::Error> {
        serde_json::to_string(self).map(Some)
    }
}

/// Sends push messages to FCM over a fixed POST endpoint.
pub struct FcmService {
    sender: HttpSender,
    server_key: String,
}

impl FcmService {
    /// Creates a service for the given server key. The endpoint defaults to
    /// [`FCM_SEND_URL`] and is overridable for tests.
    pub fn new(client: Client, server_key: impl Into<String>, endpoint: Option<String>) -> Self {
        let url = endpoint.unwrap_or_else(|| FCM_SEND_URL.to_string());
        Self {
            sender: HttpSender::new(client, url, Method::POST),
            server_key: server_key.into(),
        }
    }

    /// Returns the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        self.sender.url()
    }

    fn headers(&self) -> HashMap<String, String> {
        HashMap::from([
            (
                "Content-Type".to_string(),
                "application/json".to_string(),
            ),
            (
                "Authorization".to_string(),
                format!("key={}", self.server_key),
            ),
        ])
    }

    async fn dispatch<M: Message + ?Sized>(&self, message: &M) -> Result<Option<HttpReply>> {
        self.sender.send(&self.headers(), message).await
    }
}

#[async_trait]
impl MessagingService for FcmService {
    #[tracing::instrument(skip(self, message))]
    async fn send_message(&self, message: Box<dyn Message + Send + Sync>) -> Result<()> {
        match self.dispatch(message.as_ref()).await? {
            Some(reply) => {
                info!("FCM replied {} ({} bytes)", reply.status, reply.body.len());
            }
            None => {
                debug!("Message rendered to an empty body, nothing sent");
            }
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, payload, build_instructions))]
    async fn send_raw(
        &self,
        message_type: &str,
        customer_id: &str,
        token: &str,
        payload: Value,
        build_instructions: Vec<Value>,
    ) -> Result<()> {
        let envelope = json!({
            "to": token,
            "data": {
                "type": message_type,
                "customer_id": customer_id,
                "payload": payload,
                "build_instructions": build_instructions,
            },
        });

        match self.dispatch(&envelope).await? {
            Some(reply) => {
                info!(
                    "FCM replied {} for {} message to customer {}",
                    reply.status, message_type, customer_id
                );
            }
            None => {
                debug!("Raw payload rendered to an empty body, nothing sent");
            }
        }
        Ok(())
    }
}
