//! Messaging service abstraction.
//!
//! Concrete senders implement the two capabilities here; there is no
//! generic implementation at this level.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::message::Message;

/// Capabilities required of any concrete message sender.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Sends a domain message.
    async fn send_message(&self, message: Box<dyn Message + Send + Sync>) -> Result<()>;

    /// Sends a raw structured payload plus build instructions, addressed by
    /// message type, customer id, and device token.
    async fn send_raw(
        &self,
        message_type: &str,
        customer_id: &str,
        token: &str,
        payload: Value,
        build_instructions: Vec<Value>,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_service_send_message() {
        let mut service = MockMessagingService::new();
        service
            .expect_send_message()
            .times(1)
            .returning(|_| Ok(()));

        service
            .send_message(Box::new(json!({"to": "token"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mock_service_send_raw() {
        let mut service = MockMessagingService::new();
        service
            .expect_send_raw()
            .withf(|message_type, customer_id, token, _, _| {
                message_type == "build" && customer_id == "c-1" && token == "t-1"
            })
            .times(1)
            .returning(|_, _, _, _, _| Ok(()));

        service
            .send_raw("build", "c-1", "t-1", json!({"v": 1}), vec![json!("step")])
            .await
            .unwrap();
    }
}
