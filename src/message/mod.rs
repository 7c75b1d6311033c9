//! Message abstraction for outbound requests.

/// A domain object that renders itself into a textual request body.
pub trait Message {
    /// Renders the message into a request body.
    ///
    /// Returning `Ok(None)` means there is nothing to send; the transport
    /// performs no exchange in that case.
    fn to_request_body(&self) -> Result<Option<String>, serde_json::Error>;
}

/// Ad-hoc JSON payloads are messages; `Null` renders to nothing.
impl Message for serde_json::Value {
    fn to_request_body(&self) -> Result<Option<String>, serde_json::Error> {
        if self.is_null() {
            return Ok(None);
        }
        serde_json::to_string(self).map(Some)
    }
}
