//! HTTP message transport and response classification.

mod sender;
mod status;

pub use sender::{HttpReply, HttpSender};
pub use status::{StatusError, check_status, has_error};
