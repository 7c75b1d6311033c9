pub mod fcm;
pub mod http;
pub mod message;
pub mod service;
