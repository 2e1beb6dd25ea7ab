//! Chat message endpoint
//!
//! Echoes a stamped `ChatMessage` back to the sender and queues one push
//! notification per other subscriber. Delivery never affects the response.

pub mod handler;

pub use handler::{fan_out_targets, PostMessageRequest};

// vim: ts=4
