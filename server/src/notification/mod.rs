//! Push subscription endpoint

pub mod handler;

// vim: ts=4
