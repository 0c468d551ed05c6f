//! Outbound network calls.

pub mod contact;
