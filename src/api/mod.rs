//! Authenticated access to the INPI registry API.
//!
//! One client owns one bearer token, fetched at login and reused for the
//! lifetime of the client. Every request is a single attempt: failures
//! surface immediately and an expired token shows up as an API error on
//! the next call, to be handled by logging in again.

mod auth;
mod client;

pub use client::InpiClient;
