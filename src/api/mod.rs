//! HTTP client for the inventory service.
//!
//! Every call is a single attempt: no retry, no backoff, no idempotency keys.
//! A request that reached the server but whose response was lost is reported
//! as a connection error; the caller cannot tell whether it was applied.

mod client;
mod error;
mod request;

pub use client::InventoryClient;
pub use error::ApiError;
pub use request::{ApiReply, ApiRequest};
