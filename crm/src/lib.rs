//! Client for the upstream CRM REST API.
//!
//! The CRM is treated as an opaque HTTP service: both operations return the
//! raw response status and body so callers can relay them unchanged. Non-2xx
//! CRM responses are not an error at this layer, only transport failures are.

pub mod client;
pub mod types;

pub use client::{CrmClient, CrmClientError};
pub use types::{CrmResponse, Properties};
