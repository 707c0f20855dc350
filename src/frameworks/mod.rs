//! Glue between the framework-independent core and concrete web frameworks.
//!
//! Each integration supplies [`HeaderSource`](crate::HeaderSource) for its
//! request types and a way to copy an [`HtmxResponse`](crate::HtmxResponse)
//! onto its response type.

#[cfg(feature = "axum")]
pub mod axum;
pub mod http;
