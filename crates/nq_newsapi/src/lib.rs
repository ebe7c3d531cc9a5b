//! NewsAPI data source.
//!
//! [`NewsApiClient`] turns a [`nq_core::HeadlineQuery`] into one call against
//! `/v2/everything` and projects the reply into [`nq_core::Article`]s.

pub mod client;
mod response;

pub use client::{NewsApiClient, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
