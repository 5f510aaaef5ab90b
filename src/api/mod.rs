//! HTTP access to the product-catalog service.
mod client;

pub use client::{ApiClient, Reply};
