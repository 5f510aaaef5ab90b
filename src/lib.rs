//! An interactive console for exercising a product-catalog demo API.
//!
//! Each console command is a dispatcher: it collects its parameters, issues
//! exactly one HTTP request, classifies the outcome, and writes one entry
//! into the session's output log. A background keep-alive task pings the
//! service root on a fixed interval.
pub mod api;
pub mod app;
pub mod console;
pub mod keepalive;
pub mod output;
pub mod types;
