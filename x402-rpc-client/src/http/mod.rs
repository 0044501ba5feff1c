//! HTTP transport for JSON-RPC calls

mod client;

pub use client::HttpClient;
