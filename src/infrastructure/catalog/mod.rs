//! Catalog infrastructure - Upstream provider client

mod client;
mod envelope;
mod http_client;

pub use client::OtapiClient;
pub use http_client::{HttpClient, HttpClientTrait, TransportError};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
