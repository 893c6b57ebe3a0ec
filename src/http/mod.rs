//! HTTP gateway — `CrowdfundHttp`, the reqwest implementation of
//! [`BackendGateway`](crate::gateway::BackendGateway).

pub mod client;

pub use client::CrowdfundHttp;
