//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Domain types and validation
//! - `wire.rs` — Raw serde structs matching backend requests and responses
//! - `client.rs` — Sub-client driving the domain's user actions

pub mod admin;
pub mod donation;
pub mod project;
pub mod transaction;
