//! Shared types and HTTP client for Fairway, a headless tee-time checkout
//! and booking core.
//!
//! The [`objects`] module holds the wire types exchanged with the storefront
//! backend: booking records, checkout payloads and session responses, and
//! the tolerant deserializers that keep loosely-typed backend JSON from
//! breaking the frontend. The [`client`] module (cargo feature `client`)
//! adds a typed `reqwest` client over those types.

pub mod objects;

#[cfg(feature = "client")]
pub mod client;
