//! Typed client for the Saferpay JSON API.
//!
//! Translates payments into Initialize/Assert/Capture calls against the
//! Payment API (spec version 1.33) and parses the JSON responses into typed
//! value objects. One synchronous POST per operation; no retries, no caching.

pub mod client;
pub mod config;
pub mod consts;
pub mod errors;
pub mod events;
pub mod requests;
pub mod responses;

pub use client::{SaferpayClient, SaferpayHttpClient};
pub use config::SaferpayConfig;
pub use errors::{ClientError, CustomResult};
