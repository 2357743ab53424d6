//! HTTP client for the remote prediction service.
//!
//! [`DefaultPredictionClient`] talks to the service over reqwest and is used
//! through the core [`PredictionServicePort`] trait. Every call is a single
//! attempt; failures surface to the caller unchanged.
//!
//! [`PredictionServicePort`]: oncodash_core::PredictionServicePort

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultPredictionClient is used through the port trait, not its generic internals
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod parsing;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultPredictionClient, PredictionClient};

// Configuration
pub use config::ApiClientConfig;

// Errors (for callers constructing the client)
pub use error::ApiError;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use tokio_test as _;
