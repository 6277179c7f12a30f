//! Shared test utilities for chunkr integration tests.
//!
//! This module provides:
//! - `ScriptedTransport`, an in-memory transport that replays queued responses
//!   and records every request
//! - Builders for job payloads as the service would send them

pub mod builders;
pub mod transport;

pub use builders::*;
pub use transport::{client_with, RecordedRequest, ScriptedTransport};
