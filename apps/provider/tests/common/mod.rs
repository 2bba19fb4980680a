//! Common test utilities for provider integration tests
//!
//! This module provides shared test infrastructure: an in-memory fetcher
//! serving canned pages, page builders and helpers that wire a provider
//! around either the stub or the shared mock server.

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
