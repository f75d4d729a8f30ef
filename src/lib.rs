//! Core library for the `loadlite` CLI.
//!
//! This crate provides the internal building blocks used by the binary:
//! CLI argument types, curl-command parsing and per-request token
//! resolution, the HTTP transport, metrics aggregation, and the load-test
//! coordinator. The primary user-facing interface is the `loadlite`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod curl;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod runner;
pub mod shutdown;
pub mod summary;
