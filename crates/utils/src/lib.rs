//! Retry engine, delay strategies and runtime helpers for reattempt
//!
//! This crate holds everything that runs: the suspend primitive, the delay
//! strategy family, the jitter combinator and the retry engine that composes
//! them. Types shared with the config loader and the CLI live in
//! `reattempt-core`.

pub mod resilience;
pub mod time;
pub mod tracing;

pub use resilience::*;
pub use time::{sleep, sleep_for};
