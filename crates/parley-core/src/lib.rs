//! Domain layer for Parley, a conversation simulator.
//!
//! A user role-plays against a persona driven by an external generative
//! model while a side-channel analysis scores each user message. This crate
//! holds the pure data and rules: scenarios, metrics snapshots, history,
//! trainer options, replay projection and the port trait the model sits
//! behind.

pub mod advice;
pub mod agent;
pub mod config;
pub mod error;
pub mod metrics;
pub mod replay;
pub mod scenario;
pub mod session;
pub mod trainer;

// Re-export common error type
pub use error::{ParleyError, Result};
