//! # Engine Module
//!
//! Shared machinery for the eigenvalue workflows: how a computation is configured,
//! how it fails, and how it reports progress.
//!
//! - **Configuration** ([`config`]) - Iteration budgets, symmetry tolerance and output
//!   ordering, assembled through [`config::SpectrumConfigBuilder`].
//! - **Error Handling** ([`error`]) - [`error::EngineError`], the single error type
//!   returned by workflows.
//! - **Progress Monitoring** ([`progress`]) - Phase and task events forwarded to an
//!   optional caller-supplied callback.

pub mod config;
pub mod error;
pub mod progress;
