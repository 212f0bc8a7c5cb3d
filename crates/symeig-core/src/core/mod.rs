//! # Core Module
//!
//! Stateless numerical building blocks and file formats.
//!
//! - **Linear Algebra** ([`linalg`]) - The closed-form symmetric 2×2 eigenvalue solver,
//!   the tridiagonal QL deflation driver built on it, and dense-matrix validation and
//!   reduction.
//! - **File I/O** ([`io`]) - Comma-separated matrix and eigenvalue formats.
//!
//! Nothing in this module holds state between calls; every routine may be invoked
//! concurrently from any number of threads.

pub mod io;
pub mod linalg;
