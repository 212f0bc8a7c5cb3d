//! # Workflows Module
//!
//! End-to-end procedures built from the [`crate::core`] routines and the
//! [`crate::engine`] configuration, error and progress types.
//!
//! - **Spectrum** ([`spectrum`]) - Validate a dense symmetric matrix, reduce it to
//!   tridiagonal form, deflate it to eigenvalues and order them. A batch variant runs
//!   independent matrices in parallel.
//! - **Pairs** ([`pairs`]) - Solve large lists of independent symmetric 2×2 problems in
//!   parallel with the closed-form kernel.

pub mod pairs;
pub mod spectrum;
