//! # symeig
//!
//! Numerically hardened eigenvalue routines for real symmetric matrices, as needed by
//! normal-mode analysis, rotational fitting and force-field parameter optimization.
//!
//! At the centre is [`core::linalg::sym2::sym2_eigenvalues`], a closed-form solver for
//! symmetric 2×2 matrices that avoids both overflow (the discriminant is evaluated
//! relative to its larger operand) and cancellation (the second root is rebuilt from
//! the determinant). Everything else is built around it:
//!
//! - **[`core`]: The Foundation.** Stateless numerics: the 2×2 kernel, the implicit QL
//!   driver that deflates symmetric tridiagonal matrices down to 1×1 and 2×2 blocks, and
//!   the CSV formats used to move matrices in and out.
//!
//! - **[`engine`]: Shared Machinery.** Configuration, error types and progress
//!   reporting used by every workflow.
//!
//! - **[`workflows`]: The Public API.** Complete procedures such as computing the
//!   ordered spectrum of a dense symmetric matrix, or solving batches of 2×2 problems in
//!   parallel.

pub mod core;
pub mod engine;
pub mod workflows;
