//! Reading and writing matrices, 2×2 problem lists and eigenvalue tables.
//!
//! All formats are comma-separated text handled through the [`traits::MatrixFile`]
//! interface; see [`tabular`] for the concrete layouts.

pub mod tabular;
pub mod traits;
