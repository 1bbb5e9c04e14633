//! Numeric building blocks for identification.
//!
//! This crate provides the minimisation capability the identifiers depend on,
//! expressed as the [`Minimizer`] trait, together with a bounded Nelder–Mead
//! simplex implementation and a least-squares polynomial fit. The identifiers
//! only ever see the trait, so another derivative-free or global optimiser can
//! be substituted without touching them.

pub mod bounds;
pub mod error;
pub mod minimize;
pub mod nelder_mead;
pub mod polyfit;

pub use bounds::Bound;
pub use error::{SolverError, SolverResult};
pub use minimize::{Minimizer, Minimum, check_problem};
pub use nelder_mead::{NelderMead, NelderMeadConfig};
pub use polyfit::Polynomial;
