//! Bell-curve grade allocation.
//!
//! Computes per-grade score thresholds so that a chosen centric grade gets
//! the largest share of the roster, then labels every score against those
//! thresholds. Manually supplied thresholds bypass the computation and are
//! checked separately with [`validate::validate`].

pub mod allocate;
pub mod assign;
pub mod boundaries;
pub mod distribution;
pub mod scale;
pub mod types;
pub mod validate;

pub use allocate::allocate;
pub use assign::{assign, assign_all};
pub use boundaries::{Boundary, BoundaryMap};
pub use scale::GradeScale;
pub use validate::validate;
