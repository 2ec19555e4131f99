//! Implements utility routines for reporting results

mod stress_strain_curve;
pub use crate::util::stress_strain_curve::*;
