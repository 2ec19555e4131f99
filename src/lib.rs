//! fssim - Simulator of finite-strain elastoplastic and hyperelastic solids
//!
//! This crate implements a quasi-static finite element simulator for solid
//! mechanics with small-strain and finite-strain material models:
//!
//! * Linear elasticity
//! * von Mises (J2) plasticity with linear or Voce isotropic hardening
//! * Saint Venant-Kirchhoff hyperelasticity
//! * Compressible neo-Hookean hyperelasticity
//! * Finite-strain von Mises plasticity (multiplicative split, logarithmic
//!   elastic strain)
//!
//! The heavy numerical machinery is delegated to external libraries:
//! [gemlab](https://docs.rs/gemlab) provides meshes, shape functions, and
//! integration points; [russell_lab](https://docs.rs/russell_lab),
//! [russell_sparse](https://docs.rs/russell_sparse), and
//! [russell_tensor](https://docs.rs/russell_tensor) provide the dense/sparse
//! linear algebra and tensor calculus. This crate contributes the
//! orchestration: problem setup, constitutive updates, the Newton-Raphson
//! loop over load increments, results writing, and timing aggregation.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod fem;
pub mod material;
pub mod prelude;
pub mod util;
