//! Makes available the most common structures needed to run a simulation
//!
//! You may write `use fssim::prelude::*` in your code and obtain
//! access to the commonly used functionality.

pub use crate::base::{
    Config, Dof, Elem, Essential, Hardening, Idealization, Natural, Nbc, ParamSolid, Pbc, SampleMeshes, StressStrain,
};
pub use crate::fem::{
    calc_internal_forces, Elements, FemBase, FemState, FileIo, PostProc, SolverImplicit, Stats,
};
pub use crate::material::{
    FiniteStrainModel, FiniteStrainTrait, LocalState, StressStrainModel, StressStrainTrait,
};
pub use crate::util::StressStrainCurve;
