//! Implements the finite element method

mod bc_concentrated;
mod bc_distributed;
mod bc_prescribed;
mod convergence_control;
mod element_solid;
mod element_solid_finite;
mod element_trait;
mod elements;
mod fem_base;
mod fem_state;
mod file_io;
mod file_io_vtu;
mod linear_system;
mod post_processing;
mod solver_implicit;
mod stats;
pub use crate::fem::bc_concentrated::*;
pub use crate::fem::bc_distributed::*;
pub use crate::fem::bc_prescribed::*;
pub use crate::fem::convergence_control::*;
pub use crate::fem::element_solid::*;
pub use crate::fem::element_solid_finite::*;
pub use crate::fem::element_trait::*;
pub use crate::fem::elements::*;
pub use crate::fem::fem_base::*;
pub use crate::fem::fem_state::*;
pub use crate::fem::file_io::*;
pub use crate::fem::linear_system::*;
pub use crate::fem::post_processing::*;
pub use crate::fem::solver_implicit::*;
pub use crate::fem::stats::*;
