//! Implements the base structures for a finite element simulation

mod assemble;
mod attributes;
mod config;
mod constants;
mod element_dofs;
mod enums;
mod equations;
mod essential;
mod idealization;
mod kinematics;
mod natural;
mod parameters;
mod sample_meshes;
pub use crate::base::assemble::*;
pub use crate::base::attributes::*;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::element_dofs::*;
pub use crate::base::enums::*;
pub use crate::base::equations::*;
pub use crate::base::essential::*;
pub use crate::base::idealization::*;
pub(crate) use crate::base::kinematics::*;
pub use crate::base::natural::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_meshes::*;
