use super::{LinearElastic, LocalState, VonMises};
use crate::base::{Idealization, ParamSolid, StressStrain};
use crate::StrError;
use russell_tensor::{Tensor2, Tensor4};

/// Specifies the essential functions for small-strain stress-strain models
pub trait StressStrainTrait: Send {
    /// Indicates that the stiffness matrix is symmetric
    fn symmetric_stiffness(&self) -> bool;

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize;

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), StrError>;

    /// Computes the consistent tangent stiffness
    fn stiffness(&mut self, dd: &mut Tensor4, state: &LocalState) -> Result<(), StrError>;

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&mut self, state: &mut LocalState, delta_strain: &Tensor2) -> Result<(), StrError>;
}

/// Holds the actual small-strain stress-strain model implementation
pub struct StressStrainModel {
    /// Holds the actual model implementation
    pub actual: Box<dyn StressStrainTrait>,
}

impl StressStrainModel {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, param: &ParamSolid) -> Result<Self, StrError> {
        let actual: Box<dyn StressStrainTrait> = match param.stress_strain {
            StressStrain::LinearElastic { young, poisson } => Box::new(LinearElastic::new(ideal, young, poisson)),
            StressStrain::VonMises {
                young,
                poisson,
                z_ini,
                hardening,
            } => {
                if ideal.plane_stress {
                    return Err("von Mises model does not work in plane-stress");
                }
                Box::new(VonMises::new(ideal, young, poisson, z_ini, hardening))
            }
            StressStrain::SaintVenantKirchhoff { .. } => {
                return Err("SaintVenantKirchhoff is a finite-strain model; use FiniteStrainModel instead")
            }
            StressStrain::NeoHookean { .. } => {
                return Err("NeoHookean is a finite-strain model; use FiniteStrainModel instead")
            }
            StressStrain::FiniteStrainVonMises { .. } => {
                return Err("FiniteStrainVonMises is a finite-strain model; use FiniteStrainModel instead")
            }
        };
        Ok(StressStrainModel { actual })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
