use super::{LocalState, NeoHookean, SaintVenantKirchhoff, VonMisesFinite};
use crate::base::{Idealization, ParamSolid, StressStrain};
use crate::StrError;
use russell_lab::Matrix;

/// Specifies the essential functions for finite-strain material models
///
/// This contract mirrors the behavior-integration interface of external
/// material-law compilers: initialize the state, integrate the stress and
/// internal variables for a given deformation gradient, expose the
/// strain-energy density, and provide the tangent operator.
///
/// The stress measure is the second Piola-Kirchhoff tensor S; the element
/// computes the first Piola-Kirchhoff stress P = F·S for the residual.
pub trait FiniteStrainTrait: Send {
    /// Indicates that the stiffness matrix is symmetric
    fn symmetric_stiffness(&self) -> bool;

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize;

    /// Initializes the internal values for the initial state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), StrError>;

    /// Updates the stress tensor (PK2) and internal variables given the new deformation gradient
    fn update_stress(&mut self, state: &mut LocalState, deformation_gradient: &Matrix) -> Result<(), StrError>;

    /// Returns the strain-energy density for the current state
    fn strain_energy(&self, state: &LocalState) -> Result<f64, StrError>;

    /// Indicates that the tangent-operator contraction is available in closed form
    ///
    /// Models without a closed-form operator rely on the element computing a
    /// numerical (finite-difference) stiffness.
    fn has_analytical_stiffness(&self) -> bool;

    /// Computes the tangent-operator contraction for a pair of gradient vectors
    ///
    /// ```text
    /// M[i][j] = Σ_{k,l} (∂P[i][k]/∂F[j][l]) a[k] b[l]
    /// ```
    ///
    /// where `a` and `b` are the shape-function gradients (length 3; the
    /// out-of-plane entry is zero in 2D) of the two nodes whose stiffness
    /// block is being assembled.
    fn contract_stiffness(&self, mm: &mut Matrix, state: &LocalState, a: &[f64], b: &[f64]) -> Result<(), StrError>;
}

/// Holds the actual finite-strain model implementation
pub struct FiniteStrainModel {
    /// Holds the actual model implementation
    pub actual: Box<dyn FiniteStrainTrait>,
}

impl FiniteStrainModel {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, param: &ParamSolid) -> Result<Self, StrError> {
        if ideal.plane_stress {
            return Err("finite-strain models do not work in plane-stress");
        }
        let actual: Box<dyn FiniteStrainTrait> = match param.stress_strain {
            StressStrain::LinearElastic { .. } => {
                return Err("LinearElastic is a small-strain model; use StressStrainModel instead")
            }
            StressStrain::VonMises { .. } => {
                return Err("VonMises is a small-strain model; use StressStrainModel instead")
            }
            StressStrain::SaintVenantKirchhoff { young, poisson } => {
                Box::new(SaintVenantKirchhoff::new(young, poisson))
            }
            StressStrain::NeoHookean { young, poisson } => Box::new(NeoHookean::new(young, poisson)),
            StressStrain::FiniteStrainVonMises {
                young,
                poisson,
                z_ini,
                hardening,
            } => Box::new(VonMisesFinite::new(young, poisson, z_ini, hardening)),
        };
        Ok(FiniteStrainModel { actual })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
