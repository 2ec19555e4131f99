use super::FemState;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Defines the essential functions of finite elements
pub trait ElementTrait: Send {
    /// Indicates that the local Jacobian matrix is symmetric
    fn symmetric_jacobian(&self) -> bool;

    /// Returns the local-to-global equation map
    fn local_to_global(&self) -> &Vec<usize>;

    /// Initializes the internal values at all Gauss points
    fn initialize_internal_values(&self, state: &mut FemState) -> Result<(), StrError>;

    /// Updates the secondary values (stress and internal variables) at all Gauss points
    ///
    /// The update is relative to the trial state restored from the backups;
    /// for the small-strain elements the strain increment is computed from
    /// {ΔU}, whereas the finite-strain elements use the total {U} vector.
    fn update_secondary_values(&mut self, state: &mut FemState) -> Result<(), StrError>;

    /// Calculates the residual vector
    fn calc_residual(&mut self, residual: &mut Vector, state: &FemState) -> Result<(), StrError>;

    /// Calculates the Jacobian matrix
    fn calc_jacobian(&mut self, jacobian: &mut Matrix, state: &FemState) -> Result<(), StrError>;
}
