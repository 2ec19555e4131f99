use russell_lab::{Matrix, Vector};
use russell_tensor::{Mandel, Tensor2};
use serde::{Deserialize, Serialize};

/// Holds the local state at a Gauss (integration) point
///
/// The state is initialized once and updated once per converged load
/// increment. For the plasticity models, slot 0 of `internal_values` holds
/// the cumulated (equivalent) plastic strain p.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalState {
    /// Holds the internal values Z
    pub internal_values: Vector,

    /// Holds the stress tensor
    ///
    /// This is the Cauchy stress σ for the small-strain models and the
    /// second Piola-Kirchhoff stress S for the finite-strain models.
    pub stress: Tensor2,

    /// Holds the cumulated (small) strain tensor ε
    ///
    /// (small-strain models only; empty otherwise)
    pub strain: Tensor2,

    /// Holds the deformation gradient F (3×3)
    ///
    /// (finite-strain models only; 0×0 otherwise)
    pub deformation_gradient: Matrix,

    /// Holds the logarithmic (Hencky) elastic strain tensor
    ///
    /// (finite-strain plasticity only; the tensor dimension is zero otherwise)
    pub elastic_strain: Tensor2,

    /// Holds the elastic (vs elastoplastic) flag of the last update
    pub elastic: bool,

    /// Holds the algorithmic plastic multiplier increment (Λ) of the last update
    pub algo_lambda: f64,
}

impl LocalState {
    /// Allocates a new instance for small-strain models
    pub fn new(mandel: Mandel, n_internal_values: usize) -> Self {
        LocalState {
            internal_values: Vector::new(n_internal_values),
            stress: Tensor2::new(mandel),
            strain: Tensor2::new(mandel),
            deformation_gradient: Matrix::new(0, 0),
            elastic_strain: Tensor2::new(mandel),
            elastic: true,
            algo_lambda: 0.0,
        }
    }

    /// Allocates a new instance for finite-strain models
    ///
    /// The deformation gradient is initialized to the identity and the
    /// stress tensors are 3D symmetric regardless of the mesh dimension.
    pub fn new_finite_strain(n_internal_values: usize) -> Self {
        let mut deformation_gradient = Matrix::new(3, 3);
        for i in 0..3 {
            deformation_gradient.set(i, i, 1.0);
        }
        LocalState {
            internal_values: Vector::new(n_internal_values),
            stress: Tensor2::new(Mandel::Symmetric),
            strain: Tensor2::new(Mandel::Symmetric),
            deformation_gradient,
            elastic_strain: Tensor2::new(Mandel::Symmetric),
            elastic: true,
            algo_lambda: 0.0,
        }
    }

    /// Updates the strain tensor given Δε
    ///
    /// ```text
    /// ε += α Δε
    /// ```
    ///
    /// # Panics
    ///
    /// A panic will occur if the tensors have different [Mandel].
    pub fn update_strain(&mut self, alpha: f64, delta_strain: &Tensor2) {
        assert_eq!(delta_strain.mandel(), self.strain.mandel());
        let strain = self.strain.vector_mut();
        for i in 0..strain.dim() {
            strain[i] += alpha * delta_strain.vector()[i];
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LocalState;
    use russell_tensor::{Mandel, Tensor2};

    #[test]
    fn new_works() {
        let state = LocalState::new(Mandel::Symmetric2D, 1);
        assert_eq!(state.internal_values.dim(), 1);
        assert_eq!(state.stress.dim(), 4);
        assert_eq!(state.strain.dim(), 4);
        assert_eq!(state.deformation_gradient.dims(), (0, 0));
        assert_eq!(state.elastic, true);
        assert_eq!(state.algo_lambda, 0.0);
    }

    #[test]
    fn new_finite_strain_works() {
        let state = LocalState::new_finite_strain(1);
        assert_eq!(state.stress.dim(), 6);
        assert_eq!(state.elastic_strain.dim(), 6);
        let ff = &state.deformation_gradient;
        assert_eq!(ff.dims(), (3, 3));
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(ff.get(i, j), if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn update_strain_works() {
        let mut state = LocalState::new(Mandel::Symmetric2D, 0);
        let mut deps = Tensor2::new(Mandel::Symmetric2D);
        deps.sym_set(0, 0, 0.1);
        deps.sym_set(1, 1, -0.2);
        state.update_strain(1.0, &deps);
        state.update_strain(0.5, &deps);
        assert_eq!(state.strain.get(0, 0), 0.15000000000000002);
        assert_eq!(state.strain.get(1, 1), -0.30000000000000004);
    }

    #[test]
    fn clone_and_serialize_work() {
        let mut state = LocalState::new_finite_strain(1);
        state.internal_values[0] = 0.123;
        let clone = state.clone();
        assert_eq!(clone.internal_values[0], 0.123);
        let json = serde_json::to_string(&state).unwrap();
        let read: LocalState = serde_json::from_str(&json).unwrap();
        assert_eq!(read.internal_values[0], 0.123);
        assert_eq!(read.deformation_gradient.get(2, 2), 1.0);
    }
}
