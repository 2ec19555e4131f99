use super::{LocalState, StressStrainTrait};
use crate::base::Idealization;
use crate::StrError;
use russell_tensor::{t4_ddot_t2_update, LinElasticity, Tensor2, Tensor4};

/// Implements a linear elastic model
pub struct LinearElastic {
    pub model: LinElasticity,
}

impl LinearElastic {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, young: f64, poisson: f64) -> Self {
        LinearElastic {
            model: LinElasticity::new(young, poisson, ideal.two_dim, ideal.plane_stress),
        }
    }
}

impl StressStrainTrait for LinearElastic {
    /// Indicates that the stiffness matrix is symmetric and constant
    fn symmetric_stiffness(&self) -> bool {
        true
    }

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        0
    }

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, _state: &mut LocalState) -> Result<(), StrError> {
        Ok(())
    }

    /// Computes the consistent tangent stiffness
    fn stiffness(&mut self, dd: &mut Tensor4, _state: &LocalState) -> Result<(), StrError> {
        dd.set_tensor(1.0, self.model.get_modulus());
        Ok(())
    }

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&mut self, state: &mut LocalState, delta_strain: &Tensor2) -> Result<(), StrError> {
        let dd = self.model.get_modulus();
        t4_ddot_t2_update(&mut state.stress, 1.0, dd, delta_strain, 1.0); // σ += D : Δε
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LinearElastic;
    use crate::base::Idealization;
    use crate::material::{LocalState, StressStrainTrait};
    use russell_lab::approx_eq;
    use russell_tensor::{Tensor2, Tensor4};

    #[test]
    fn update_stress_works_plane_strain() {
        let ideal = Idealization::new(2);
        let (young, poisson) = (1500.0, 0.25);
        let mut model = LinearElastic::new(&ideal, young, poisson);
        assert_eq!(model.symmetric_stiffness(), true);
        assert_eq!(model.n_internal_values(), 0);

        let mut state = LocalState::new(ideal.mandel(), 0);
        model.initialize_internal_values(&mut state).unwrap();

        // uniaxial strain: εxx = 0.001
        let mut deps = Tensor2::new(ideal.mandel());
        deps.sym_set(0, 0, 0.001);
        model.update_stress(&mut state, &deps).unwrap();

        // plane-strain: σxx = (λ + 2G) εxx, σyy = σzz = λ εxx
        let lambda = young * poisson / ((1.0 + poisson) * (1.0 - 2.0 * poisson));
        let gg = young / (2.0 * (1.0 + poisson));
        approx_eq(state.stress.get(0, 0), (lambda + 2.0 * gg) * 0.001, 1e-12);
        approx_eq(state.stress.get(1, 1), lambda * 0.001, 1e-12);
        approx_eq(state.stress.get(2, 2), lambda * 0.001, 1e-12);

        // stiffness equals the elastic modulus
        let mut dd = Tensor4::new(ideal.mandel());
        model.stiffness(&mut dd, &state).unwrap();
        approx_eq(dd.matrix().get(0, 0), lambda + 2.0 * gg, 1e-12);
    }

    #[test]
    fn zero_strain_gives_zero_stress() {
        let ideal = Idealization::new(3);
        let mut model = LinearElastic::new(&ideal, 1000.0, 0.3);
        let mut state = LocalState::new(ideal.mandel(), 0);
        let deps = Tensor2::new(ideal.mandel());
        model.update_stress(&mut state, &deps).unwrap();
        for i in 0..state.stress.dim() {
            assert_eq!(state.stress.vector()[i], 0.0);
        }
    }
}
