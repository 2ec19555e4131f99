use super::{LocalState, StressStrainTrait};
use crate::base::{Hardening, Idealization};
use crate::StrError;
use russell_tensor::{t4_ddot_t2_update, LinElasticity, Tensor2, Tensor4};
use russell_tensor::{IDENTITY2, P_SYMDEV, SQRT_2_BY_3};

/// Defines an alias to IDENTITY2
const I: &[f64; 9] = &IDENTITY2;

/// Defines an alias to P_SYMDEV
const PSD: &[[f64; 9]; 9] = &P_SYMDEV;

/// Holds the index of the cumulated plastic strain internal variable
const P: usize = 0;

/// Maximum number of iterations of the return-mapping Newton loop
const N_MAX_ITERATIONS: usize = 15;

/// Solves the return-mapping equation for the plastic multiplier
///
/// ```text
/// r(Δλ) = σd_trial - 3 G Δλ - σy(p + Δλ) = 0
/// ```
///
/// This scalar Newton iteration is shared by the small-strain and the
/// finite-strain von Mises models (the return mapping has the same structure
/// in the space of logarithmic elastic strains).
pub(crate) fn solve_plastic_multiplier(
    gg: f64,
    z_ini: f64,
    hardening: &Hardening,
    sigma_d_trial: f64,
    p: f64,
) -> Result<f64, StrError> {
    let tol = 1e-9 * f64::max(1.0, z_ini);
    let mut lambda = (sigma_d_trial - hardening.yield_stress(z_ini, p)) / (3.0 * gg + hardening.modulus(z_ini, p));
    for _ in 0..N_MAX_ITERATIONS {
        let r = sigma_d_trial - 3.0 * gg * lambda - hardening.yield_stress(z_ini, p + lambda);
        if f64::abs(r) <= tol {
            return Ok(lambda);
        }
        let dr = -3.0 * gg - hardening.modulus(z_ini, p + lambda);
        lambda -= r / dr;
    }
    Err("von Mises return mapping did not converge")
}

/// Implements the von Mises plasticity model with isotropic hardening
///
/// The yield function is:
///
/// ```text
/// f = σd - σy(p)
/// ```
///
/// where σd is the von Mises (deviatoric) stress invariant and σy(p) is the
/// yield stress given by the [Hardening] law in terms of the cumulated
/// plastic strain p. The elastic-predictor/return-mapping update solves the
/// plastic multiplier with a scalar Newton iteration, which reduces to the
/// closed-form solution for linear hardening.
///
/// **Note:** This model works in 2D (plane-strain only) or 3D.
pub struct VonMises {
    /// Linear elasticity
    lin_elasticity: LinElasticity,

    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,

    /// Initial size of the yield surface (initial yield stress)
    z_ini: f64,

    /// Isotropic hardening law
    hardening: Hardening,

    /// Deviatoric stress: s = dev(σ)
    s: Tensor2,
}

impl VonMises {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, young: f64, poisson: f64, z_ini: f64, hardening: Hardening) -> Self {
        assert!(!ideal.plane_stress);
        let lin_elasticity = LinElasticity::new(young, poisson, ideal.two_dim, false);
        let (kk, gg) = lin_elasticity.get_bulk_shear();
        VonMises {
            lin_elasticity,
            kk,
            gg,
            z_ini,
            hardening,
            s: Tensor2::new(ideal.mandel()),
        }
    }

    /// Calculates the yield function f = σd - σy(p)
    pub fn yield_function(&self, state: &LocalState) -> f64 {
        let sigma_d = state.stress.invariant_sigma_d();
        let p = state.internal_values[P];
        sigma_d - self.hardening.yield_stress(self.z_ini, p)
    }
}

impl StressStrainTrait for VonMises {
    /// Indicates that the stiffness matrix is symmetric
    fn symmetric_stiffness(&self) -> bool {
        true
    }

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        1 // [p]
    }

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), StrError> {
        state.internal_values[P] = 0.0;
        let f = self.yield_function(state);
        if f > 0.0 {
            return Err("stress is outside the yield surface");
        }
        Ok(())
    }

    /// Computes the consistent tangent stiffness
    fn stiffness(&mut self, dd: &mut Tensor4, state: &LocalState) -> Result<(), StrError> {
        // handle elastic case
        if state.elastic {
            dd.set_tensor(1.0, self.lin_elasticity.get_modulus()); // D ← Dₑ
            return Ok(());
        }

        // extract current state variables
        let sigma = &state.stress;
        let lambda = state.algo_lambda;
        let p = state.internal_values[P];
        sigma.deviator(&mut self.s); // s = dev(σ)

        // coefficients
        let (kk, gg) = (self.kk, self.gg);
        let hh = self.hardening.modulus(self.z_ini, p);
        let sigma_d = sigma.invariant_sigma_d();
        let sigma_d_trial = sigma_d + lambda * 3.0 * gg;
        let norm_s = sigma_d * SQRT_2_BY_3;
        let d = 3.0 * gg + hh;
        let a = 2.0 * gg * (1.0 - lambda * 3.0 * gg / sigma_d_trial);
        let b = 6.0 * gg * gg * (lambda / sigma_d_trial - 1.0 / d) / (norm_s * norm_s);

        // access Mandel representation
        let nd = sigma.dim();
        let mat = dd.matrix_mut();
        let s = self.s.vector();

        // consistent tangent modulus
        for i in 0..nd {
            for j in 0..nd {
                mat.set(i, j, a * PSD[i][j] + b * s[i] * s[j] + kk * I[i] * I[j]);
            }
        }
        Ok(())
    }

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&mut self, state: &mut LocalState, delta_strain: &Tensor2) -> Result<(), StrError> {
        // reset flags
        state.elastic = true;
        state.algo_lambda = 0.0;

        // trial stress: σ ← σ_trial
        let dd = self.lin_elasticity.get_modulus();
        t4_ddot_t2_update(&mut state.stress, 1.0, dd, delta_strain, 1.0); // σ += D : Δε

        // elastic update
        let f_trial = self.yield_function(state);
        if f_trial <= 0.0 {
            return Ok(());
        }

        // plastic multiplier
        let p = state.internal_values[P];
        let sigma_d_trial = state.stress.invariant_sigma_d();
        let lambda = solve_plastic_multiplier(self.gg, self.z_ini, &self.hardening, sigma_d_trial, p)?;

        // coefficients
        let sigma_m_trial = state.stress.invariant_sigma_m();
        let m = 1.0 - lambda * 3.0 * self.gg / sigma_d_trial;

        // s_trial = dev(σ_trial)
        state.stress.deviator(&mut self.s); // s ← s_trial

        // access Mandel representation
        let nd = state.stress.dim();
        let vec = state.stress.vector_mut();
        let s_trial = self.s.vector();

        // σ_new = m s_trial + σm_trial I
        for i in 0..nd {
            vec[i] = m * s_trial[i] + sigma_m_trial * I[i];
        }

        // elastoplastic update
        state.elastic = false;
        state.algo_lambda = lambda;
        state.internal_values[P] = p + lambda;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::VonMises;
    use crate::base::{Hardening, Idealization};
    use crate::material::{LocalState, StressStrainTrait};
    use russell_lab::approx_eq;
    use russell_tensor::{Tensor2, Tensor4};

    // returns a purely deviatoric plane-strain increment with Δεxx = a and Δεyy = -a
    fn deviatoric_increment(ideal: &Idealization, a: f64) -> Tensor2 {
        let mut deps = Tensor2::new(ideal.mandel());
        deps.sym_set(0, 0, a);
        deps.sym_set(1, 1, -a);
        deps
    }

    #[test]
    fn initialize_internal_values_works() {
        let ideal = Idealization::new(2);
        let hardening = Hardening::Linear { hh: 800.0 };
        let model = VonMises::new(&ideal, 1500.0, 0.25, 9.0, hardening);
        let mut state = LocalState::new(ideal.mandel(), 1);
        model.initialize_internal_values(&mut state).unwrap();
        assert_eq!(state.internal_values[0], 0.0);

        // initial stress beyond the yield surface is an error
        state.stress.sym_set(0, 0, 100.0);
        state.stress.sym_set(1, 1, -100.0);
        assert_eq!(
            model.initialize_internal_values(&mut state).err(),
            Some("stress is outside the yield surface")
        );
    }

    #[test]
    fn update_stress_works_linear_hardening() {
        let ideal = Idealization::new(2);
        let (young, poisson) = (1500.0, 0.25);
        let (z_ini, hh) = (9.0, 800.0);
        let gg = young / (2.0 * (1.0 + poisson));
        let mut model = VonMises::new(&ideal, young, poisson, z_ini, Hardening::Linear { hh });

        let mut state = LocalState::new(ideal.mandel(), 1);
        model.initialize_internal_values(&mut state).unwrap();

        // first increment: exactly to the yield surface
        // σd of s = diag(2Ga, -2Ga, 0) is 2√3 G a
        let a = z_ini / (2.0 * f64::sqrt(3.0) * gg);
        let deps = deviatoric_increment(&ideal, a);
        model.update_stress(&mut state, &deps).unwrap();
        assert_eq!(state.elastic, true);
        assert_eq!(state.internal_values[0], 0.0);
        approx_eq(state.stress.invariant_sigma_d(), z_ini, 1e-12);

        // second increment: elastoplastic
        model.update_stress(&mut state, &deps).unwrap();
        assert_eq!(state.elastic, false);
        let lambda_correct = z_ini / (3.0 * gg + hh);
        approx_eq(state.algo_lambda, lambda_correct, 1e-12);
        approx_eq(state.internal_values[0], lambda_correct, 1e-12);
        // yield consistency: σd = σy(p)
        approx_eq(
            state.stress.invariant_sigma_d(),
            z_ini + hh * state.internal_values[0],
            1e-11,
        );
        // mean stress unchanged (purely deviatoric flow)
        approx_eq(state.stress.invariant_sigma_m(), 0.0, 1e-12);
    }

    #[test]
    fn update_stress_works_voce_hardening() {
        let ideal = Idealization::new(2);
        let (young, poisson) = (70_000.0, 0.3);
        let z_ini = 350.0;
        let hardening = Hardening::Voce {
            sig_u: 500.0,
            bb: 1000.0,
        };
        let gg = young / (2.0 * (1.0 + poisson));
        let mut model = VonMises::new(&ideal, young, poisson, z_ini, hardening);

        let mut state = LocalState::new(ideal.mandel(), 1);
        model.initialize_internal_values(&mut state).unwrap();

        // drive well into the plastic regime with several increments
        let a = z_ini / (2.0 * f64::sqrt(3.0) * gg);
        let deps = deviatoric_increment(&ideal, a);
        let mut p_prev = 0.0;
        for i in 0..6 {
            model.update_stress(&mut state, &deps).unwrap();
            let p = state.internal_values[0];
            // p is non-negative and non-decreasing
            assert!(p >= p_prev);
            p_prev = p;
            if i > 0 {
                assert_eq!(state.elastic, false);
                // yield consistency: σd = σy(p)
                approx_eq(
                    state.stress.invariant_sigma_d(),
                    hardening.yield_stress(z_ini, p),
                    1e-9,
                );
            }
        }
        // the stress stays below the saturation level
        assert!(state.stress.invariant_sigma_d() < 500.0);
    }

    #[test]
    fn stiffness_works() {
        let ideal = Idealization::new(2);
        let (young, poisson) = (1500.0, 0.25);
        let (z_ini, hh) = (9.0, 800.0);
        let gg = young / (2.0 * (1.0 + poisson));
        let kk = young / (3.0 * (1.0 - 2.0 * poisson));
        let mut model = VonMises::new(&ideal, young, poisson, z_ini, Hardening::Linear { hh });

        let mut state = LocalState::new(ideal.mandel(), 1);
        model.initialize_internal_values(&mut state).unwrap();
        let mut dd = Tensor4::new(ideal.mandel());

        // elastic branch returns Dₑ
        model.stiffness(&mut dd, &state).unwrap();
        approx_eq(dd.matrix().get(0, 0), kk + 4.0 * gg / 3.0, 1e-12);

        // elastoplastic branch: symmetric tangent
        let a = 2.0 * z_ini / (2.0 * f64::sqrt(3.0) * gg);
        let deps = deviatoric_increment(&ideal, a);
        model.update_stress(&mut state, &deps).unwrap();
        assert_eq!(state.elastic, false);
        model.stiffness(&mut dd, &state).unwrap();
        let mat = dd.matrix();
        let nd = state.stress.dim();
        for i in 0..nd {
            for j in 0..nd {
                approx_eq(mat.get(i, j), mat.get(j, i), 1e-10);
            }
        }
    }
}
