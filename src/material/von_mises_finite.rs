use super::{
    mat3_det, mat3_inverse, mat3_mul, mat3_push, mat3_to_tensor2_sym, solve_plastic_multiplier, sym_mat3_eigen,
    sym_mat3_reconstruct, tensor2_to_mat3, FiniteStrainTrait, LocalState,
};
use crate::base::{calc_bulk_shear, Hardening};
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Holds the index of the cumulated plastic strain internal variable
const P: usize = 0;

/// Implements the von Mises plasticity model at finite strain
///
/// The kinematics follow the multiplicative elastic-plastic decomposition
/// with logarithmic (Hencky) elastic strain εe. Given the new deformation
/// gradient, the update computes the trial elastic left Cauchy-Green tensor
/// through the relative deformation gradient, takes its spectral
/// decomposition, and applies Hencky elasticity in principal space:
///
/// ```text
/// τ = K tr(εe) I + 2 G dev(εe)
/// ```
///
/// The yield check f = q(τ) - σy(p) and the return mapping have the same
/// structure as the small-strain model: the plastic correction reduces the
/// volume-preserving (deviatoric) part of the elastic strain and leaves its
/// volumetric part untouched. The stored stress is S = F⁻¹ τ F⁻ᵀ (PK2).
pub struct VonMisesFinite {
    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,

    /// Initial size of the yield surface (initial yield stress)
    z_ini: f64,

    /// Isotropic hardening law
    hardening: Hardening,

    // scratchpads for the spectral update
    aux: Matrix,
    f_rel: Matrix,
    be: Matrix,
    work: Matrix,
    l: Vector,
    q: Matrix,
}

impl VonMisesFinite {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64, z_ini: f64, hardening: Hardening) -> Self {
        let (kk, gg) = calc_bulk_shear(young, poisson);
        VonMisesFinite {
            kk,
            gg,
            z_ini,
            hardening,
            aux: Matrix::new(3, 3),
            f_rel: Matrix::new(3, 3),
            be: Matrix::new(3, 3),
            work: Matrix::new(3, 3),
            l: Vector::new(3),
            q: Matrix::new(3, 3),
        }
    }
}

impl FiniteStrainTrait for VonMisesFinite {
    /// Indicates that the stiffness matrix is unsymmetric
    fn symmetric_stiffness(&self) -> bool {
        false
    }

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        1 // [p]
    }

    /// Initializes the internal values for the initial state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), StrError> {
        state.internal_values[P] = 0.0;
        Ok(())
    }

    /// Updates the stress tensor (PK2) and internal variables given the new deformation gradient
    fn update_stress(&mut self, state: &mut LocalState, deformation_gradient: &Matrix) -> Result<(), StrError> {
        let ff = deformation_gradient;
        if mat3_det(ff) <= 0.0 {
            return Err("deformation gradient determinant must be positive");
        }

        // relative deformation gradient: f = F_new F_old⁻¹
        mat3_inverse(&mut self.aux, &state.deformation_gradient)?;
        mat3_mul(&mut self.f_rel, ff, &self.aux);

        // trial elastic left Cauchy-Green tensor: be_trial = f exp(2 εe_old) fᵀ
        tensor2_to_mat3(&mut self.work, &state.elastic_strain);
        sym_mat3_eigen(&mut self.l, &mut self.q, &self.work)?;
        let exp2 = [
            f64::exp(2.0 * self.l[0]),
            f64::exp(2.0 * self.l[1]),
            f64::exp(2.0 * self.l[2]),
        ];
        sym_mat3_reconstruct(&mut self.work, &exp2, &self.q);
        mat3_push(&mut self.be, &self.f_rel, &self.work);

        // spectral decomposition of the trial tensor
        sym_mat3_eigen(&mut self.l, &mut self.q, &self.be)?;
        for i in 0..3 {
            if self.l[i] <= 0.0 {
                return Err("trial elastic left Cauchy-Green tensor is not positive-definite");
            }
        }

        // trial logarithmic elastic strain (principal values)
        let eps_tr = [
            0.5 * f64::ln(self.l[0]),
            0.5 * f64::ln(self.l[1]),
            0.5 * f64::ln(self.l[2]),
        ];
        let tr = eps_tr[0] + eps_tr[1] + eps_tr[2];
        let dev = [eps_tr[0] - tr / 3.0, eps_tr[1] - tr / 3.0, eps_tr[2] - tr / 3.0];

        // trial deviatoric Kirchhoff stress and von Mises invariant
        let s = [2.0 * self.gg * dev[0], 2.0 * self.gg * dev[1], 2.0 * self.gg * dev[2]];
        let q_trial = f64::sqrt(1.5 * (s[0] * s[0] + s[1] * s[1] + s[2] * s[2]));

        // elastic predictor / return mapping
        let p_old = state.internal_values[P];
        let f_trial = q_trial - self.hardening.yield_stress(self.z_ini, p_old);
        let (m, delta_p) = if f_trial <= 0.0 {
            state.elastic = true;
            state.algo_lambda = 0.0;
            (1.0, 0.0)
        } else {
            let delta_p = solve_plastic_multiplier(self.gg, self.z_ini, &self.hardening, q_trial, p_old)?;
            state.elastic = false;
            state.algo_lambda = delta_p;
            (1.0 - 3.0 * self.gg * delta_p / q_trial, delta_p)
        };

        // corrected elastic strain and Kirchhoff stress (principal values)
        let eps_new = [tr / 3.0 + m * dev[0], tr / 3.0 + m * dev[1], tr / 3.0 + m * dev[2]];
        let tau = [
            self.kk * tr + m * s[0],
            self.kk * tr + m * s[1],
            self.kk * tr + m * s[2],
        ];

        // rebuild the tensors in the trial principal directions
        sym_mat3_reconstruct(&mut self.work, &eps_new, &self.q);
        mat3_to_tensor2_sym(&mut state.elastic_strain, &self.work);
        sym_mat3_reconstruct(&mut self.work, &tau, &self.q);

        // S = F⁻¹ τ F⁻ᵀ
        mat3_inverse(&mut self.aux, ff)?;
        mat3_push(&mut self.be, &self.aux, &self.work);
        mat3_to_tensor2_sym(&mut state.stress, &self.be);

        // record the new deformation gradient and plastic strain
        for i in 0..3 {
            for j in 0..3 {
                state.deformation_gradient.set(i, j, ff.get(i, j));
            }
        }
        state.internal_values[P] = p_old + delta_p;
        Ok(())
    }

    /// Returns the (elastic) strain-energy density for the current state
    fn strain_energy(&self, state: &LocalState) -> Result<f64, StrError> {
        let eps = &state.elastic_strain;
        let tr = eps.trace();
        let mut dev_ddot_dev = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                let delta = if i == j { 1.0 } else { 0.0 };
                let dev_ij = eps.get(i, j) - tr / 3.0 * delta;
                dev_ddot_dev += dev_ij * dev_ij;
            }
        }
        Ok(0.5 * self.kk * tr * tr + self.gg * dev_ddot_dev)
    }

    /// Indicates that the tangent operator is not available in closed form
    ///
    /// The element computes a numerical (finite-difference) stiffness.
    fn has_analytical_stiffness(&self) -> bool {
        false
    }

    /// Not available; see [VonMisesFinite::has_analytical_stiffness]
    fn contract_stiffness(&self, _mm: &mut Matrix, _state: &LocalState, _a: &[f64], _b: &[f64]) -> Result<(), StrError> {
        Err("analytical stiffness is not available for VonMisesFinite")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
