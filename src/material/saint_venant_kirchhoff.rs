use super::{green_lagrange_strain, mat3_det, FiniteStrainTrait, LocalState};
use crate::base::calc_lame;
use crate::StrError;
use russell_lab::Matrix;
use russell_tensor::{Mandel, Tensor2};

/// Implements the Saint Venant-Kirchhoff hyperelastic model
///
/// With E denoting the Green-Lagrange strain, the strain-energy density and
/// the second Piola-Kirchhoff stress are:
///
/// ```text
/// ψ(E) = μ E:E + (λ/2) tr(E)²
/// S = λ tr(E) I + 2 μ E
/// ```
pub struct SaintVenantKirchhoff {
    /// Lamé parameter λ
    lambda: f64,

    /// Lamé parameter μ (shear modulus)
    mu: f64,

    /// Green-Lagrange strain (scratch)
    ee: Tensor2,
}

impl SaintVenantKirchhoff {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64) -> Self {
        let (lambda, mu) = calc_lame(young, poisson);
        SaintVenantKirchhoff {
            lambda,
            mu,
            ee: Tensor2::new(Mandel::Symmetric),
        }
    }
}

impl FiniteStrainTrait for SaintVenantKirchhoff {
    /// Indicates that the stiffness matrix is symmetric
    fn symmetric_stiffness(&self) -> bool {
        true
    }

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        0
    }

    /// Initializes the internal values for the initial state
    fn initialize_internal_values(&self, _state: &mut LocalState) -> Result<(), StrError> {
        Ok(())
    }

    /// Updates the stress tensor (PK2) given the new deformation gradient
    fn update_stress(&mut self, state: &mut LocalState, deformation_gradient: &Matrix) -> Result<(), StrError> {
        let ff = deformation_gradient;
        if mat3_det(ff) <= 0.0 {
            return Err("deformation gradient determinant must be positive");
        }
        green_lagrange_strain(&mut self.ee, ff);
        let tr = self.ee.trace();
        for i in 0..3 {
            for j in i..3 {
                let delta = if i == j { 1.0 } else { 0.0 };
                state
                    .stress
                    .sym_set(i, j, self.lambda * tr * delta + 2.0 * self.mu * self.ee.get(i, j));
            }
        }
        for i in 0..3 {
            for j in 0..3 {
                state.deformation_gradient.set(i, j, ff.get(i, j));
            }
        }
        Ok(())
    }

    /// Returns the strain-energy density for the current state
    fn strain_energy(&self, state: &LocalState) -> Result<f64, StrError> {
        let mut ee = Tensor2::new(Mandel::Symmetric);
        green_lagrange_strain(&mut ee, &state.deformation_gradient);
        let tr = ee.trace();
        let mut ee_ddot_ee = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                ee_ddot_ee += ee.get(i, j) * ee.get(i, j);
            }
        }
        Ok(self.mu * ee_ddot_ee + 0.5 * self.lambda * tr * tr)
    }

    /// Indicates that the tangent-operator contraction is available in closed form
    fn has_analytical_stiffness(&self) -> bool {
        true
    }

    /// Computes the tangent-operator contraction for a pair of gradient vectors
    ///
    /// ```text
    /// M = I (2μ E:B + λ tr(E) tr(B)) + F (μ Bᵀ + λ B + μ tr(B) I) Fᵀ
    /// ```
    ///
    /// with B = a ⊗ b.
    fn contract_stiffness(&self, mm: &mut Matrix, state: &LocalState, a: &[f64], b: &[f64]) -> Result<(), StrError> {
        let ff = &state.deformation_gradient;
        let mut ee = Tensor2::new(Mandel::Symmetric);
        green_lagrange_strain(&mut ee, ff);
        let tr_ee = ee.trace();
        let tr_bb = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
        let mut ee_ddot_bb = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                ee_ddot_bb += ee.get(i, j) * a[i] * b[j];
            }
        }
        let scalar = 2.0 * self.mu * ee_ddot_bb + self.lambda * tr_ee * tr_bb;
        for i in 0..3 {
            for j in 0..3 {
                // F (μ Bᵀ + λ B + μ tr(B) I) Fᵀ
                let mut sum = 0.0;
                for k in 0..3 {
                    for l in 0..3 {
                        let delta_kl = if k == l { 1.0 } else { 0.0 };
                        let inner = self.mu * b[k] * a[l] + self.lambda * a[k] * b[l] + self.mu * tr_bb * delta_kl;
                        sum += ff.get(i, k) * inner * ff.get(j, l);
                    }
                }
                let delta_ij = if i == j { 1.0 } else { 0.0 };
                mm.set(i, j, scalar * delta_ij + sum);
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
