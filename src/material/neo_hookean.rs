use super::{mat3_det, mat3_inverse, FiniteStrainTrait, LocalState};
use crate::base::calc_lame;
use crate::StrError;
use russell_lab::Matrix;

/// Implements a compressible neo-Hookean hyperelastic model
///
/// With J = det(F) and I_C = tr(FᵀF), the strain-energy density is:
///
/// ```text
/// ψ(F) = (μ/2) (I_C - 3) - μ ln(J) + (λ/2) ln(J)²
/// ```
///
/// yielding the first Piola-Kirchhoff stress:
///
/// ```text
/// P = μ (F - F⁻ᵀ) + λ ln(J) F⁻ᵀ
/// ```
///
/// and the second Piola-Kirchhoff stress S = μ (I - C⁻¹) + λ ln(J) C⁻¹.
pub struct NeoHookean {
    /// Lamé parameter λ
    lambda: f64,

    /// Lamé parameter μ (shear modulus)
    mu: f64,

    /// Inverse of the deformation gradient (scratch)
    ffi: Matrix,
}

impl NeoHookean {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64) -> Self {
        let (lambda, mu) = calc_lame(young, poisson);
        NeoHookean {
            lambda,
            mu,
            ffi: Matrix::new(3, 3),
        }
    }
}

impl FiniteStrainTrait for NeoHookean {
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
        let jj = mat3_inverse(&mut self.ffi, ff)?;
        if jj <= 0.0 {
            return Err("deformation gradient determinant must be positive");
        }
        let ln_jj = f64::ln(jj);
        // C⁻¹ = F⁻¹ F⁻ᵀ
        for i in 0..3 {
            for j in i..3 {
                let mut cinv = 0.0;
                for k in 0..3 {
                    cinv += self.ffi.get(i, k) * self.ffi.get(j, k);
                }
                let delta = if i == j { 1.0 } else { 0.0 };
                state
                    .stress
                    .sym_set(i, j, self.mu * (delta - cinv) + self.lambda * ln_jj * cinv);
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
        let ff = &state.deformation_gradient;
        let jj = mat3_det(ff);
        if jj <= 0.0 {
            return Err("deformation gradient determinant must be positive");
        }
        let ln_jj = f64::ln(jj);
        let mut ic = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                ic += ff.get(i, j) * ff.get(i, j);
            }
        }
        Ok(0.5 * self.mu * (ic - 3.0) - self.mu * ln_jj + 0.5 * self.lambda * ln_jj * ln_jj)
    }

    /// Indicates that the tangent-operator contraction is available in closed form
    fn has_analytical_stiffness(&self) -> bool {
        true
    }

    /// Computes the tangent-operator contraction for a pair of gradient vectors
    ///
    /// With H = F⁻ᵀ and B = a ⊗ b:
    ///
    /// ```text
    /// M = μ (a·b) I + λ (H a) ⊗ (H b) + (μ - λ ln J) (H b) ⊗ (H a)
    /// ```
    fn contract_stiffness(&self, mm: &mut Matrix, state: &LocalState, a: &[f64], b: &[f64]) -> Result<(), StrError> {
        let ff = &state.deformation_gradient;
        let mut ffi = Matrix::new(3, 3);
        let jj = mat3_inverse(&mut ffi, ff)?;
        if jj <= 0.0 {
            return Err("deformation gradient determinant must be positive");
        }
        let ln_jj = f64::ln(jj);
        let a_dot_b = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
        // (H a)ᵢ = Σ_k F⁻¹[k][i] a[k]
        let mut ha = [0.0; 3];
        let mut hb = [0.0; 3];
        for i in 0..3 {
            for k in 0..3 {
                ha[i] += ffi.get(k, i) * a[k];
                hb[i] += ffi.get(k, i) * b[k];
            }
        }
        let gamma = self.mu - self.lambda * ln_jj;
        for i in 0..3 {
            for j in 0..3 {
                let delta_ij = if i == j { 1.0 } else { 0.0 };
                mm.set(
                    i,
                    j,
                    self.mu * a_dot_b * delta_ij + self.lambda * ha[i] * hb[j] + gamma * hb[i] * ha[j],
                );
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
