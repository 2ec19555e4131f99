use super::{ElementTrait, FemState};
use crate::base::{calculate_strain, compute_local_to_global, Config, ParamSolid};
use crate::fem::FemBase;
use crate::material::StressStrainModel;
use crate::StrError;
use gemlab::integ::Gauss;
use gemlab::mesh::{Cell, Mesh};
use gemlab::shapes::Scratchpad;
use russell_lab::{Matrix, Vector};
use russell_tensor::{Tensor2, Tensor4, SQRT_2};

/// Implements a small-strain solid element
///
/// The residual and stiffness are assembled with the strain-displacement
/// matrix B in the Mandel basis:
///
/// ```text
/// r = Σₚ Bᵀ σ |J| wₚ th      K = Σₚ Bᵀ D B |J| wₚ th
/// ```
pub struct ElementSolid<'a> {
    /// Holds configuration parameters
    config: &'a Config,

    /// Holds the cell
    cell: &'a Cell,

    /// Holds the local-to-global equation map
    local_to_global: Vec<usize>,

    /// Holds the scratchpad for interpolation and gradients
    pad: Scratchpad,

    /// Holds the integration points
    gauss: Gauss,

    /// Holds the stress-strain model
    model: StressStrainModel,

    /// Strain increment at a Gauss point (scratch)
    deps: Tensor2,

    /// Consistent tangent stiffness (scratch)
    dd: Tensor4,

    /// Strain-displacement matrix in Mandel basis (scratch)
    bb: Matrix,
}

impl<'a> ElementSolid<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        base: &FemBase,
        config: &'a Config,
        cell: &'a Cell,
        param: &ParamSolid,
    ) -> Result<Self, StrError> {
        let ndim = mesh.ndim;
        let local_to_global = compute_local_to_global(&base.emap, &base.equations, cell)?;
        let mut pad = Scratchpad::new(ndim, cell.kind)?;
        mesh.set_pad(&mut pad, &cell.points);
        let gauss = config.gauss(cell)?;
        let model = StressStrainModel::new(&config.ideal, param)?;
        let mandel = config.ideal.mandel();
        let n_mandel = mandel.dim();
        let neq = local_to_global.len();
        Ok(ElementSolid {
            config,
            cell,
            local_to_global,
            pad,
            gauss,
            model,
            deps: Tensor2::new(mandel),
            dd: Tensor4::new(mandel),
            bb: Matrix::new(n_mandel, neq),
        })
    }

    /// Assembles the strain-displacement matrix B at the current gradient
    ///
    /// The Mandel components are ordered (xx, yy, zz, √2 xy, √2 yz, √2 xz);
    /// in 2D (plane-strain) the zz row is zero.
    fn calc_bb_matrix(&mut self) {
        let ndim = if self.config.ideal.two_dim { 2 } else { 3 };
        let nnode = self.pad.kind.nnode();
        let gg = &self.pad.gradient;
        self.bb.fill(0.0);
        for m in 0..nnode {
            if ndim == 2 {
                self.bb.set(0, 0 + 2 * m, gg.get(m, 0));
                self.bb.set(1, 1 + 2 * m, gg.get(m, 1));
                self.bb.set(3, 0 + 2 * m, gg.get(m, 1) / SQRT_2);
                self.bb.set(3, 1 + 2 * m, gg.get(m, 0) / SQRT_2);
            } else {
                self.bb.set(0, 0 + 3 * m, gg.get(m, 0));
                self.bb.set(1, 1 + 3 * m, gg.get(m, 1));
                self.bb.set(2, 2 + 3 * m, gg.get(m, 2));
                self.bb.set(3, 0 + 3 * m, gg.get(m, 1) / SQRT_2);
                self.bb.set(3, 1 + 3 * m, gg.get(m, 0) / SQRT_2);
                self.bb.set(4, 1 + 3 * m, gg.get(m, 2) / SQRT_2);
                self.bb.set(4, 2 + 3 * m, gg.get(m, 1) / SQRT_2);
                self.bb.set(5, 0 + 3 * m, gg.get(m, 2) / SQRT_2);
                self.bb.set(5, 2 + 3 * m, gg.get(m, 0) / SQRT_2);
            }
        }
    }
}

impl<'a> ElementTrait for ElementSolid<'a> {
    /// Indicates that the local Jacobian matrix is symmetric
    fn symmetric_jacobian(&self) -> bool {
        self.model.actual.symmetric_stiffness()
    }

    /// Returns the local-to-global equation map
    fn local_to_global(&self) -> &Vec<usize> {
        &self.local_to_global
    }

    /// Initializes the internal values at all Gauss points
    fn initialize_internal_values(&self, state: &mut FemState) -> Result<(), StrError> {
        state.gauss[self.cell.id]
            .all
            .iter_mut()
            .map(|local_state| self.model.actual.initialize_internal_values(local_state))
            .collect()
    }

    /// Updates the secondary values at all Gauss points
    fn update_secondary_values(&mut self, state: &mut FemState) -> Result<(), StrError> {
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            calculate_strain(
                &mut self.deps,
                &state.duu,
                &self.config.ideal,
                &self.local_to_global,
                iota,
                &mut self.pad,
            )?;
            let local_state = &mut state.gauss[self.cell.id].all[p];
            local_state.update_strain(1.0, &self.deps);
            self.model.actual.update_stress(local_state, &self.deps)?;
        }
        Ok(())
    }

    /// Calculates the residual vector
    fn calc_residual(&mut self, residual: &mut Vector, state: &FemState) -> Result<(), StrError> {
        let neq = self.local_to_global.len();
        let n_mandel = self.deps.dim();
        let th = self.config.ideal.thickness;
        residual.fill(0.0);
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            let det_jac = self.pad.calc_gradient(iota)?;
            self.calc_bb_matrix();
            let coef = det_jac * self.gauss.weight(p) * th;
            let sig = state.gauss[self.cell.id].all[p].stress.vector();
            for k in 0..neq {
                let mut sum = 0.0;
                for i in 0..n_mandel {
                    sum += self.bb.get(i, k) * sig[i];
                }
                residual[k] += sum * coef;
            }
        }
        Ok(())
    }

    /// Calculates the Jacobian matrix
    fn calc_jacobian(&mut self, jacobian: &mut Matrix, state: &FemState) -> Result<(), StrError> {
        let neq = self.local_to_global.len();
        let n_mandel = self.deps.dim();
        let th = self.config.ideal.thickness;
        jacobian.fill(0.0);
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            let det_jac = self.pad.calc_gradient(iota)?;
            self.calc_bb_matrix();
            let coef = det_jac * self.gauss.weight(p) * th;
            self.model.actual.stiffness(&mut self.dd, &state.gauss[self.cell.id].all[p])?;
            let dd_mat = self.dd.matrix();
            for k in 0..neq {
                for l in 0..neq {
                    let mut sum = 0.0;
                    for i in 0..n_mandel {
                        for j in 0..n_mandel {
                            sum += self.bb.get(i, k) * dd_mat.get(i, j) * self.bb.get(j, l);
                        }
                    }
                    jacobian.set(k, l, jacobian.get(k, l) + sum * coef);
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
