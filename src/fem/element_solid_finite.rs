use super::{ElementTrait, FemState};
use crate::base::{calculate_deformation_gradient, compute_local_to_global, Config, ParamSolid};
use crate::fem::FemBase;
use crate::material::{first_piola_from_pk2, FiniteStrainModel, LocalState};
use crate::StrError;
use gemlab::integ::Gauss;
use gemlab::mesh::{Cell, Mesh};
use gemlab::shapes::Scratchpad;
use russell_lab::{Matrix, Vector};

/// Step size for the finite-difference Jacobian of history-dependent models
const FD_STEP: f64 = 1e-7;

/// Implements a finite-strain solid element (total Lagrangian)
///
/// The residual integrates the first Piola-Kirchhoff stress P = F·S against
/// the shape-function gradients with respect to the reference coordinates:
///
/// ```text
/// r[m·nd+i] = Σₚ Σⱼ P[i][j] G[m][j] |J| wₚ th
/// ```
///
/// The stiffness assembles the material tangent-operator contraction per
/// node pair when the model provides it in closed form; otherwise a central
/// finite-difference approximation of the local residual is used.
pub struct ElementSolidFinite<'a> {
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

    /// Holds the finite-strain material model
    model: FiniteStrainModel,

    /// Deformation gradient at a Gauss point (scratch)
    ff: Matrix,

    /// First Piola-Kirchhoff stress at a Gauss point (scratch)
    pp: Matrix,

    /// Tangent-operator contraction for a node pair (scratch)
    mm: Matrix,
}

impl<'a> ElementSolidFinite<'a> {
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
        let model = FiniteStrainModel::new(&config.ideal, param)?;
        Ok(ElementSolidFinite {
            config,
            cell,
            local_to_global,
            pad,
            gauss,
            model,
            ff: Matrix::new(3, 3),
            pp: Matrix::new(3, 3),
            mm: Matrix::new(3, 3),
        })
    }

    /// Computes the deformation gradient at a Gauss point from a local displacement vector
    ///
    /// **Note:** The scratchpad gradient must have been computed already.
    fn deformation_gradient_local(&mut self, u_local: &Vector) {
        let ndim = self.config.ideal.ndim();
        let nnode = self.pad.kind.nnode();
        let gg = &self.pad.gradient;
        self.ff.fill(0.0);
        for i in 0..3 {
            self.ff.set(i, i, 1.0);
        }
        for m in 0..nnode {
            for i in 0..ndim {
                let um = u_local[i + ndim * m];
                for j in 0..ndim {
                    self.ff.set(i, j, self.ff.get(i, j) + um * gg.get(m, j));
                }
            }
        }
    }

    /// Calculates the residual for a given local displacement vector with trial stress updates
    ///
    /// This is used by the finite-difference Jacobian: the states of the
    /// Gauss points are cloned and updated with the perturbed deformation
    /// gradient, leaving the real state untouched.
    fn residual_with_trial_states(
        &mut self,
        residual: &mut Vector,
        state: &FemState,
        u_local: &Vector,
    ) -> Result<(), StrError> {
        let ndim = self.config.ideal.ndim();
        let nnode = self.pad.kind.nnode();
        let th = self.config.ideal.thickness;
        residual.fill(0.0);
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            let det_jac = self.pad.calc_gradient(iota)?;
            self.deformation_gradient_local(u_local);
            let mut trial: LocalState = state.gauss[self.cell.id].all[p].clone();
            self.model.actual.update_stress(&mut trial, &self.ff)?;
            first_piola_from_pk2(&mut self.pp, &self.ff, &trial.stress);
            let coef = det_jac * self.gauss.weight(p) * th;
            let gg = &self.pad.gradient;
            for m in 0..nnode {
                for i in 0..ndim {
                    let mut sum = 0.0;
                    for j in 0..ndim {
                        sum += self.pp.get(i, j) * gg.get(m, j);
                    }
                    residual[i + ndim * m] += sum * coef;
                }
            }
        }
        Ok(())
    }

    /// Calculates the Jacobian matrix by central finite differences
    fn numerical_jacobian(&mut self, jacobian: &mut Matrix, state: &FemState) -> Result<(), StrError> {
        let neq = self.local_to_global.len();
        let mut u_local = Vector::new(neq);
        for l in 0..neq {
            u_local[l] = state.uu[self.local_to_global[l]];
        }
        let mut r_plus = Vector::new(neq);
        let mut r_minus = Vector::new(neq);
        for j in 0..neq {
            let original = u_local[j];
            u_local[j] = original + FD_STEP;
            self.residual_with_trial_states(&mut r_plus, state, &u_local)?;
            u_local[j] = original - FD_STEP;
            self.residual_with_trial_states(&mut r_minus, state, &u_local)?;
            u_local[j] = original;
            for i in 0..neq {
                jacobian.set(i, j, (r_plus[i] - r_minus[i]) / (2.0 * FD_STEP));
            }
        }
        Ok(())
    }
}

impl<'a> ElementTrait for ElementSolidFinite<'a> {
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
    ///
    /// The deformation gradient is computed from the total {U} vector.
    fn update_secondary_values(&mut self, state: &mut FemState) -> Result<(), StrError> {
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            calculate_deformation_gradient(
                &mut self.ff,
                &state.uu,
                &self.config.ideal,
                &self.local_to_global,
                iota,
                &mut self.pad,
            )?;
            let local_state = &mut state.gauss[self.cell.id].all[p];
            self.model.actual.update_stress(local_state, &self.ff)?;
        }
        Ok(())
    }

    /// Calculates the residual vector
    fn calc_residual(&mut self, residual: &mut Vector, state: &FemState) -> Result<(), StrError> {
        let ndim = self.config.ideal.ndim();
        let nnode = self.pad.kind.nnode();
        let th = self.config.ideal.thickness;
        residual.fill(0.0);
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            let det_jac = self.pad.calc_gradient(iota)?;
            let local_state = &state.gauss[self.cell.id].all[p];
            first_piola_from_pk2(&mut self.pp, &local_state.deformation_gradient, &local_state.stress);
            let coef = det_jac * self.gauss.weight(p) * th;
            let gg = &self.pad.gradient;
            for m in 0..nnode {
                for i in 0..ndim {
                    let mut sum = 0.0;
                    for j in 0..ndim {
                        sum += self.pp.get(i, j) * gg.get(m, j);
                    }
                    residual[i + ndim * m] += sum * coef;
                }
            }
        }
        Ok(())
    }

    /// Calculates the Jacobian matrix
    fn calc_jacobian(&mut self, jacobian: &mut Matrix, state: &FemState) -> Result<(), StrError> {
        if !self.model.actual.has_analytical_stiffness() {
            return self.numerical_jacobian(jacobian, state);
        }
        let ndim = self.config.ideal.ndim();
        let nnode = self.pad.kind.nnode();
        let th = self.config.ideal.thickness;
        jacobian.fill(0.0);
        let mut a = [0.0; 3];
        let mut b = [0.0; 3];
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            let det_jac = self.pad.calc_gradient(iota)?;
            let local_state = &state.gauss[self.cell.id].all[p];
            let coef = det_jac * self.gauss.weight(p) * th;
            for m in 0..nnode {
                for i in 0..3 {
                    a[i] = if i < ndim { self.pad.gradient.get(m, i) } else { 0.0 };
                }
                for n in 0..nnode {
                    for j in 0..3 {
                        b[j] = if j < ndim { self.pad.gradient.get(n, j) } else { 0.0 };
                    }
                    self.model.actual.contract_stiffness(&mut self.mm, local_state, &a, &b)?;
                    for i in 0..ndim {
                        for j in 0..ndim {
                            let (row, col) = (i + ndim * m, j + ndim * n);
                            jacobian.set(row, col, jacobian.get(row, col) + self.mm.get(i, j) * coef);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
