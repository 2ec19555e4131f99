use super::{ElementSolid, ElementSolidFinite, ElementTrait, FemBase, FemState};
use crate::base::{assemble_matrix, assemble_vector, Config, Elem};
use crate::StrError;
use gemlab::mesh::{Cell, Mesh};
use rayon::prelude::*;
use russell_lab::{Matrix, Vector};
use russell_sparse::CooMatrix;

/// Defines a generic finite element, wrapping an "actual" implementation
pub struct GenericElement<'a> {
    /// Connects to the "actual" implementation
    pub actual: Box<dyn ElementTrait + 'a>,

    /// Holds the local residual vector
    pub residual: Vector,

    /// Holds the local Jacobian matrix
    pub jacobian: Matrix,
}

/// Holds a collection of (generic) finite elements
pub struct Elements<'a> {
    /// All elements
    pub all: Vec<GenericElement<'a>>,
}

impl<'a> GenericElement<'a> {
    /// Allocates new instance
    pub fn new(mesh: &'a Mesh, base: &'a FemBase, config: &'a Config, cell: &'a Cell) -> Result<Self, StrError> {
        let element = base.attributes.get(cell)?;
        let actual: Box<dyn ElementTrait> = match element {
            Elem::Solid(p) => {
                if p.stress_strain.finite_strain() {
                    Box::new(ElementSolidFinite::new(mesh, base, config, cell, p)?)
                } else {
                    Box::new(ElementSolid::new(mesh, base, config, cell, p)?)
                }
            }
        };
        let neq = base.n_local_eq(cell).unwrap();
        Ok(GenericElement {
            actual,
            residual: Vector::new(neq),
            jacobian: Matrix::new(neq, neq),
        })
    }
}

impl<'a> Elements<'a> {
    /// Allocates new instance
    pub fn new(mesh: &'a Mesh, base: &'a FemBase, config: &'a Config) -> Result<Self, StrError> {
        let res: Result<Vec<_>, _> = mesh
            .cells
            .iter()
            .map(|cell| GenericElement::new(mesh, base, config, cell))
            .collect();
        match res {
            Ok(all) => Ok(Elements { all }),
            Err(e) => Err(e),
        }
    }

    /// Returns whether all local Jacobian matrices are symmetric or not
    pub fn all_symmetric_jacobians(&self) -> bool {
        for e in &self.all {
            if !e.actual.symmetric_jacobian() {
                return false;
            }
        }
        true
    }

    /// Initializes all internal values
    pub fn initialize_internal_values(&mut self, state: &mut FemState) -> Result<(), StrError> {
        self.all
            .iter_mut()
            .map(|e| e.actual.initialize_internal_values(state))
            .collect()
    }

    /// Updates secondary values such as stresses and internal values
    ///
    /// Note that state.uu and state.duu have been updated already
    pub fn update_secondary_values(&mut self, state: &mut FemState) -> Result<(), StrError> {
        self.all
            .iter_mut()
            .map(|e| e.actual.update_secondary_values(state))
            .collect()
    }

    /// Computes the residual vectors
    pub fn calc_residuals(&mut self, state: &FemState) -> Result<(), StrError> {
        self.all.iter_mut().map(|e| e.actual.calc_residual(&mut e.residual, state)).collect()
    }

    /// Computes the Jacobian matrices
    pub fn calc_jacobians(&mut self, state: &FemState) -> Result<(), StrError> {
        self.all.iter_mut().map(|e| e.actual.calc_jacobian(&mut e.jacobian, state)).collect()
    }

    /// Computes the residual vectors in parallel
    pub fn calc_residuals_parallel(&mut self, state: &FemState) -> Result<(), StrError> {
        self.all
            .par_iter_mut()
            .map(|e| e.actual.calc_residual(&mut e.residual, state))
            .collect()
    }

    /// Computes the Jacobian matrices in parallel
    pub fn calc_jacobians_parallel(&mut self, state: &FemState) -> Result<(), StrError> {
        self.all
            .par_iter_mut()
            .map(|e| e.actual.calc_jacobian(&mut e.jacobian, state))
            .collect()
    }

    /// Assembles the residual vectors
    ///
    /// **Notes:**
    ///
    /// 1. You must call calc residuals first
    /// 2. The global vector R will be cleared (with zeros) at the beginning
    pub fn assemble_residuals(&self, rr: &mut Vector, prescribed: &[bool]) {
        rr.fill(0.0); // << important
        self.all
            .iter()
            .for_each(|e| assemble_vector(rr, &e.residual, &e.actual.local_to_global(), &prescribed));
    }

    /// Assembles the Jacobian matrices
    ///
    /// **Notes:**
    ///
    /// 1. You must call calc jacobians first
    /// 2. The CooMatrix position in the global matrix K will be reset at the beginning
    pub fn assemble_jacobians(&self, kk: &mut CooMatrix, prescribed: &[bool]) -> Result<(), StrError> {
        kk.reset(); // << important
        for e in &self.all {
            assemble_matrix(kk, &e.jacobian, &e.actual.local_to_global(), &prescribed)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Elements;
    use crate::base::{Config, Elem, ParamSolid};
    use crate::fem::{FemBase, FemState};
    use gemlab::mesh::Samples;
    use russell_lab::vec_approx_eq;

    #[test]
    fn new_handles_errors() {
        let mesh = Samples::one_tri3();
        let mut config = Config::new(&mesh);
        config.set_ngauss(1, 100); // wrong
        let p1 = ParamSolid::sample_linear_elastic();
        let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))]).unwrap();
        assert!(Elements::new(&mesh, &base, &config).is_err());
    }

    #[test]
    fn new_works_and_dispatches_models() {
        let mesh = Samples::one_qua4();
        let config = Config::new(&mesh);

        let p1 = ParamSolid::sample_von_mises();
        let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))]).unwrap();
        let elements = Elements::new(&mesh, &base, &config).unwrap();
        assert_eq!(elements.all.len(), 1);
        assert_eq!(elements.all_symmetric_jacobians(), true);

        let p1 = ParamSolid::sample_finite_strain_von_mises();
        let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))]).unwrap();
        let elements = Elements::new(&mesh, &base, &config).unwrap();
        assert_eq!(elements.all_symmetric_jacobians(), false);
    }

    #[test]
    fn parallel_and_serial_residuals_coincide() {
        let mesh = Samples::three_tri3();
        let p1 = ParamSolid::sample_linear_elastic();
        let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))]).unwrap();
        let config = Config::new(&mesh);
        let mut elements = Elements::new(&mesh, &base, &config).unwrap();
        let mut state = FemState::new(&mesh, &base, &config).unwrap();

        // impose a deformation and update the stresses
        for i in 0..state.uu.dim() {
            state.uu[i] = 0.001 * (i as f64);
            state.duu[i] = state.uu[i];
        }
        elements.update_secondary_values(&mut state).unwrap();

        elements.calc_residuals(&state).unwrap();
        let serial: Vec<_> = elements.all.iter().map(|e| e.residual.clone()).collect();

        elements.calc_residuals_parallel(&state).unwrap();
        for (e, correct) in elements.all.iter().zip(serial.iter()) {
            vec_approx_eq(&e.residual, correct, 1e-15);
        }
    }
}
