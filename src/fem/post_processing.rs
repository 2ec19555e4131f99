use super::{Elements, FemBase, FemState, FileIo};
use crate::base::Config;
use crate::material::cauchy_from_pk2;
use crate::StrError;
use gemlab::mesh::{CellId, Mesh};
use russell_lab::Vector;
use russell_tensor::Tensor2;

/// Implements post-processing operations over the simulation results
pub struct PostProc<'a> {
    /// Holds the mesh
    mesh: &'a Mesh,

    /// Holds the FEM base
    #[allow(unused)]
    base: &'a FemBase,
}

impl<'a> PostProc<'a> {
    /// Allocates a new instance
    pub fn new(mesh: &'a Mesh, base: &'a FemBase) -> Self {
        PostProc { mesh, base }
    }

    /// Reads the summary and the associated mesh from an output directory
    pub fn read_summary(out_dir: &str, filename_stem: &str) -> Result<(FileIo, Mesh), StrError> {
        let path_summary = format!("{}/{}-summary.json", out_dir, filename_stem);
        let file_io = FileIo::read_json(&path_summary)?;
        let mesh = Mesh::read_json(&file_io.path_mesh())?;
        Ok((file_io, mesh))
    }

    /// Reads the FEM state file corresponding to an output index
    pub fn read_state(file_io: &FileIo, index: usize) -> Result<FemState, StrError> {
        FemState::read_json(&file_io.path_state(index))
    }

    /// Returns the Gauss-averaged stress tensor of a cell
    ///
    /// This is the stored stress measure: Cauchy for the small-strain models
    /// and second Piola-Kirchhoff for the finite-strain models.
    pub fn gauss_stress_avg(&self, state: &FemState, cell_id: CellId) -> Result<Tensor2, StrError> {
        if cell_id >= state.gauss.len() {
            return Err("cell_id is out of bounds");
        }
        let gs = &state.gauss[cell_id];
        let mut avg = gs.all[0].stress.clone();
        for p in 1..gs.all.len() {
            let other = gs.all[p].stress.vector();
            let vec = avg.vector_mut();
            for i in 0..vec.dim() {
                vec[i] += other[i];
            }
        }
        let n = gs.all.len() as f64;
        let vec = avg.vector_mut();
        for i in 0..vec.dim() {
            vec[i] /= n;
        }
        Ok(avg)
    }

    /// Returns the Gauss-averaged Cauchy stress tensor of a cell
    ///
    /// For the finite-strain models, the stored second Piola-Kirchhoff
    /// stresses are pushed forward with σ = F S Fᵀ / J.
    pub fn gauss_cauchy_stress_avg(&self, state: &FemState, cell_id: CellId) -> Result<Tensor2, StrError> {
        if cell_id >= state.gauss.len() {
            return Err("cell_id is out of bounds");
        }
        let gs = &state.gauss[cell_id];
        let finite_strain = gs.all[0].deformation_gradient.dims() == (3, 3);
        if !finite_strain {
            return self.gauss_stress_avg(state, cell_id);
        }
        let mut avg = Tensor2::new(gs.all[0].stress.mandel());
        let mut sigma = Tensor2::new(gs.all[0].stress.mandel());
        for local_state in &gs.all {
            cauchy_from_pk2(&mut sigma, &local_state.deformation_gradient, &local_state.stress)?;
            let other = sigma.vector();
            let vec = avg.vector_mut();
            for i in 0..vec.dim() {
                vec[i] += other[i];
            }
        }
        let n = gs.all.len() as f64;
        let vec = avg.vector_mut();
        for i in 0..vec.dim() {
            vec[i] /= n;
        }
        Ok(avg)
    }

    /// Returns the Gauss-averaged von Mises stress of a cell (Cauchy measure)
    pub fn von_mises_stress_avg(&self, state: &FemState, cell_id: CellId) -> Result<f64, StrError> {
        let sigma = self.gauss_cauchy_stress_avg(state, cell_id)?;
        Ok(sigma.invariant_sigma_d())
    }

    /// Returns the Gauss-averaged cumulated plastic strain of a cell
    pub fn plastic_strain_avg(&self, state: &FemState, cell_id: CellId) -> Result<f64, StrError> {
        if cell_id >= state.gauss.len() {
            return Err("cell_id is out of bounds");
        }
        let gs = &state.gauss[cell_id];
        if gs.all[0].internal_values.dim() < 1 {
            return Err("the material model has no plastic strain internal variable");
        }
        let mut p_avg = 0.0;
        for local_state in &gs.all {
            p_avg += local_state.internal_values[0];
        }
        Ok(p_avg / (gs.all.len() as f64))
    }

    /// Returns the coordinates of the centroid of a cell
    pub fn centroid(&self, cell_id: CellId) -> (f64, f64, f64) {
        let cell = &self.mesh.cells[cell_id];
        let nnode = cell.points.len() as f64;
        let mut xc = [0.0; 3];
        for p in &cell.points {
            for i in 0..self.mesh.ndim {
                xc[i] += self.mesh.points[*p].coords[i];
            }
        }
        (xc[0] / nnode, xc[1] / nnode, xc[2] / nnode)
    }
}

/// Computes the internal (nodal) force vector from the current state
///
/// The assembly does NOT skip the prescribed equations; therefore, at the
/// prescribed DOFs, the result equals the reaction forces (assuming no
/// external loads are applied there).
pub fn calc_internal_forces(
    mesh: &Mesh,
    base: &FemBase,
    config: &Config,
    state: &FemState,
) -> Result<Vector, StrError> {
    let mut elements = Elements::new(mesh, base, config)?;
    elements.calc_residuals(state)?;
    let n_equation = base.equations.n_equation;
    let mut ff_int = Vector::new(n_equation);
    let no_prescribed = vec![false; n_equation];
    elements.assemble_residuals(&mut ff_int, &no_prescribed);
    Ok(ff_int)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
