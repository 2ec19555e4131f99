use super::{ElementDofsMap, Equations};
use crate::StrError;
use gemlab::mesh::Cell;
use russell_lab::{Matrix, Vector};
use russell_sparse::CooMatrix;

/// Computes the local-to-global map needed for the assembly process
pub fn compute_local_to_global(emap: &ElementDofsMap, eqs: &Equations, cell: &Cell) -> Result<Vec<usize>, StrError> {
    let info = emap.get(cell)?;
    let mut local_to_global = vec![0; info.n_equation];
    for m in 0..cell.points.len() {
        for (dof, local) in &info.dofs[m] {
            let global = eqs.eq(cell.points[m], *dof)?;
            local_to_global[*local] = global;
        }
    }
    Ok(local_to_global)
}

/// Assembles a local vector into the global vector
///
/// # Input
///
/// * `rr_global` -- the global vector R with length = `n_equation`
/// * `r_local` -- the local vector r with length = `n_equation_local`
/// * `local_to_global` -- the equation numbers of the local DOFs
/// * `prescribed` -- tells whether a global equation number has a prescribed
///   DOF or not; its length equals the total number of DOFs `n_equation`
///
/// # Panics
///
/// This function will panic if the indices are out-of-bounds
#[inline]
pub fn assemble_vector(rr_global: &mut Vector, r_local: &Vector, local_to_global: &[usize], prescribed: &[bool]) {
    let n_equation_local = r_local.dim();
    for l in 0..n_equation_local {
        let g = local_to_global[l];
        if !prescribed[g] {
            rr_global[g] += r_local[l];
        }
    }
}

/// Assembles a local matrix into the global (sparse) matrix
///
/// # Input
///
/// * `kk_global` -- the global square matrix K with dims = (`n_equation`,`n_equation`)
/// * `kk_local` -- the local square matrix K with dims = (`n_equation_local`,`n_equation_local`)
/// * `local_to_global` -- the equation numbers of the local DOFs
/// * `prescribed` -- tells whether a global equation number has a prescribed
///   DOF or not; its length equals the total number of DOFs `n_equation`
///
/// # Panics
///
/// This function will panic if the indices are out-of-bounds
#[inline]
pub fn assemble_matrix(
    kk_global: &mut CooMatrix,
    kk_local: &Matrix,
    local_to_global: &[usize],
    prescribed: &[bool],
) -> Result<(), StrError> {
    let n_equation_local = kk_local.dims().0;
    for l in 0..n_equation_local {
        let g = local_to_global[l];
        if !prescribed[g] {
            for ll in 0..n_equation_local {
                let gg = local_to_global[ll];
                if !prescribed[gg] {
                    kk_global.put(g, gg, kk_local.get(l, ll))?;
                }
            }
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
