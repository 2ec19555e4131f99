use super::{Dof, ElementDofsMap};
use crate::StrError;
use gemlab::mesh::{Mesh, PointId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Holds all DOF numbers (global equation numbers)
///
/// ```text
/// leq: local equation number       leq   point   geq
/// geq: global equation number       ↓        ↓    ↓
///                                   0 → Ux @ 0 →  0
///                2                  1 → Uy @ 0 →  1
///               / \                 2 → Ux @ 1 →  2
///              /   \                3 → Uy @ 1 →  3
///             /     \               4 → Ux @ 2 →  4
///            0-------1              5 → Uy @ 2 →  5
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Equations {
    /// Holds all point DOFs and numbers
    ///
    /// **Notes:**
    ///
    /// 1. The array has a length equal to npoint
    /// 2. The inner maps have variable lengths according to the number of DOFs at the point
    pub all: Vec<HashMap<Dof, usize>>,

    /// Holds the total number of global equations
    ///
    /// **Note:** This is equal to the total number of DOFs
    pub n_equation: usize,
}

impl Equations {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, emap: &ElementDofsMap) -> Result<Self, StrError> {
        // find all element DOFs and add (unique) DOF keys to the point DOFs array
        let npoint = mesh.points.len();
        let mut memo_point_dofs = vec![HashSet::new(); npoint];
        for cell in &mesh.cells {
            let info = emap.get(cell)?;
            for m in 0..cell.points.len() {
                for (dof, _) in &info.dofs[m] {
                    memo_point_dofs[cell.points[m]].insert(*dof);
                }
            }
        }

        // compute all point DOF numbers
        let mut all = vec![HashMap::new(); npoint];
        let mut n_equation = 0; // equals the total number of DOFs
        for point_id in 0..npoint {
            let mut sorted_dofs: Vec<_> = memo_point_dofs[point_id].iter().collect();
            sorted_dofs.sort();
            for dof in sorted_dofs {
                all[point_id].insert(*dof, n_equation);
                n_equation += 1;
            }
        }
        Ok(Equations { all, n_equation })
    }

    /// Returns the (global) equation number of a (PointId,DOF) pair
    pub fn eq(&self, point_id: PointId, dof: Dof) -> Result<usize, StrError> {
        if point_id >= self.all.len() {
            return Err("cannot find equation number because point_id is out of bounds");
        }
        let eq = self.all[point_id]
            .get(&dof)
            .ok_or("cannot find equation number corresponding to (PointId,DOF)")?;
        Ok(*eq)
    }
}

impl fmt::Display for Equations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Points: DOFs and global equation numbers\n").unwrap();
        write!(f, "========================================\n").unwrap();
        for point_id in 0..self.all.len() {
            let mut dof_eqn: Vec<_> = self.all[point_id].iter().collect();
            dof_eqn.sort_by(|a, b| a.0.partial_cmp(b.0).unwrap());
            write!(f, "{:?}: {:?}\n", point_id, dof_eqn).unwrap();
        }
        write!(f, "\nInformation\n").unwrap();
        write!(f, "===========\n").unwrap();
        write!(f, "number of equations = {}\n", self.n_equation).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
