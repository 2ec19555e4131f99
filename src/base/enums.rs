use super::ParamSolid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines degrees-of-freedom (DOF) types
///
/// Note: The fixed numbering scheme assists in sorting the DOFs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Dof {
    /// Displacement along the first dimension
    Ux = 0,

    /// Displacement along the second dimension
    Uy = 1,

    /// Displacement along the third dimension
    Uz = 2,
}

/// Defines natural boundary conditions (NBC)
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum Nbc {
    /// Normal distributed load
    Qn,

    /// Distributed load parallel to x
    Qx,

    /// Distributed load parallel to y
    Qy,

    /// Distributed load parallel to z
    Qz,
}

impl Nbc {
    /// Returns the boundary cell DOF keys and local equation numbers
    ///
    /// **Notes:** The outer array has length = nnode.
    /// The inner arrays have lengths = ndof at the node.
    #[rustfmt::skip]
    pub fn dof_equation_pairs(&self, ndim: usize, nnode: usize) -> Vec<Vec<(Dof, usize)>> {
        let mut dofs = vec![Vec::new(); nnode];
        let mut count = 0;
        for m in 0..nnode {
            dofs[m].push((Dof::Ux, count)); count += 1;
            dofs[m].push((Dof::Uy, count)); count += 1;
            if ndim == 3 {
                dofs[m].push((Dof::Uz, count)); count += 1;
            }
        }
        dofs
    }
}

impl fmt::Display for Nbc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nbc::Qn => write!(f, "Qn").unwrap(),
            Nbc::Qx => write!(f, "Qx").unwrap(),
            Nbc::Qy => write!(f, "Qy").unwrap(),
            Nbc::Qz => write!(f, "Qz").unwrap(),
        }
        Ok(())
    }
}

/// Defines point boundary conditions (e.g., point loads)
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum Pbc {
    /// Concentrated load parallel to x
    Fx,

    /// Concentrated load parallel to y
    Fy,

    /// Concentrated load parallel to z
    Fz,
}

impl Pbc {
    /// Returns the DOF corresponding to the concentrated load
    pub fn dof(&self) -> Dof {
        match self {
            Pbc::Fx => Dof::Ux,
            Pbc::Fy => Dof::Uy,
            Pbc::Fz => Dof::Uz,
        }
    }
}

impl fmt::Display for Pbc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pbc::Fx => write!(f, "Fx").unwrap(),
            Pbc::Fy => write!(f, "Fy").unwrap(),
            Pbc::Fz => write!(f, "Fz").unwrap(),
        }
        Ok(())
    }
}

/// Defines the element type
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum Elem {
    Solid(ParamSolid),
}

impl Elem {
    /// Returns the name of the Element
    pub fn name(&self) -> String {
        match self {
            Elem::Solid(..) => "Solid".to_string(),
        }
    }

    /// Returns the number of integration (Gauss) points
    pub fn ngauss(&self) -> Option<usize> {
        match self {
            Elem::Solid(param) => param.ngauss,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Dof, Elem, Nbc, Pbc};
    use crate::base::ParamSolid;
    use std::{cmp::Ordering, collections::HashSet};

    #[test]
    fn dof_derives_work() {
        let ux = Dof::Ux;
        let ux_clone = ux.clone();
        assert_eq!(format!("{:?}", ux), "Ux");
        assert_eq!(ux, ux_clone);

        let uy = Dof::Uy;
        assert!(ux < uy);
        assert_eq!(ux.cmp(&uy), Ordering::Less);

        let mut set = HashSet::new();
        set.insert(ux);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn nbc_methods_work() {
        let qn = Nbc::Qn;
        assert_eq!(format!("{}", qn), "Qn");
        assert_eq!(
            qn.dof_equation_pairs(2, 3),
            &[
                [(Dof::Ux, 0), (Dof::Uy, 1)],
                [(Dof::Ux, 2), (Dof::Uy, 3)],
                [(Dof::Ux, 4), (Dof::Uy, 5)]
            ]
        );
        let qz = Nbc::Qz;
        assert_eq!(
            qz.dof_equation_pairs(3, 2),
            &[
                [(Dof::Ux, 0), (Dof::Uy, 1), (Dof::Uz, 2)],
                [(Dof::Ux, 3), (Dof::Uy, 4), (Dof::Uz, 5)]
            ]
        );
        assert_eq!(format!("{}", Nbc::Qx), "Qx");
        assert_eq!(format!("{}", Nbc::Qy), "Qy");
        assert_eq!(format!("{}", Nbc::Qz), "Qz");
    }

    #[test]
    fn pbc_methods_work() {
        assert_eq!(Pbc::Fx.dof(), Dof::Ux);
        assert_eq!(Pbc::Fy.dof(), Dof::Uy);
        assert_eq!(Pbc::Fz.dof(), Dof::Uz);
        assert_eq!(format!("{}", Pbc::Fx), "Fx");
        assert_eq!(format!("{}", Pbc::Fy), "Fy");
        assert_eq!(format!("{}", Pbc::Fz), "Fz");
    }

    #[test]
    fn elem_methods_work() {
        let p = ParamSolid::sample_linear_elastic();
        let elem = Elem::Solid(p);
        assert_eq!(elem.name(), "Solid");
        assert_eq!(elem.ngauss(), None);
    }
}
