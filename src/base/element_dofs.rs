use super::{Attributes, Dof, Elem};
use crate::StrError;
use gemlab::mesh::{Cell, CellAttribute, Mesh};
use gemlab::shapes::GeoKind;
use std::collections::HashMap;
use std::fmt;

/// Holds the DOFs and local equation numbers of an Elem/GeoKind pair
///
/// ```text
/// leq: local equation number     leq   point   geq
/// geq: global equation number     ↓        ↓    ↓
///                                 0 → Ux @ 0 →  0
///              2                  1 → Uy @ 0 →  1
///             / \                 2 → Ux @ 1 →  2
///            /   \                3 → Uy @ 1 →  3
///           /     \               4 → Ux @ 2 →  4
///          0-------1              5 → Uy @ 2 →  5
/// ```
pub struct ElementDofs {
    /// Holds all cell DOF keys and local equation numbers
    ///
    /// **Notes:** The outer array has length = nnode.
    /// The inner arrays contain pairs of Dof and local equation numbers.
    pub dofs: Vec<Vec<(Dof, usize)>>,

    /// Dimension of the local system of equations
    ///
    /// **Note:** This is equal to the total number of DOFs in the cell
    pub n_equation: usize,
}

impl ElementDofs {
    /// Allocates a new instance
    pub fn new(ndim: usize, element: &Elem, kind: GeoKind) -> Result<Self, StrError> {
        if kind.is_lin() {
            return Err("GeoClass::Lin is not available for Solid elements");
        }
        let nnode = kind.nnode();
        let mut dofs = vec![Vec::new(); nnode];
        let mut count = 0;
        #[rustfmt::skip]
        match element {
            Elem::Solid(..) => {
                for m in 0..nnode {
                    dofs[m].push((Dof::Ux, count)); count += 1;
                    dofs[m].push((Dof::Uy, count)); count += 1;
                    if ndim == 3 {
                        dofs[m].push((Dof::Uz, count)); count += 1;
                    }
                }
            }
        };
        Ok(ElementDofs {
            dofs,
            n_equation: count,
        })
    }
}

impl fmt::Display for ElementDofs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in 0..self.dofs.len() {
            write!(f, "{}: {:?}\n", m, self.dofs[m]).unwrap();
        }
        Ok(())
    }
}

/// Holds the ElementDofs of all (CellAttribute, GeoKind) combinations
pub struct ElementDofsMap {
    all: HashMap<(CellAttribute, GeoKind), ElementDofs>,
}

impl ElementDofsMap {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, att: &Attributes) -> Result<Self, StrError> {
        let mut all = HashMap::new();
        for cell in &mesh.cells {
            let element = att.get(cell)?;
            let info = ElementDofs::new(mesh.ndim, element, cell.kind)?;
            all.insert((cell.attribute, cell.kind), info);
        }
        Ok(ElementDofsMap { all })
    }

    /// Returns the ElementDofs corresponding to Cell
    pub fn get(&self, cell: &Cell) -> Result<&ElementDofs, StrError> {
        self.all
            .get(&(cell.attribute, cell.kind))
            .ok_or("cannot find (CellAttribute, GeoKind) in ElementDofsMap")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ElementDofs, ElementDofsMap};
    use crate::base::{Attributes, Dof, Elem, ParamSolid};
    use gemlab::mesh::Samples;
    use gemlab::shapes::GeoKind;

    #[test]
    fn element_dofs_new_captures_errors() {
        let p = ParamSolid::sample_linear_elastic();
        assert_eq!(
            ElementDofs::new(2, &Elem::Solid(p), GeoKind::Lin2).err(),
            Some("GeoClass::Lin is not available for Solid elements")
        );
    }

    #[test]
    fn element_dofs_new_works_2d() {
        let p = ParamSolid::sample_linear_elastic();
        let info = ElementDofs::new(2, &Elem::Solid(p), GeoKind::Tri3).unwrap();
        assert_eq!(
            info.dofs,
            &[
                [(Dof::Ux, 0), (Dof::Uy, 1)],
                [(Dof::Ux, 2), (Dof::Uy, 3)],
                [(Dof::Ux, 4), (Dof::Uy, 5)]
            ]
        );
        assert_eq!(info.n_equation, 6);
        assert_eq!(
            format!("{}", info),
            "0: [(Ux, 0), (Uy, 1)]\n\
             1: [(Ux, 2), (Uy, 3)]\n\
             2: [(Ux, 4), (Uy, 5)]\n"
        );
    }

    #[test]
    fn element_dofs_new_works_3d() {
        let p = ParamSolid::sample_linear_elastic();
        let info = ElementDofs::new(3, &Elem::Solid(p), GeoKind::Tet4).unwrap();
        assert_eq!(info.n_equation, 12);
        assert_eq!(info.dofs[3], &[(Dof::Ux, 9), (Dof::Uy, 10), (Dof::Uz, 11)]);
    }

    #[test]
    fn element_dofs_map_works() {
        let mesh = Samples::one_tri3();
        let p1 = ParamSolid::sample_linear_elastic();
        let att = Attributes::from([(1, Elem::Solid(p1))]);
        let emap = ElementDofsMap::new(&mesh, &att).unwrap();
        assert_eq!(emap.get(&mesh.cells[0]).unwrap().n_equation, 6);

        let mut mesh_wrong = mesh.clone();
        mesh_wrong.cells[0].attribute = 100; // never do this!
        assert_eq!(
            ElementDofsMap::new(&mesh_wrong, &att).err(),
            Some("cannot find CellAttribute in Attributes map")
        );
        assert_eq!(
            emap.get(&mesh_wrong.cells[0]).err(),
            Some("cannot find (CellAttribute, GeoKind) in ElementDofsMap")
        );
    }
}
