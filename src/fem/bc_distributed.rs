use super::FemBase;
use crate::base::{assemble_vector, BcValue, Config, Natural, Nbc};
use crate::StrError;
use gemlab::integ::Gauss;
use gemlab::mesh::{Feature, Mesh};
use gemlab::shapes::Scratchpad;
use russell_lab::Vector;

/// Implements a boundary element to integrate distributed loads
///
/// The traction is integrated over the boundary feature (an edge in 2D or a
/// face in 3D) and subtracted from the residual (R = F_int - F_ext). For
/// `Nbc::Qn`, a positive value acts along the outward normal.
pub struct BcDistributed<'a> {
    /// Holds the natural boundary condition
    nbc: Nbc,

    /// Holds the value (constant or function of time)
    value: &'a BcValue,

    /// Holds the scratchpad for interpolation over the feature
    pad: Scratchpad,

    /// Holds the integration points over the feature
    gauss: Gauss,

    /// Holds the local residual vector
    pub residual: Vector,

    /// Holds the local-to-global equation map
    pub local_to_global: Vec<usize>,

    /// Out-of-plane thickness (2D only)
    thickness: f64,

    /// Space dimension
    ndim: usize,
}

/// Holds a collection of boundary elements for distributed loads
pub struct BcDistributedArray<'a> {
    /// All boundary elements
    pub all: Vec<BcDistributed<'a>>,
}

impl<'a> BcDistributed<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        base: &FemBase,
        config: &Config,
        feature: &Feature,
        nbc: Nbc,
        value: &'a BcValue,
    ) -> Result<Self, StrError> {
        let ndim = mesh.ndim;
        let feature_ndim = feature.kind.ndim();
        if ndim == 3 && feature_ndim == 1 {
            return Err("distributed loads are not available on 3D edges");
        }
        if let Nbc::Qz = nbc {
            if ndim == 2 {
                return Err("Qz natural boundary condition is not available in 2D");
            }
        }
        let mut pad = Scratchpad::new(ndim, feature.kind)?;
        mesh.set_pad(&mut pad, &feature.points);
        let gauss = Gauss::new_or_sized(feature.kind, None)?;

        // local-to-global map
        let nnode = feature.points.len();
        let dofs = nbc.dof_equation_pairs(ndim, nnode);
        let n_equation_local = 1 + dofs.last().unwrap().last().unwrap().1;
        let mut local_to_global = vec![0; n_equation_local];
        for m in 0..nnode {
            for (dof, local) in &dofs[m] {
                local_to_global[*local] = base.equations.eq(feature.points[m], *dof)?;
            }
        }
        Ok(BcDistributed {
            nbc,
            value,
            pad,
            gauss,
            residual: Vector::new(n_equation_local),
            local_to_global,
            thickness: config.ideal.thickness,
            ndim,
        })
    }

    /// Calculates the residual vector at the given time
    pub fn calc_residual(&mut self, t: f64) -> Result<(), StrError> {
        let nnode = self.pad.kind.nnode();
        let feature_ndim = self.pad.kind.ndim();
        let ndim = self.ndim;
        let q = self.value.value(t);
        let th = if ndim == 2 { self.thickness } else { 1.0 };
        self.residual.fill(0.0);
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            let weight = self.gauss.weight(p);
            (self.pad.fn_interp)(&mut self.pad.interp, iota);
            (self.pad.fn_deriv)(&mut self.pad.deriv, iota);

            // surface tangent vectors: tₐ = Σₘ (∂Nₘ/∂ξₐ) xₘ
            let mut t1 = [0.0; 3];
            let mut t2 = [0.0; 3];
            for m in 0..nnode {
                for i in 0..ndim {
                    t1[i] += self.pad.deriv.get(m, 0) * self.pad.xxt.get(i, m);
                    if feature_ndim == 2 {
                        t2[i] += self.pad.deriv.get(m, 1) * self.pad.xxt.get(i, m);
                    }
                }
            }

            // normal vector (scaled by the area/length mapping)
            let mut normal = [0.0; 3];
            let mag = if feature_ndim == 1 {
                normal[0] = t1[1];
                normal[1] = -t1[0];
                f64::sqrt(t1[0] * t1[0] + t1[1] * t1[1])
            } else {
                normal[0] = t1[1] * t2[2] - t1[2] * t2[1];
                normal[1] = t1[2] * t2[0] - t1[0] * t2[2];
                normal[2] = t1[0] * t2[1] - t1[1] * t2[0];
                f64::sqrt(normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2])
            };
            if mag <= 0.0 {
                return Err("boundary feature mapping is singular");
            }

            // traction direction times the traction value
            let mut traction = [0.0; 3];
            match self.nbc {
                Nbc::Qn => {
                    for i in 0..ndim {
                        traction[i] = q * normal[i] / mag;
                    }
                }
                Nbc::Qx => traction[0] = q,
                Nbc::Qy => traction[1] = q,
                Nbc::Qz => traction[2] = q,
            }

            // external force contribution (note the negative sign)
            let coef = mag * weight * th;
            for m in 0..nnode {
                let nm = self.pad.interp[m];
                for i in 0..ndim {
                    self.residual[i + ndim * m] -= nm * traction[i] * coef;
                }
            }
        }
        Ok(())
    }
}

impl<'a> BcDistributedArray<'a> {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, base: &FemBase, config: &Config, natural: &'a Natural) -> Result<Self, StrError> {
        let res: Result<Vec<_>, _> = natural
            .distributed
            .iter()
            .map(|(feature, nbc, value)| BcDistributed::new(mesh, base, config, feature, *nbc, value))
            .collect();
        match res {
            Ok(all) => Ok(BcDistributedArray { all }),
            Err(e) => Err(e),
        }
    }

    /// Computes all residual vectors at the given time
    pub fn calc_residuals(&mut self, t: f64) -> Result<(), StrError> {
        self.all.iter_mut().map(|e| e.calc_residual(t)).collect()
    }

    /// Assembles the residual vectors
    ///
    /// **Note:** You must call [BcDistributedArray::calc_residuals] first.
    /// Unlike the elements' assembly, the global vector is NOT cleared here.
    pub fn assemble_residuals(&self, rr: &mut Vector, prescribed: &[bool]) {
        self.all
            .iter()
            .for_each(|e| assemble_vector(rr, &e.residual, &e.local_to_global, &prescribed));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
