use super::{BcValue, Nbc, Pbc};
use gemlab::mesh::{Feature, PointId};
use std::fmt;

/// Holds natural (Neumann) boundary conditions
///
/// Distributed and concentrated loads may be constants or functions of the
/// pseudo-time (load factor) t.
pub struct Natural {
    pub concentrated: Vec<(PointId, Pbc, BcValue)>,
    pub distributed: Vec<(Feature, Nbc, BcValue)>,
}

impl Natural {
    /// Allocates a new instance
    pub fn new() -> Self {
        Natural {
            concentrated: Vec::new(),
            distributed: Vec::new(),
        }
    }

    /// Sets a constant concentrated load at points
    pub fn points(&mut self, points: &[PointId], pbc: Pbc, value: f64) -> &mut Self {
        for point_id in points {
            self.concentrated.push((*point_id, pbc, BcValue::constant(value)));
        }
        self
    }

    /// Sets a time-dependent concentrated load at points
    pub fn points_fn(&mut self, points: &[PointId], pbc: Pbc, f: impl Fn(f64) -> f64 + Clone + 'static) -> &mut Self {
        for point_id in points {
            self.concentrated
                .push((*point_id, pbc, BcValue::time_function(Box::new(f.clone()))));
        }
        self
    }

    /// Sets a constant distributed load on edges or faces
    pub fn edges(&mut self, features: &[&Feature], nbc: Nbc, value: f64) -> &mut Self {
        for feature in features {
            self.distributed.push(((*feature).clone(), nbc, BcValue::constant(value)));
        }
        self
    }

    /// Sets a time-dependent distributed load on edges or faces
    pub fn edges_fn(&mut self, features: &[&Feature], nbc: Nbc, f: impl Fn(f64) -> f64 + Clone + 'static) -> &mut Self {
        for feature in features {
            self.distributed
                .push(((*feature).clone(), nbc, BcValue::time_function(Box::new(f.clone()))));
        }
        self
    }

    /// Sets a constant distributed load on faces
    pub fn faces(&mut self, features: &[&Feature], nbc: Nbc, value: f64) -> &mut Self {
        self.edges(features, nbc, value)
    }

    /// Sets a time-dependent distributed load on faces
    pub fn faces_fn(&mut self, features: &[&Feature], nbc: Nbc, f: impl Fn(f64) -> f64 + Clone + 'static) -> &mut Self {
        self.edges_fn(features, nbc, f)
    }
}

impl fmt::Display for Natural {
    /// Prints a formatted summary of the boundary conditions
    ///
    /// The values are shown at t = 0 and t = 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Concentrated boundary conditions\n").unwrap();
        write!(f, "================================\n").unwrap();
        for (id, pbc, bc) in &self.concentrated {
            write!(
                f,
                "{:?} : {}(0) = {:?}, {}(1) = {:?}\n",
                id,
                pbc,
                bc.value(0.0),
                pbc,
                bc.value(1.0)
            )
            .unwrap();
        }
        write!(f, "\nDistributed boundary conditions\n").unwrap();
        write!(f, "===============================\n").unwrap();
        for (feature, nbc, bc) in &self.distributed {
            write!(
                f,
                "{:?} : {}(0) = {:?}, {}(1) = {:?}\n",
                feature.points,
                nbc,
                bc.value(0.0),
                nbc,
                bc.value(1.0)
            )
            .unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
