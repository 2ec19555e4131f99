use super::Dof;
use gemlab::mesh::{Feature, PointId};
use std::collections::HashMap;
use std::fmt;

/// Holds the value of a boundary condition, either constant or a function of time
pub struct BcValue {
    /// Constant value (used when no function is given)
    value: f64,

    /// Multiplier function of the (pseudo) time t
    function: Option<Box<dyn Fn(f64) -> f64>>,
}

impl BcValue {
    /// Allocates a constant value
    pub fn constant(value: f64) -> Self {
        BcValue {
            value,
            function: None,
        }
    }

    /// Allocates a value defined by a function of time
    pub fn time_function(function: Box<dyn Fn(f64) -> f64>) -> Self {
        BcValue {
            value: 0.0,
            function: Some(function),
        }
    }

    /// Evaluates the value at time t
    pub fn value(&self, t: f64) -> f64 {
        match &self.function {
            Some(f) => (f)(t),
            None => self.value,
        }
    }
}

/// Holds essential (Dirichlet) boundary conditions
///
/// Prescribed displacements may be constants or functions of the pseudo-time
/// (load factor) t, which is how the load increments drive the simulation.
pub struct Essential {
    pub all: HashMap<(PointId, Dof), BcValue>,
}

impl Essential {
    /// Allocates a new instance
    pub fn new() -> Self {
        Essential { all: HashMap::new() }
    }

    /// Sets a constant essential boundary condition at points
    pub fn points(&mut self, points: &[PointId], dof: Dof, value: f64) -> &mut Self {
        for point_id in points {
            self.all.insert((*point_id, dof), BcValue::constant(value));
        }
        self
    }

    /// Sets a time-dependent essential boundary condition at points
    pub fn points_fn(&mut self, points: &[PointId], dof: Dof, f: impl Fn(f64) -> f64 + Clone + 'static) -> &mut Self {
        for point_id in points {
            self.all
                .insert((*point_id, dof), BcValue::time_function(Box::new(f.clone())));
        }
        self
    }

    /// Sets a constant essential boundary condition on edges or faces
    pub fn edges(&mut self, features: &[&Feature], dof: Dof, value: f64) -> &mut Self {
        for feature in features {
            for point_id in &feature.points {
                self.all.insert((*point_id, dof), BcValue::constant(value));
            }
        }
        self
    }

    /// Sets a time-dependent essential boundary condition on edges or faces
    pub fn edges_fn(&mut self, features: &[&Feature], dof: Dof, f: impl Fn(f64) -> f64 + Clone + 'static) -> &mut Self {
        for feature in features {
            for point_id in &feature.points {
                self.all
                    .insert((*point_id, dof), BcValue::time_function(Box::new(f.clone())));
            }
        }
        self
    }

    /// Sets a constant essential boundary condition on faces
    pub fn faces(&mut self, features: &[&Feature], dof: Dof, value: f64) -> &mut Self {
        self.edges(features, dof, value)
    }

    /// Sets a time-dependent essential boundary condition on faces
    pub fn faces_fn(&mut self, features: &[&Feature], dof: Dof, f: impl Fn(f64) -> f64 + Clone + 'static) -> &mut Self {
        self.edges_fn(features, dof, f)
    }
}

impl fmt::Display for Essential {
    /// Prints a formatted summary of the boundary conditions
    ///
    /// The values are shown at t = 0 and t = 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Essential boundary conditions\n").unwrap();
        write!(f, "=============================\n").unwrap();
        let mut keys: Vec<_> = self.all.keys().collect();
        keys.sort();
        for key in keys {
            let bc = self.all.get(key).unwrap();
            write!(
                f,
                "{:?} : {:?}(0) = {:?}, {:?}(1) = {:?}\n",
                key.0,
                key.1,
                bc.value(0.0),
                key.1,
                bc.value(1.0)
            )
            .unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Essential;
    use crate::base::Dof;
    use gemlab::mesh::Feature;
    use gemlab::shapes::GeoKind;

    #[test]
    fn essential_works() {
        let mut essential = Essential::new();
        let edge = Feature {
            kind: GeoKind::Lin2,
            points: vec![1, 2],
        };
        let face = Feature {
            kind: GeoKind::Tri3,
            points: vec![3, 4, 5],
        };
        essential
            .points(&[0], Dof::Ux, 0.0)
            .points(&[0], Dof::Uy, 0.0)
            .edges(&[&edge], Dof::Ux, 0.0)
            .faces_fn(&[&face], Dof::Uy, |t| t / 2.0);
        assert_eq!(
            format!("{}", essential),
            "Essential boundary conditions\n\
             =============================\n\
             0 : Ux(0) = 0.0, Ux(1) = 0.0\n\
             0 : Uy(0) = 0.0, Uy(1) = 0.0\n\
             1 : Ux(0) = 0.0, Ux(1) = 0.0\n\
             2 : Ux(0) = 0.0, Ux(1) = 0.0\n\
             3 : Uy(0) = 0.0, Uy(1) = 0.5\n\
             4 : Uy(0) = 0.0, Uy(1) = 0.5\n\
             5 : Uy(0) = 0.0, Uy(1) = 0.5\n"
        );
    }

    #[test]
    fn time_function_captures_environment() {
        let delta_y = 0.123;
        let mut essential = Essential::new();
        essential.points_fn(&[7], Dof::Uy, move |t| -delta_y * t);
        let bc = essential.all.get(&(7, Dof::Uy)).unwrap();
        assert_eq!(bc.value(0.0), 0.0);
        assert_eq!(bc.value(2.0), -0.246);
    }
}
