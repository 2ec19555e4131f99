use super::FemBase;
use crate::base::{BcValue, Essential};
use crate::StrError;
use russell_lab::Vector;

/// Assists in handling prescribed (essential) boundary conditions
///
/// The equations with prescribed values are excluded from the linear system;
/// a one is placed on the corresponding diagonal entries of the Jacobian.
pub struct BcPrescribed<'a> {
    /// Tells whether a global equation number has a prescribed value or not
    ///
    /// (n_equation)
    pub flags: Vec<bool>,

    /// Holds the equation numbers of the prescribed values
    pub equations: Vec<usize>,

    /// Holds the (equation, value) pairs
    all: Vec<(usize, &'a BcValue)>,
}

impl<'a> BcPrescribed<'a> {
    /// Allocates a new instance
    pub fn new(base: &FemBase, essential: &'a Essential) -> Result<Self, StrError> {
        let n_equation = base.equations.n_equation;
        let mut flags = vec![false; n_equation];
        let mut equations = Vec::new();
        let mut all = Vec::new();
        for ((point_id, dof), value) in &essential.all {
            let eq = base.equations.eq(*point_id, *dof)?;
            flags[eq] = true;
            equations.push(eq);
            all.push((eq, value));
        }
        equations.sort();
        Ok(BcPrescribed { flags, equations, all })
    }

    /// Sets the prescribed values {U} and increments {ΔU} at the new time
    pub fn apply(&self, duu: &mut Vector, uu: &mut Vector, t: f64) {
        for (eq, value) in &self.all {
            let new_value = value.value(t);
            duu[*eq] = new_value - uu[*eq];
            uu[*eq] = new_value;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
