use super::FemBase;
use crate::base::{BcValue, Natural};
use crate::StrError;
use russell_lab::Vector;

/// Assists in handling concentrated loads
pub struct BcConcentrated<'a> {
    /// Holds the (equation, value) pairs
    all: Vec<(usize, &'a BcValue)>,
}

impl<'a> BcConcentrated<'a> {
    /// Allocates a new instance
    pub fn new(base: &FemBase, natural: &'a Natural) -> Result<Self, StrError> {
        let mut all = Vec::new();
        for (point_id, pbc, value) in &natural.concentrated {
            let eq = base.equations.eq(*point_id, pbc.dof())?;
            all.push((eq, value));
        }
        Ok(BcConcentrated { all })
    }

    /// Adds the concentrated loads (as negative values) to the residual
    ///
    /// The residual is R = F_int - F_ext, thus external loads are subtracted.
    pub fn add_to_residual(&self, rr: &mut Vector, t: f64) {
        for (eq, value) in &self.all {
            rr[*eq] -= value.value(t);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
