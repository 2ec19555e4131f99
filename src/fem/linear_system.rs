use super::{BcPrescribed, Elements, FemBase};
use crate::base::Config;
use crate::StrError;
use russell_lab::Vector;
use russell_sparse::{LinSolver, SparseMatrix, Sym};

/// Holds the variables to solve the global linear system
pub struct LinearSystem<'a> {
    /// Total number of global equations (total number of DOFs)
    pub n_equation: usize,

    /// Holds the supremum of the number of nonzero values (nnz) in the global matrix
    ///
    /// **Notes:**
    ///
    /// 1. The global matrix is sparse with the number of nonzero values indicated by `nnz`
    /// 2. The local element matrices add only to parts of the global matrix yielding a banded matrix
    /// 3. The least upper bound (supremum) of nnz is the sum of the number of entries of all the
    ///    local matrices plus the number of prescribed equations, since ones are put on the
    ///    diagonal of the global matrix at the prescribed equations
    pub nnz_sup: usize,

    /// Global residual vector
    pub residual: Vector,

    /// Global Jacobian matrix
    pub jacobian: SparseMatrix,

    /// Linear (sparse direct) solver
    pub solver: LinSolver<'a>,

    /// Minus delta U vector (the solution of the linear system)
    pub mdu: Vector,
}

impl<'a> LinearSystem<'a> {
    /// Allocates a new instance
    pub fn new(
        base: &FemBase,
        config: &Config,
        prescribed: &BcPrescribed,
        elements: &Elements,
    ) -> Result<Self, StrError> {
        let n_equation = base.equations.n_equation;
        let mut nnz_sup = prescribed.equations.len();
        nnz_sup += elements.all.iter().fold(0, |acc, e| {
            let n = e.actual.local_to_global().len();
            acc + n * n
        });
        Ok(LinearSystem {
            n_equation,
            nnz_sup,
            residual: Vector::new(n_equation),
            jacobian: SparseMatrix::new_coo(n_equation, n_equation, nnz_sup, Sym::No)?,
            solver: LinSolver::new(config.lin_sol_genie)?,
            mdu: Vector::new(n_equation),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
