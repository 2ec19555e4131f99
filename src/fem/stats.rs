use crate::StrError;
use russell_lab::format_nanoseconds;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File};
use std::path::Path;

/// Collects timing and iteration statistics of a simulation
///
/// The wall-clock time spent on each phase (stress update, residual,
/// Jacobian, factorization, solution, and output) is accumulated over all
/// load increments and reported at the end of the analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stats {
    /// Number of converged load increments
    pub n_steps: usize,

    /// Total number of Newton-Raphson iterations
    pub n_iterations_total: usize,

    /// Maximum number of iterations over all load increments
    pub n_iterations_max: usize,

    /// Nanoseconds spent updating secondary values (stress updates)
    pub nanos_update: u128,

    /// Nanoseconds spent computing and assembling residuals
    pub nanos_residual: u128,

    /// Nanoseconds spent computing and assembling Jacobians
    pub nanos_jacobian: u128,

    /// Nanoseconds spent factorizing the global matrix
    pub nanos_factorize: u128,

    /// Nanoseconds spent solving the linear systems
    pub nanos_solve: u128,

    /// Nanoseconds spent writing output files
    pub nanos_output: u128,

    /// Total nanoseconds of the solver run
    pub nanos_total: u128,
}

impl Stats {
    /// Allocates a new instance with zeroed counters
    pub fn new() -> Self {
        Stats {
            n_steps: 0,
            n_iterations_total: 0,
            n_iterations_max: 0,
            nanos_update: 0,
            nanos_residual: 0,
            nanos_jacobian: 0,
            nanos_factorize: 0,
            nanos_solve: 0,
            nanos_output: 0,
            nanos_total: 0,
        }
    }

    /// Records a converged load increment with its iteration count
    pub fn add_step(&mut self, n_iterations: usize) {
        self.n_steps += 1;
        self.n_iterations_total += n_iterations;
        if n_iterations > self.n_iterations_max {
            self.n_iterations_max = n_iterations;
        }
    }

    /// Writes a JSON file with the statistics
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create stats file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write stats file")?;
        Ok(())
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timing and iteration statistics\n").unwrap();
        write!(f, "===============================\n").unwrap();
        write!(f, "number of converged increments = {}\n", self.n_steps).unwrap();
        write!(f, "total number of iterations     = {}\n", self.n_iterations_total).unwrap();
        write!(f, "max iterations per increment   = {}\n", self.n_iterations_max).unwrap();
        write!(f, "time: stress updates           = {}\n", format_nanoseconds(self.nanos_update)).unwrap();
        write!(f, "time: residuals                = {}\n", format_nanoseconds(self.nanos_residual)).unwrap();
        write!(f, "time: Jacobians                = {}\n", format_nanoseconds(self.nanos_jacobian)).unwrap();
        write!(f, "time: factorizations           = {}\n", format_nanoseconds(self.nanos_factorize)).unwrap();
        write!(f, "time: linear solutions         = {}\n", format_nanoseconds(self.nanos_solve)).unwrap();
        write!(f, "time: output                   = {}\n", format_nanoseconds(self.nanos_output)).unwrap();
        write!(f, "time: total                    = {}\n", format_nanoseconds(self.nanos_total)).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
