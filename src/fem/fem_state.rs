use super::FemBase;
use crate::base::{Config, Elem};
use crate::material::LocalState;
use crate::StrError;
use gemlab::mesh::Mesh;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the states at all Gauss points of a cell, with a backup array
///
/// The backup allows restoring the trial state at the beginning of each
/// Newton-Raphson iteration, so that stress updates are always performed
/// from the converged state of the previous load increment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GaussState {
    /// Holds the state at each integration (Gauss) point
    pub all: Vec<LocalState>,

    /// Holds a copy of `all` made at the beginning of the iterations
    backup: Vec<LocalState>,
}

impl GaussState {
    /// Allocates a new instance
    pub fn new(all: Vec<LocalState>) -> Self {
        let backup = all.clone();
        GaussState { all, backup }
    }

    /// Creates a copy of the current states
    pub fn backup(&mut self) {
        self.backup = self.all.clone();
    }

    /// Restores the current states from the backup
    pub fn restore(&mut self) {
        self.all = self.backup.clone();
    }

    /// Resets the algorithmic variables (e.g., Λ) of all states
    pub fn reset_algorithmic_variables(&mut self) {
        for state in &mut self.all {
            state.algo_lambda = 0.0;
        }
    }
}

/// Holds the state of a simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FemState {
    /// Pseudo-time (load factor)
    pub t: f64,

    /// Pseudo-time increment
    pub dt: f64,

    /// Cumulated (for one load increment) primary unknowns {ΔU}
    ///
    /// (n_equation)
    pub duu: Vector,

    /// Primary unknowns {U}
    ///
    /// (n_equation)
    pub uu: Vector,

    /// Holds the secondary values (stress and internal variables) at all
    /// integration (Gauss) points of all cells
    ///
    /// (ncell)
    pub gauss: Vec<GaussState>,
}

impl FemState {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, base: &FemBase, config: &Config) -> Result<FemState, StrError> {
        // check number of cells
        let ncell = mesh.cells.len();
        if ncell == 0 {
            return Err("there are no cells in the mesh");
        }

        // secondary values at all integration (Gauss) points of all cells
        let mandel = config.ideal.mandel();
        let mut gauss = Vec::with_capacity(ncell);
        for cell in &mesh.cells {
            let element = base.attributes.get(cell)?;
            let ngauss = config.gauss(cell)?.npoint();
            let all = match element {
                Elem::Solid(param) => {
                    let n_int_var = param.n_int_var();
                    if param.stress_strain.finite_strain() {
                        (0..ngauss).map(|_| LocalState::new_finite_strain(n_int_var)).collect()
                    } else {
                        (0..ngauss).map(|_| LocalState::new(mandel, n_int_var)).collect()
                    }
                }
            };
            gauss.push(GaussState::new(all));
        }

        // primary variables
        let n_equation = base.equations.n_equation;
        let t = config.t_ini;
        let dt = (config.dt)(t);
        Ok(FemState {
            t,
            dt,
            duu: Vector::new(n_equation),
            uu: Vector::new(n_equation),
            gauss,
        })
    }

    /// Creates a copy of all secondary values
    pub fn backup_secondary_values(&mut self) {
        for gauss_state in &mut self.gauss {
            gauss_state.backup();
        }
    }

    /// Restores all secondary values from the backups
    pub fn restore_secondary_values(&mut self) {
        for gauss_state in &mut self.gauss {
            gauss_state.restore();
        }
    }

    /// Resets the algorithmic variables of all secondary values
    pub fn reset_algorithmic_variables(&mut self) {
        for gauss_state in &mut self.gauss {
            gauss_state.reset_algorithmic_variables();
        }
    }

    /// Reads a JSON file containing the state data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open state file")?;
        let buffered = BufReader::new(input);
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse state file")?;
        Ok(state)
    }

    /// Writes a JSON file with the state data
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
        let mut file = File::create(&path).map_err(|_| "cannot create state file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write state file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
