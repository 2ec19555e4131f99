use super::Idealization;
use crate::StrError;
use gemlab::integ::Gauss;
use gemlab::mesh::{Cell, CellAttribute, Mesh};
use russell_sparse::{Genie, LinSolParams};
use std::collections::HashMap;
use std::fmt;

/// Holds configuration data for a simulation
///
/// The simulation advances a pseudo-time t (load factor) from `t_ini` to
/// `t_fin` in steps of Δt; the boundary-condition functions of t implement
/// the load increments.
pub struct Config {
    /// Holds the geometry idealization
    pub ideal: Idealization,

    /// Holds the number of integration (Gauss) points for cell attributes (override)
    ngauss: HashMap<CellAttribute, usize>,

    /// Initial pseudo-time
    pub t_ini: f64,

    /// Final pseudo-time
    pub t_fin: f64,

    /// Pseudo-time increment as a function of the current time
    pub dt: Box<dyn Fn(f64) -> f64 + Send + Sync>,

    /// Time interval between output records as a function of the current time
    pub dt_out: Box<dyn Fn(f64) -> f64 + Send + Sync>,

    /// Maximum number of time steps
    pub n_max_time_steps: usize,

    /// Maximum number of Newton-Raphson iterations per time step
    pub n_max_iterations: usize,

    /// Absolute tolerance for the residual norm
    pub tol_rr_abs: f64,

    /// Relative tolerance for the displacement increment
    pub tol_mdu_rel: f64,

    /// Keeps the tangent (Jacobian) matrix constant during the iterations (modified Newton)
    pub constant_tangent: bool,

    /// Linear problem: a single iteration suffices and no convergence table is shown
    pub linear_problem: bool,

    /// Shows time step information
    pub verbose_timesteps: bool,

    /// Shows iteration information
    pub verbose_iterations: bool,

    /// Linear solver kind
    pub lin_sol_genie: Genie,

    /// Linear solver parameters
    pub lin_sol_params: LinSolParams,
}

impl Config {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh) -> Self {
        Config {
            ideal: Idealization::new(mesh.ndim),
            ngauss: HashMap::new(),
            t_ini: 0.0,
            t_fin: 1.0,
            dt: Box::new(|_| 1.0),
            dt_out: Box::new(|_| 1.0),
            n_max_time_steps: 1_000,
            n_max_iterations: 10,
            tol_rr_abs: 1e-10,
            tol_mdu_rel: 1e-8,
            constant_tangent: false,
            linear_problem: false,
            verbose_timesteps: true,
            verbose_iterations: true,
            lin_sol_genie: Genie::Umfpack,
            lin_sol_params: LinSolParams::new(),
        }
    }

    /// Validates the configuration data
    ///
    /// Returns a message with the error, if any
    pub fn validate(&self) -> Option<String> {
        if self.ideal.thickness <= 0.0 {
            return Some(format!("thickness = {:?} is incorrect; it must be > 0.0", self.ideal.thickness));
        }
        if self.t_fin < self.t_ini {
            return Some(format!(
                "t_fin = {:?} is incorrect; it must be ≥ t_ini = {:?}",
                self.t_fin, self.t_ini
            ));
        }
        let dt = (self.dt)(self.t_ini);
        if dt <= 0.0 {
            return Some(format!("dt = {:?} is incorrect; it must be > 0.0", dt));
        }
        let dt_out = (self.dt_out)(self.t_ini);
        if dt_out <= 0.0 {
            return Some(format!("dt_out = {:?} is incorrect; it must be > 0.0", dt_out));
        }
        if self.n_max_iterations < 1 {
            return Some("n_max_iterations must be ≥ 1".to_string());
        }
        if self.tol_rr_abs <= 0.0 {
            return Some(format!(
                "tol_rr_abs = {:?} is incorrect; it must be > 0.0",
                self.tol_rr_abs
            ));
        }
        if self.tol_mdu_rel <= 0.0 {
            return Some(format!(
                "tol_mdu_rel = {:?} is incorrect; it must be > 0.0",
                self.tol_mdu_rel
            ));
        }
        None
    }

    /// Returns the integration (Gauss) points data for a Cell
    pub fn gauss(&self, cell: &Cell) -> Result<Gauss, StrError> {
        Gauss::new_or_sized(cell.kind, self.ngauss.get(&cell.attribute).copied())
    }

    // --- setters -------------------------------------------------------------------------------

    /// Sets the number of integration (Gauss) points for a cell attribute
    pub fn set_ngauss(&mut self, attribute: CellAttribute, ngauss: usize) -> &mut Self {
        self.ngauss.insert(attribute, ngauss);
        self
    }

    /// Sets a 2D plane-stress analysis with the out-of-plane thickness
    ///
    /// **Note:** Only the linear elastic model supports plane-stress.
    pub fn set_plane_stress(&mut self, thickness: f64) -> &mut Self {
        self.ideal.plane_stress = true;
        self.ideal.thickness = thickness;
        self
    }

    /// Sets the initial pseudo-time
    pub fn set_t_ini(&mut self, t_ini: f64) -> &mut Self {
        self.t_ini = t_ini;
        self
    }

    /// Sets the final pseudo-time
    pub fn set_t_fin(&mut self, t_fin: f64) -> &mut Self {
        self.t_fin = t_fin;
        self
    }

    /// Sets the pseudo-time increment as a function of the current time
    pub fn set_dt(&mut self, dt: impl Fn(f64) -> f64 + Send + Sync + 'static) -> &mut Self {
        self.dt = Box::new(dt);
        self
    }

    /// Sets the time interval between output records
    pub fn set_dt_out(&mut self, dt_out: impl Fn(f64) -> f64 + Send + Sync + 'static) -> &mut Self {
        self.dt_out = Box::new(dt_out);
        self
    }

    /// Sets incremental loading with n_station time stations
    ///
    /// The pseudo-time then runs over 0, 1, 2, ..., n_station-1 with unit
    /// increments; thus the BC functions of t can index load tables directly.
    pub fn set_incremental(&mut self, n_station: usize) -> &mut Self {
        self.t_ini = 0.0;
        self.t_fin = (n_station - 1) as f64;
        self.dt = Box::new(|_| 1.0);
        self.dt_out = Box::new(|_| 1.0);
        self
    }

    /// Sets the maximum number of time steps
    pub fn set_n_max_time_steps(&mut self, n: usize) -> &mut Self {
        self.n_max_time_steps = n;
        self
    }

    /// Sets the maximum number of Newton-Raphson iterations
    pub fn set_n_max_iterations(&mut self, n: usize) -> &mut Self {
        self.n_max_iterations = n;
        self
    }

    /// Sets the absolute tolerance for the residual norm
    pub fn set_tol_rr(&mut self, tol: f64) -> &mut Self {
        self.tol_rr_abs = tol;
        self
    }

    /// Sets the relative tolerance for the displacement increment
    pub fn set_tol_mdu(&mut self, tol: f64) -> &mut Self {
        self.tol_mdu_rel = tol;
        self
    }

    /// Enables the modified Newton method (constant tangent during iterations)
    pub fn set_constant_tangent(&mut self, flag: bool) -> &mut Self {
        self.constant_tangent = flag;
        self
    }

    /// Marks the problem as linear (single iteration)
    pub fn set_linear_problem(&mut self, flag: bool) -> &mut Self {
        self.linear_problem = flag;
        self
    }

    /// Enables/disables the progress messages
    pub fn set_messages(&mut self, timesteps: bool, iterations: bool) -> &mut Self {
        self.verbose_timesteps = timesteps;
        self.verbose_iterations = iterations;
        self
    }

    /// Sets the linear solver kind
    pub fn set_lin_sol_genie(&mut self, genie: Genie) -> &mut Self {
        self.lin_sol_genie = genie;
        self
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n").unwrap();
        write!(f, "==================\n").unwrap();
        write!(f, "two_dim = {:?}\n", self.ideal.two_dim).unwrap();
        write!(f, "plane_stress = {:?}\n", self.ideal.plane_stress).unwrap();
        write!(f, "thickness = {:?}\n", self.ideal.thickness).unwrap();
        write!(f, "t_ini = {:?}\n", self.t_ini).unwrap();
        write!(f, "t_fin = {:?}\n", self.t_fin).unwrap();
        write!(f, "n_max_time_steps = {:?}\n", self.n_max_time_steps).unwrap();
        write!(f, "n_max_iterations = {:?}\n", self.n_max_iterations).unwrap();
        write!(f, "tol_rr_abs = {:?}\n", self.tol_rr_abs).unwrap();
        write!(f, "tol_mdu_rel = {:?}\n", self.tol_mdu_rel).unwrap();
        write!(f, "constant_tangent = {:?}\n", self.constant_tangent).unwrap();
        write!(f, "linear_problem = {:?}\n", self.linear_problem).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Config;
    use gemlab::mesh::Samples;

    #[test]
    fn new_and_validate_work() {
        let mesh = Samples::one_tri3();
        let mut config = Config::new(&mesh);
        assert_eq!(config.validate(), None);

        config.ideal.thickness = -1.0;
        assert_eq!(
            config.validate(),
            Some("thickness = -1.0 is incorrect; it must be > 0.0".to_string())
        );
        config.ideal.thickness = 1.0;

        config.set_t_fin(-1.0);
        assert_eq!(
            config.validate(),
            Some("t_fin = -1.0 is incorrect; it must be ≥ t_ini = 0.0".to_string())
        );
        config.set_t_fin(1.0);

        config.set_dt(|_| -1.0);
        assert_eq!(
            config.validate(),
            Some("dt = -1.0 is incorrect; it must be > 0.0".to_string())
        );
        config.set_dt(|_| 1.0);

        config.set_dt_out(|_| 0.0);
        assert_eq!(
            config.validate(),
            Some("dt_out = 0.0 is incorrect; it must be > 0.0".to_string())
        );
        config.set_dt_out(|_| 1.0);

        config.set_n_max_iterations(0);
        assert_eq!(config.validate(), Some("n_max_iterations must be ≥ 1".to_string()));
        config.set_n_max_iterations(10);

        config.set_tol_rr(0.0);
        assert_eq!(
            config.validate(),
            Some("tol_rr_abs = 0.0 is incorrect; it must be > 0.0".to_string())
        );
        config.set_tol_rr(1e-10);

        config.set_tol_mdu(0.0);
        assert_eq!(
            config.validate(),
            Some("tol_mdu_rel = 0.0 is incorrect; it must be > 0.0".to_string())
        );
        config.set_tol_mdu(1e-8);
        assert_eq!(config.validate(), None);
    }

    #[test]
    fn set_incremental_works() {
        let mesh = Samples::one_tri3();
        let mut config = Config::new(&mesh);
        config.set_incremental(5);
        assert_eq!(config.t_ini, 0.0);
        assert_eq!(config.t_fin, 4.0);
        assert_eq!((config.dt)(123.0), 1.0);
        assert_eq!((config.dt_out)(123.0), 1.0);
    }

    #[test]
    fn gauss_works() {
        let mesh = Samples::one_qua4();
        let mut config = Config::new(&mesh);
        assert_eq!(config.gauss(&mesh.cells[0]).unwrap().npoint(), 4);
        config.set_ngauss(1, 9);
        assert_eq!(config.gauss(&mesh.cells[0]).unwrap().npoint(), 9);
        config.set_ngauss(1, 100); // wrong
        assert!(config.gauss(&mesh.cells[0]).is_err());
    }

    #[test]
    fn display_works() {
        let mesh = Samples::one_tri3();
        let config = Config::new(&mesh);
        assert!(format!("{}", config).contains("n_max_iterations = 10"));
    }
}
