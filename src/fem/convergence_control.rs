use crate::base::Config;
use crate::StrError;
use russell_lab::{vec_copy, vec_max_scaled, vec_norm, Norm, Vector};

/// Controls the convergence of the nonlinear (Newton-Raphson) iterations
///
/// Two criteria are tracked:
///
/// 1. The maximum norm of the residual vector (`norm_rr`)
/// 2. The relative displacement increment (`rel_mdu`)
///
/// The iterations are considered converged when either criterion is
/// satisfied; a growing residual or displacement increment flags divergence.
pub struct ConvergenceControl<'a> {
    /// Holds configuration parameters (tolerances and verbosity)
    config: &'a Config,

    /// Current iteration index
    iteration: usize,

    /// Previous residual norm
    norm_rr_prev: f64,

    /// Current residual norm
    norm_rr: f64,

    /// First displacement increment vector
    mdu0: Vector,

    /// Norm of the current displacement increment
    norm_mdu: f64,

    /// Previous relative displacement increment
    rel_mdu_prev: f64,

    /// Current relative displacement increment
    rel_mdu: f64,

    /// Convergence/divergence flags
    converged_on_norm_rr: bool,
    diverging_on_norm_rr: bool,
    converged_on_rel_mdu: bool,
    diverging_on_rel_mdu: bool,
}

impl<'a> ConvergenceControl<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config, neq_total: usize) -> Self {
        ConvergenceControl {
            config,
            iteration: 0,
            norm_rr_prev: 0.0,
            norm_rr: 0.0,
            mdu0: Vector::new(neq_total),
            norm_mdu: 0.0,
            rel_mdu_prev: 0.0,
            rel_mdu: 0.0,
            converged_on_norm_rr: false,
            diverging_on_norm_rr: false,
            converged_on_rel_mdu: false,
            diverging_on_rel_mdu: false,
        }
    }

    /// Resets the flags for a new load increment
    pub fn reset(&mut self) {
        self.converged_on_norm_rr = false;
        self.diverging_on_norm_rr = false;
        self.converged_on_rel_mdu = false;
        self.diverging_on_rel_mdu = false;
    }

    /// Checks whether the iterations have converged on any criterion
    pub fn converged(&self) -> bool {
        self.converged_on_norm_rr || self.converged_on_rel_mdu
    }

    /// Checks whether the iterations are diverging
    pub fn diverging(&self) -> bool {
        self.diverging_on_norm_rr && self.diverging_on_rel_mdu
    }

    /// Analyzes the convergence based on the residual vector
    pub(crate) fn analyze_rr(&mut self, iteration: usize, rr: &Vector) -> Result<(), StrError> {
        self.iteration = iteration;
        self.norm_rr = vec_norm(rr, Norm::Max);
        let found_nan_or_inf = !self.norm_rr.is_finite();
        self.converged_on_norm_rr = if found_nan_or_inf {
            false
        } else {
            self.norm_rr < self.config.tol_rr_abs
        };
        self.diverging_on_norm_rr = if found_nan_or_inf || iteration < 2 {
            false
        } else {
            self.norm_rr > self.norm_rr_prev
        };
        self.norm_rr_prev = self.norm_rr;
        if found_nan_or_inf {
            Err("found NaN or Inf in the residual vector")
        } else {
            Ok(())
        }
    }

    /// Analyzes the convergence based on the displacement increment
    pub(crate) fn analyze_mdu(&mut self, iteration: usize, mdu: &Vector) -> Result<(), StrError> {
        self.norm_mdu = vec_norm(mdu, Norm::Max);
        let found_nan_or_inf = !self.norm_mdu.is_finite();
        if iteration == 0 {
            vec_copy(&mut self.mdu0, mdu).unwrap();
            self.rel_mdu = 1.0;
        }
        self.converged_on_rel_mdu = if found_nan_or_inf || iteration == 0 {
            false
        } else {
            //                 /    |mduᵢ|   \
            // rel_mdu = max_i | ——————————— |
            //                 \ 1 + |mdu0ᵢ| /
            self.rel_mdu = vec_max_scaled(mdu, &self.mdu0);
            self.rel_mdu < self.config.tol_mdu_rel
        };
        self.diverging_on_rel_mdu = if found_nan_or_inf || iteration < 2 {
            false
        } else {
            self.rel_mdu > self.rel_mdu_prev
        };
        self.rel_mdu_prev = self.rel_mdu;
        if found_nan_or_inf {
            Err("found NaN or Inf in the displacement increment vector")
        } else {
            Ok(())
        }
    }

    /// Prints the table header before the load increments
    pub fn print_header(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!(
                "{:>9} {:>12} {:>12} {:>5} {:>12} {:>12}",
                "increment", "t", "Δt", "iter", "‖R‖∞", "rel(mdu)"
            );
            println!("{}", "─".repeat(68));
        }
    }

    /// Prints the load increment information
    pub(crate) fn print_timestep(&self, timestep: usize, t: f64, dt: f64) {
        if self.config.verbose_timesteps {
            println!("{:>9} {:>12.6e} {:>12.6e}", timestep + 1, t, dt);
        }
    }

    /// Prints the iteration information
    pub(crate) fn print_iteration(&self) {
        if self.config.verbose_iterations {
            if self.iteration == 0 {
                println!(
                    "{:>9} {:>12} {:>12} {:>5} {:>12.3e} {:>12}",
                    ".", ".", ".", self.iteration, self.norm_rr, "."
                );
            } else {
                println!(
                    "{:>9} {:>12} {:>12} {:>5} {:>12.3e} {:>12.3e}",
                    ".", ".", ".", self.iteration, self.norm_rr, self.rel_mdu
                );
            }
        }
    }

    /// Prints the horizontal line at the end of the analysis
    pub(crate) fn print_footer(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!("{}", "─".repeat(68));
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
