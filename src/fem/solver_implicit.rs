use super::{
    BcConcentrated, BcDistributedArray, BcPrescribed, ConvergenceControl, Elements, FemBase, FemState, FileIo,
    LinearSystem, Stats,
};
use crate::base::{Config, Essential, Natural};
use crate::StrError;
use gemlab::mesh::Mesh;
use russell_lab::Stopwatch;

/// Performs a quasi-static simulation with the Newton-Raphson method
///
/// The pseudo-time t (load factor) advances in increments Δt; the essential
/// and natural boundary conditions are functions of t, which implements the
/// load increments. At each increment, the Newton-Raphson iterations solve
/// the nonlinear equilibrium equations, with the stress updates always
/// starting from the converged state of the previous increment.
pub struct SolverImplicit<'a> {
    /// Holds configuration parameters
    config: &'a Config,

    /// Holds the prescribed (essential) values
    pub prescribed: BcPrescribed<'a>,

    /// Holds the concentrated loads
    pub concentrated: BcConcentrated<'a>,

    /// Holds the distributed loads
    pub distributed: BcDistributedArray<'a>,

    /// Holds the collection of elements
    pub elements: Elements<'a>,

    /// Holds the variables to solve the global linear system
    pub linear_system: LinearSystem<'a>,

    /// Holds the timing and iteration statistics
    pub stats: Stats,
}

impl<'a> SolverImplicit<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &'a Mesh,
        base: &'a FemBase,
        config: &'a Config,
        essential: &'a Essential,
        natural: &'a Natural,
    ) -> Result<Self, StrError> {
        if let Some(message) = config.validate() {
            println!("ERROR: {}", message);
            return Err("cannot allocate simulation because config.validate() failed");
        }
        let prescribed = BcPrescribed::new(base, essential)?;
        let concentrated = BcConcentrated::new(base, natural)?;
        let distributed = BcDistributedArray::new(mesh, base, config, natural)?;
        let elements = Elements::new(mesh, base, config)?;
        let linear_system = LinearSystem::new(base, config, &prescribed, &elements)?;
        Ok(SolverImplicit {
            config,
            prescribed,
            concentrated,
            distributed,
            elements,
            linear_system,
            stats: Stats::new(),
        })
    }

    /// Solves the associated system of partial differential equations
    pub fn solve(&mut self, state: &mut FemState, file_io: &mut FileIo) -> Result<(), StrError> {
        let config = self.config;
        let neq = self.linear_system.n_equation;
        let mut sw_total = Stopwatch::new("");

        // initialize internal values
        self.elements.initialize_internal_values(state)?;

        // first output
        let mut sw = Stopwatch::new("");
        file_io.write_state(state)?;
        self.stats.nanos_output += sw.stop();
        let mut t_out = state.t + (config.dt_out)(state.t);

        // convergence control
        let mut control = ConvergenceControl::new(config, neq);
        if !config.linear_problem {
            control.print_header();
        }

        // loop over the load increments
        for timestep in 0..config.n_max_time_steps {
            // update pseudo-time
            state.dt = (config.dt)(state.t);
            if state.t + state.dt > config.t_fin + 1e-12 {
                break;
            }
            state.t += state.dt;
            control.reset();
            control.print_timestep(timestep, state.t, state.dt);

            // set prescribed U and ΔU at the new time and update the
            // secondary values for the prescribed increment
            if self.prescribed.equations.len() > 0 {
                self.prescribed.apply(&mut state.duu, &mut state.uu, state.t);
                let mut sw = Stopwatch::new("");
                self.elements.update_secondary_values(state)?;
                self.stats.nanos_update += sw.stop();
            }

            // reset cumulated primary values and algorithmic variables
            state.duu.fill(0.0);
            if !config.linear_problem {
                state.reset_algorithmic_variables();
            }

            // From here on, the time t corresponds to the new (updated) time; the primary
            // variables (except the prescribed ones) are still at the old time and therefore
            // the secondary values are the trial values of this increment.
            let mut converged = false;
            let mut n_iterations = 0;
            for iteration in 0..config.n_max_iterations {
                // compute and assemble residuals
                let mut sw = Stopwatch::new("");
                self.elements.calc_residuals_parallel(state)?;
                self.distributed.calc_residuals(state.t)?;
                let rr = &mut self.linear_system.residual;
                self.elements.assemble_residuals(rr, &self.prescribed.flags);
                self.distributed.assemble_residuals(rr, &self.prescribed.flags);
                self.concentrated.add_to_residual(rr, state.t);
                self.stats.nanos_residual += sw.stop();

                // check convergence
                control.analyze_rr(iteration, &self.linear_system.residual)?;
                if !config.linear_problem {
                    control.print_iteration();
                }
                if control.converged() {
                    converged = true;
                    break;
                }
                if control.diverging() {
                    return Err("Newton-Raphson is diverging");
                }

                // compute and factorize the Jacobian matrix
                if iteration == 0 || !config.constant_tangent {
                    let mut sw = Stopwatch::new("");
                    self.elements.calc_jacobians_parallel(state)?;
                    let kk = &mut self.linear_system.jacobian;
                    self.elements.assemble_jacobians(kk.get_coo_mut()?, &self.prescribed.flags)?;
                    for eq in &self.prescribed.equations {
                        kk.get_coo_mut()?.put(*eq, *eq, 1.0)?;
                    }
                    self.stats.nanos_jacobian += sw.stop();

                    let mut sw = Stopwatch::new("");
                    self.linear_system
                        .solver
                        .actual
                        .factorize(kk, Some(config.lin_sol_params))?;
                    self.stats.nanos_factorize += sw.stop();
                }

                // solve the linear system
                let mut sw = Stopwatch::new("");
                self.linear_system.solver.actual.solve(
                    &mut self.linear_system.mdu,
                    &self.linear_system.jacobian,
                    &self.linear_system.residual,
                    false,
                )?;
                self.stats.nanos_solve += sw.stop();
                n_iterations += 1;
                control.analyze_mdu(iteration, &self.linear_system.mdu)?;

                // update U and ΔU
                for i in 0..neq {
                    state.uu[i] -= self.linear_system.mdu[i];
                    state.duu[i] -= self.linear_system.mdu[i];
                }

                // backup/restore the trial secondary values
                if !config.linear_problem {
                    if iteration == 0 {
                        state.backup_secondary_values();
                    } else {
                        state.restore_secondary_values();
                    }
                }

                // update secondary values
                let mut sw = Stopwatch::new("");
                self.elements.update_secondary_values(state)?;
                self.stats.nanos_update += sw.stop();

                // a single solution suffices for linear problems
                if config.linear_problem {
                    converged = true;
                    break;
                }
            }
            if !converged {
                return Err("Newton-Raphson did not converge");
            }
            self.stats.add_step(n_iterations);

            // output
            if state.t >= t_out - 1e-12 || state.t >= config.t_fin - 1e-12 {
                let mut sw = Stopwatch::new("");
                file_io.write_state(state)?;
                self.stats.nanos_output += sw.stop();
                t_out += (config.dt_out)(state.t);
            }

            // final time step
            if state.t >= config.t_fin - 1e-12 {
                break;
            }
        }
        if !config.linear_problem {
            control.print_footer();
        }

        // write the summary and statistics files
        self.stats.nanos_total = sw_total.stop();
        file_io.write_self()?;
        file_io.write_stats(&self.stats)?;
        if config.verbose_timesteps || config.verbose_iterations {
            println!("{}", self.stats);
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
