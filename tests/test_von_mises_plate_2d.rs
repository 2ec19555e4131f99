use fssim::prelude::*;
use fssim::StrError;
use gemlab::mesh::Samples;
use gemlab::prelude::*;
use russell_lab::approx_eq;

// von Mises plasticity with a single element (plane strain)
//
// This test runs a plane-strain compression of a single element represented
// by the von Mises model with linear isotropic hardening. The displacement
// increment δy is computed such that the first increment brings the stress
// point exactly to the yield surface; the subsequent increments harden.
//
// TEST GOAL
//
// Verifies the plane-strain elastic-predictor/return-mapping implementation
// through the FEM driver: the stress path, the yield consistency, and the
// monotone growth of the cumulated plastic strain.
//
// MESH
//
// Unit square (one Qua4)
//
// displacement    displacement
//         ↓         ↓
//  roller 3---------2
//         |         |   E = 1500  z_ini = 9.0
//         |         |   ν = 0.25  H = 800
//         |         |
//         0---------1
//      fixed       roller
//
// BOUNDARY CONDITIONS
//
// * Horizontally restrain the left edge
// * Vertically restrain the bottom edge
// * Apply a vertical displacement -δy per increment on the top edge
//
// REFERENCE
//
// The elastic limit follows from the plane-strain stress state with a free
// lateral face (σxx = 0, σzz = ν σyy):
//
//   σd = |σyy| √(1 - ν + ν²)     |σyy| = E δy / (1 - ν²)

const NAME: &str = "test_von_mises_plate_2d";
const YOUNG: f64 = 1500.0;
const POISSON: f64 = 0.25;
const Z_INI: f64 = 9.0;
const HH: f64 = 800.0;
const N_STEPS: usize = 5;

#[test]
fn test_von_mises_plate_2d() -> Result<(), StrError> {
    // mesh
    let mesh = Samples::one_qua4();

    // features
    let features = Features::new(&mesh, false);
    let left = features.search_edges(At::X(0.0), any_x)?;
    let bottom = features.search_edges(At::Y(0.0), any_x)?;
    let top = features.search_edges(At::Y(1.0), any_x)?;

    // parameters
    let p1 = ParamSolid {
        density: 1.0,
        stress_strain: StressStrain::VonMises {
            young: YOUNG,
            poisson: POISSON,
            z_ini: Z_INI,
            hardening: Hardening::Linear { hh: HH },
        },
        ngauss: Some(4),
    };
    let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))])?;

    // essential boundary conditions
    let nu = POISSON;
    let nu2 = POISSON * POISSON;
    let delta_y = Z_INI * (1.0 - nu2) / (YOUNG * f64::sqrt(1.0 - nu + nu2));
    let mut essential = Essential::new();
    essential
        .edges(&left, Dof::Ux, 0.0)
        .edges(&bottom, Dof::Uy, 0.0)
        .edges_fn(&top, Dof::Uy, move |t| -delta_y * t);

    // natural boundary conditions
    let natural = Natural::new();

    // configuration
    let mut config = Config::new(&mesh);
    config
        .set_dt(|_| 1.0)
        .set_dt_out(|_| 1.0)
        .set_t_fin(N_STEPS as f64)
        .set_tol_rr(1e-8)
        .set_n_max_iterations(20)
        .set_messages(false, false);

    // FEM state and solver
    let mut state = FemState::new(&mesh, &base, &config)?;
    let mut file_io = FileIo::new();
    file_io.activate(&mesh, &base, NAME, Some("/tmp/fssim/test"))?;
    let mut solver = SolverImplicit::new(&mesh, &base, &config, &essential, &natural)?;
    solver.solve(&mut state, &mut file_io)?;

    // check the final state: yield consistency with linear hardening
    let post = PostProc::new(&mesh, &base);
    let p_final = post.plastic_strain_avg(&state, 0)?;
    let sigma_d_final = post.von_mises_stress_avg(&state, 0)?;
    assert!(p_final > 0.0);
    approx_eq(sigma_d_final, Z_INI + HH * p_final, 1e-8);

    // the lateral face remains stress-free
    let sigma = post.gauss_stress_avg(&state, 0)?;
    approx_eq(sigma.get(0, 0), 0.0, 1e-8);

    // the cumulated plastic strain is non-negative and non-decreasing
    let mut p_prev = 0.0;
    for index in &file_io.indices {
        let state_i = PostProc::read_state(&file_io, *index)?;
        let p = post.plastic_strain_avg(&state_i, 0)?;
        assert!(p >= p_prev);
        p_prev = p;
    }

    // the first increment is elastic (the stress lands exactly on the surface)
    let state_1 = PostProc::read_state(&file_io, 1)?;
    let p_1 = post.plastic_strain_avg(&state_1, 0)?;
    approx_eq(p_1, 0.0, 1e-10);
    let sigma_d_1 = post.von_mises_stress_avg(&state_1, 0)?;
    approx_eq(sigma_d_1, Z_INI, 1e-7);

    // Newton-Raphson converged within a bounded number of iterations
    assert_eq!(solver.stats.n_steps, N_STEPS);
    assert!(solver.stats.n_iterations_max <= 5);
    println!("{} : p_final = {:.6e}, σd_final = {:.6e}", NAME, p_final, sigma_d_final);
    Ok(())
}
