use fssim::prelude::*;
use fssim::StrError;
use gemlab::mesh::Samples;
use gemlab::prelude::*;
use russell_lab::approx_eq;

// Saint Venant-Kirchhoff hyperelasticity with a single element
//
// A unit square is stretched vertically with the lateral displacements
// fully constrained, producing the homogeneous deformation gradient
// F = diag(1, λ, 1). The second Piola-Kirchhoff stress then follows the
// closed-form SVK relation with E_GL = diag(0, (λ²-1)/2, 0).
//
// TEST GOAL
//
// Verifies the total-Lagrangian element, the analytical tangent operator,
// and the finite-strain state handling through the FEM driver.
//
// MESH
//
// Unit square (one Qua4)
//
//   roller 3---------2 roller     prescribed uy on top
//          |         |
//          |         |   E = 200e3
//          |         |   ν = 0.3
//   roller 0---------1 roller
//        fixed bottom
//
// BOUNDARY CONDITIONS
//
// * Horizontally restrain the left and right edges
// * Vertically restrain the bottom edge
// * Apply a vertical displacement +uy on the top edge

const NAME: &str = "test_svk_single_element_2d";
const YOUNG: f64 = 200_000.0;
const POISSON: f64 = 0.3;
const STRETCH_FIN: f64 = 1.2;
const N_STEPS: usize = 4;

#[test]
fn test_svk_single_element_2d() -> Result<(), StrError> {
    // mesh
    let mesh = Samples::one_qua4();

    // features
    let features = Features::new(&mesh, false);
    let left = features.search_edges(At::X(0.0), any_x)?;
    let right = features.search_edges(At::X(1.0), any_x)?;
    let bottom = features.search_edges(At::Y(0.0), any_x)?;
    let top = features.search_edges(At::Y(1.0), any_x)?;

    // parameters
    let p1 = ParamSolid {
        density: 1.0,
        stress_strain: StressStrain::SaintVenantKirchhoff {
            young: YOUNG,
            poisson: POISSON,
        },
        ngauss: None,
    };
    let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))])?;

    // essential boundary conditions
    let duy = (STRETCH_FIN - 1.0) / (N_STEPS as f64);
    let mut essential = Essential::new();
    essential
        .edges(&left, Dof::Ux, 0.0)
        .edges(&right, Dof::Ux, 0.0)
        .edges(&bottom, Dof::Uy, 0.0)
        .edges_fn(&top, Dof::Uy, move |t| duy * t);

    // natural boundary conditions
    let natural = Natural::new();

    // configuration
    let mut config = Config::new(&mesh);
    config
        .set_incremental(N_STEPS + 1)
        .set_tol_rr(1e-7)
        .set_n_max_iterations(20)
        .set_messages(false, false);

    // FEM state and solver
    let mut state = FemState::new(&mesh, &base, &config)?;
    let mut file_io = FileIo::new();
    file_io.activate(&mesh, &base, NAME, Some("/tmp/fssim/test"))?;
    let mut solver = SolverImplicit::new(&mesh, &base, &config, &essential, &natural)?;
    solver.solve(&mut state, &mut file_io)?;

    // closed-form SVK solution for F = diag(1, λ, 1)
    let lambda_lame = YOUNG * POISSON / ((1.0 + POISSON) * (1.0 - 2.0 * POISSON));
    let mu = YOUNG / (2.0 * (1.0 + POISSON));
    let e_yy = (STRETCH_FIN * STRETCH_FIN - 1.0) / 2.0;
    let s_yy = (lambda_lame + 2.0 * mu) * e_yy;
    let s_xx = lambda_lame * e_yy;

    let post = PostProc::new(&mesh, &base);
    let ss = post.gauss_stress_avg(&state, 0)?;
    approx_eq(ss.get(1, 1), s_yy, 1e-8 * YOUNG);
    approx_eq(ss.get(0, 0), s_xx, 1e-8 * YOUNG);
    approx_eq(ss.get(0, 1), 0.0, 1e-8 * YOUNG);

    // the deformation gradient is homogeneous: F = diag(1, λ, 1)
    let ff = &state.gauss[0].all[0].deformation_gradient;
    approx_eq(ff.get(0, 0), 1.0, 1e-10);
    approx_eq(ff.get(1, 1), STRETCH_FIN, 1e-10);
    approx_eq(ff.get(2, 2), 1.0, 1e-15);

    // reaction on the top edge: the first Piola-Kirchhoff traction is
    // Pyy = λ Syy over the reference width
    let ff_int = calc_internal_forces(&mesh, &base, &config, &state)?;
    let mut force = 0.0;
    for p in 0..mesh.points.len() {
        if mesh.points[p].coords[1] == 1.0 {
            force += ff_int[base.equations.eq(p, Dof::Uy)?];
        }
    }
    approx_eq(force, STRETCH_FIN * s_yy, 1e-8 * YOUNG);

    // at the initial (unloaded) state the stress was zero
    let state_0 = PostProc::read_state(&file_io, 0)?;
    let ss_0 = post.gauss_stress_avg(&state_0, 0)?;
    approx_eq(ss_0.get(0, 0), 0.0, 1e-14);
    approx_eq(ss_0.get(1, 1), 0.0, 1e-14);

    assert_eq!(solver.stats.n_steps, N_STEPS);
    println!("{} : Syy = {:.6e} (correct {:.6e})", NAME, ss.get(1, 1), s_yy);
    Ok(())
}
