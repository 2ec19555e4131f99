use fssim::prelude::*;
use fssim::StrError;
use gemlab::mesh::Samples;
use gemlab::prelude::*;
use russell_lab::approx_eq;

// Compressible neo-Hookean block under volumetric stretch (3D)
//
// A unit cube is stretched equally along the three axes by prescribing the
// normal displacements of all faces, producing F = diag(λ, λ, λ). The
// second Piola-Kirchhoff stress is isotropic with the closed-form value
//
//   S = μ (1 - 1/λ²) + λL ln(λ³) / λ²
//
// TEST GOAL
//
// Verifies the total-Lagrangian element and the neo-Hookean tangent in 3D.
//
// MESH
//
// Unit cube (one Hex8)
//
// BOUNDARY CONDITIONS
//
// * Normal displacement zero on the faces at x=0, y=0, z=0
// * Prescribed normal displacement +u on the faces at x=1, y=1, z=1

const NAME: &str = "test_neo_hookean_block_3d";
const YOUNG: f64 = 10_000.0;
const POISSON: f64 = 0.25;
const STRETCH_FIN: f64 = 1.1;
const N_STEPS: usize = 2;

#[test]
fn test_neo_hookean_block_3d() -> Result<(), StrError> {
    // mesh
    let mesh = Samples::one_hex8();

    // features
    let features = Features::new(&mesh, false);
    let face_x0 = features.search_faces(At::X(0.0), any_x)?;
    let face_x1 = features.search_faces(At::X(1.0), any_x)?;
    let face_y0 = features.search_faces(At::Y(0.0), any_x)?;
    let face_y1 = features.search_faces(At::Y(1.0), any_x)?;
    let face_z0 = features.search_faces(At::Z(0.0), any_x)?;
    let face_z1 = features.search_faces(At::Z(1.0), any_x)?;

    // parameters
    let p1 = ParamSolid {
        density: 1.0,
        stress_strain: StressStrain::NeoHookean {
            young: YOUNG,
            poisson: POISSON,
        },
        ngauss: None,
    };
    let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))])?;

    // essential boundary conditions
    let du = (STRETCH_FIN - 1.0) / (N_STEPS as f64);
    let mut essential = Essential::new();
    essential
        .faces(&face_x0, Dof::Ux, 0.0)
        .faces(&face_y0, Dof::Uy, 0.0)
        .faces(&face_z0, Dof::Uz, 0.0)
        .faces_fn(&face_x1, Dof::Ux, move |t| du * t)
        .faces_fn(&face_y1, Dof::Uy, move |t| du * t)
        .faces_fn(&face_z1, Dof::Uz, move |t| du * t);

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
    let mut solver = SolverImplicit::new(&mesh, &base, &config, &essential, &natural)?;
    solver.solve(&mut state, &mut file_io)?;

    // closed-form neo-Hookean solution for F = diag(λ, λ, λ)
    let lambda_lame = YOUNG * POISSON / ((1.0 + POISSON) * (1.0 - 2.0 * POISSON));
    let mu = YOUNG / (2.0 * (1.0 + POISSON));
    let s2 = STRETCH_FIN * STRETCH_FIN;
    let s_correct = mu * (1.0 - 1.0 / s2) + lambda_lame * f64::ln(STRETCH_FIN * STRETCH_FIN * STRETCH_FIN) / s2;

    let post = PostProc::new(&mesh, &base);
    let ss = post.gauss_stress_avg(&state, 0)?;
    for i in 0..3 {
        approx_eq(ss.get(i, i), s_correct, 1e-8 * YOUNG);
    }
    approx_eq(ss.get(0, 1), 0.0, 1e-10);

    // the deformation gradient is homogeneous and volumetric
    let ff = &state.gauss[0].all[0].deformation_gradient;
    for i in 0..3 {
        approx_eq(ff.get(i, i), STRETCH_FIN, 1e-10);
    }

    assert_eq!(solver.stats.n_steps, N_STEPS);
    println!("{} : S = {:.6e} (correct {:.6e})", NAME, ss.get(0, 0), s_correct);
    Ok(())
}
