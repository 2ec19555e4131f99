use fssim::prelude::*;
use fssim::StrError;
use gemlab::prelude::*;
use structopt::StructOpt;

// Plane-strain tension of a rectangular plate driven by prescribed vertical
// displacements on the top edge. The default material is a von Mises metal
// with Voce exponential hardening:
//
//   σy(p) = σ0 + (σu - σ0) (1 - exp(-b p))
//
// prescribed ↑ ↑ ↑ ↑
//      +---------------+ Ly
//      |               |
//      |               |      E  = 70e3   σ0 = 350
//      |               |      ν  = 0.3    σu = 500
//      |               |                  b  = 1e3
//      +---------------+
//     0.0     fixed   Lx
//
// After the solution, the average vertical stress on the top edge is
// recovered from the internal forces and the stress-strain history is
// written as a CSV table and a figure, together with the timing report.

const NAME: &str = "plate_tension";

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(name = "plate_tension", about = "Plane-strain tension of an elastoplastic plate")]
struct Options {
    /// Number of cells along the x direction
    #[structopt(long, default_value = "4")]
    nx: usize,

    /// Number of cells along the y direction
    #[structopt(long, default_value = "8")]
    ny: usize,

    /// Number of load increments
    #[structopt(long, default_value = "10")]
    increments: usize,

    /// Final vertical strain
    #[structopt(long, default_value = "2e-2")]
    max_strain: f64,

    /// Uses the finite-strain von Mises model instead of the small-strain one
    #[structopt(long)]
    finite_strain: bool,

    /// Output directory
    #[structopt(long, default_value = "/tmp/fssim/results")]
    out_dir: String,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();
    let (lx, ly) = (1.0, 2.0);

    // mesh
    let mesh = SampleMeshes::rectangle_qua4(lx, ly, options.nx, options.ny);

    // features
    let features = Features::new(&mesh, false);
    let bottom = features.search_edges(At::Y(0.0), any_x)?;
    let top = features.search_edges(At::Y(ly), any_x)?;
    let origin = features.search_point_ids(At::XY(0.0, 0.0), any_x)?;

    // parameters
    let stress_strain = if options.finite_strain {
        StressStrain::FiniteStrainVonMises {
            young: 70_000.0,
            poisson: 0.3,
            z_ini: 350.0,
            hardening: Hardening::Voce {
                sig_u: 500.0,
                bb: 1000.0,
            },
        }
    } else {
        StressStrain::VonMises {
            young: 70_000.0,
            poisson: 0.3,
            z_ini: 350.0,
            hardening: Hardening::Voce {
                sig_u: 500.0,
                bb: 1000.0,
            },
        }
    };
    let p1 = ParamSolid {
        density: 1.0,
        stress_strain,
        ngauss: None,
    };
    let base = FemBase::new(&mesh, [(1, Elem::Solid(p1))])?;

    // essential boundary conditions
    let n = options.increments as f64;
    let deyy = options.max_strain / n;
    let mut essential = Essential::new();
    essential
        .edges(&bottom, Dof::Uy, 0.0)
        .points(&origin, Dof::Ux, 0.0)
        .edges_fn(&top, Dof::Uy, move |t| deyy * t * ly);

    // natural boundary conditions
    let natural = Natural::new();

    // configuration
    let mut config = Config::new(&mesh);
    config
        .set_incremental(options.increments + 1)
        .set_tol_rr(1e-6)
        .set_n_max_iterations(20)
        .set_messages(true, true);

    // FEM state and output files
    let mut state = FemState::new(&mesh, &base, &config)?;
    let mut file_io = FileIo::new();
    file_io.activate(&mesh, &base, NAME, Some(&options.out_dir))?;

    // run the simulation
    let mut solver = SolverImplicit::new(&mesh, &base, &config, &essential, &natural)?;
    solver.solve(&mut state, &mut file_io)?;

    // post-processing: stress-strain history from the internal forces on the top edge
    let top_points = features.get_points_via_2d_edges(&top);
    let mut curve = StressStrainCurve::new(NAME);
    for index in &file_io.indices {
        let state_i = PostProc::read_state(&file_io, *index)?;
        let ff_int = calc_internal_forces(&mesh, &base, &config, &state_i)?;
        let mut force = 0.0;
        for point_id in &top_points {
            let eq = base.equations.eq(*point_id, Dof::Uy)?;
            force += ff_int[eq];
        }
        let eyy = deyy * file_io.times[*index];
        curve.push(eyy, force / lx);
    }
    let path_csv = format!("{}/{}-stress-strain.csv", options.out_dir, NAME);
    let path_svg = format!("{}/{}-stress-strain.svg", options.out_dir, NAME);
    curve.write_csv(&path_csv)?;
    curve.save_figure(&path_svg)?;

    // paraview files
    for index in &file_io.indices {
        let state_i = PostProc::read_state(&file_io, *index)?;
        file_io.write_vtu(&mesh, &state_i, *index)?;
    }
    file_io.write_pvd()?;

    // message
    println!("results written to {}", options.out_dir);
    println!("{}", solver.stats);
    Ok(())
}
