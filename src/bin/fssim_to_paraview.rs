use fssim::fem::PostProc;
use fssim::StrError;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "fssim_to_paraview",
    about = "Generates VTU and PVD files for visualization with ParaView"
)]
struct Options {
    /// Directory holding the simulation output files
    out_dir: String,

    /// Filename stem of the simulation output files
    fn_stem: String,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // load the summary and the mesh
    let (file_io, mesh) = PostProc::read_summary(&options.out_dir, &options.fn_stem)?;

    // write VTU files
    for index in &file_io.indices {
        let state = PostProc::read_state(&file_io, *index)?;
        file_io.write_vtu(&mesh, &state, *index)?;
    }

    // write PVD file
    file_io.write_pvd()?;

    // message
    let path_pvd = file_io.path_pvd();
    let thin_line = format!("{:─^1$}", "", path_pvd.len());
    println!("\n{}", thin_line);
    println!("VTU files generated; the PVD file is:");
    println!("{}", path_pvd);
    println!("{}\n", thin_line);
    Ok(())
}
