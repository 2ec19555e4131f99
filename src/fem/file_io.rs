use super::{FemBase, FemState, Stats};
use crate::base::{Equations, DEFAULT_OUT_DIR};
use crate::StrError;
use gemlab::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Assists in generating output files
///
/// A deactivated instance may be passed to the solver to skip all output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileIo {
    /// Holds a flag to enable/disable the generation of files
    pub(crate) active: bool,

    /// Defines the output directory
    output_dir: String,

    /// Defines the filename stem
    filename_stem: String,

    /// Holds the count of files written
    output_count: usize,

    /// Holds the indices of the output files
    pub indices: Vec<usize>,

    /// Holds the simulation (pseudo) times corresponding to each output file
    pub times: Vec<f64>,

    /// Holds equation numbers (DOF numbers)
    pub(crate) equations: Equations,
}

impl FileIo {
    /// Allocates a new instance with deactivated generation of files
    pub fn new() -> Self {
        FileIo {
            active: false,
            output_dir: String::new(),
            filename_stem: String::new(),
            output_count: 0,
            indices: Vec::new(),
            times: Vec::new(),
            equations: Equations {
                all: Vec::new(),
                n_equation: 0,
            },
        }
    }

    /// Activates the generation of files
    ///
    /// # Input
    ///
    /// * `mesh` -- the mesh (will be written to the output directory)
    /// * `base` -- the FEM base holding the DOF numbers
    /// * `filename_stem` -- the last part of the filename without extension, e.g., "my_simulation"
    /// * `output_directory` -- the directory to save the output files.
    ///   None means that the default directory will be used; see [DEFAULT_OUT_DIR]
    pub fn activate(
        &mut self,
        mesh: &Mesh,
        base: &FemBase,
        filename_stem: &str,
        output_directory: Option<&str>,
    ) -> Result<(), StrError> {
        // output directory
        let out_dir = match output_directory {
            Some(d) => d,
            None => DEFAULT_OUT_DIR,
        };

        // create directory
        fs::create_dir_all(out_dir).map_err(|_| "cannot create output directory")?;

        // write the mesh
        let path = format!("{}/{}-mesh.json", out_dir, filename_stem);
        mesh.write_json(&path)?;

        // update self
        self.active = true;
        self.output_dir = out_dir.to_string();
        self.filename_stem = filename_stem.to_string();
        self.output_count = 0;
        self.indices = Vec::new();
        self.times = Vec::new();
        self.equations = base.equations.clone();
        Ok(())
    }

    /// Generates the filename path for the mesh file
    pub fn path_mesh(&self) -> String {
        format!("{}/{}-mesh.json", self.output_dir, self.filename_stem)
    }

    /// Generates the filename path for the summary file
    pub fn path_summary(&self) -> String {
        format!("{}/{}-summary.json", self.output_dir, self.filename_stem)
    }

    /// Generates the filename path for the statistics file
    pub fn path_stats(&self) -> String {
        format!("{}/{}-stats.json", self.output_dir, self.filename_stem)
    }

    /// Generates the filename path for the state files
    pub fn path_state(&self, index: usize) -> String {
        format!("{}/{}-{:0>20}.json", self.output_dir, self.filename_stem, index)
    }

    /// Generates the filename path for the VTU (ParaView) files
    pub fn path_vtu(&self, index: usize) -> String {
        format!("{}/{}-{:0>20}.vtu", self.output_dir, self.filename_stem, index)
    }

    /// Generates the filename path for the PVD (ParaView) file
    pub fn path_pvd(&self) -> String {
        format!("{}/{}.pvd", self.output_dir, self.filename_stem)
    }

    /// Reads a JSON file containing this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(path).map_err(|_| "cannot open summary file")?;
        let buffered = BufReader::new(file);
        let summary = serde_json::from_reader(buffered).map_err(|_| "cannot parse summary file")?;
        Ok(summary)
    }

    /// Writes a JSON file with this struct
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
        let mut file = File::create(&path).map_err(|_| "cannot create summary file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write summary file")?;
        Ok(())
    }

    /// Writes the current FEM state to a file
    ///
    /// **Note:** No output is generated if this instance is deactivated.
    pub(crate) fn write_state(&mut self, state: &FemState) -> Result<(), StrError> {
        if self.active {
            let path = self.path_state(self.output_count);
            state.write_json(&path)?;
            self.indices.push(self.output_count);
            self.times.push(state.t);
            self.output_count += 1;
        }
        Ok(())
    }

    /// Writes this struct to the summary file
    pub(crate) fn write_self(&self) -> Result<(), StrError> {
        if self.active {
            let path = self.path_summary();
            self.write_json(&path)?;
        }
        Ok(())
    }

    /// Writes the statistics file
    pub(crate) fn write_stats(&self, stats: &Stats) -> Result<(), StrError> {
        if self.active {
            stats.write_json(&self.path_stats())?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
