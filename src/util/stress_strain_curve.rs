use crate::StrError;
use plotpy::{Curve, Plot};
use std::ffi::OsStr;
use std::fmt::Write;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::Path;

/// Collects the stress-strain (or force-displacement) history of a simulation
///
/// One pair is recorded per load increment; the results can be written as a
/// CSV table and plotted with Matplotlib through plotpy.
pub struct StressStrainCurve {
    /// Holds the name of the case (used in the figure legend)
    pub name: String,

    /// Holds the strain (or displacement) values
    pub strain: Vec<f64>,

    /// Holds the stress (or force) values
    pub stress: Vec<f64>,
}

impl StressStrainCurve {
    /// Allocates a new instance
    pub fn new(name: &str) -> Self {
        StressStrainCurve {
            name: name.to_string(),
            strain: Vec::new(),
            stress: Vec::new(),
        }
    }

    /// Records a (strain, stress) pair
    pub fn push(&mut self, strain: f64, stress: f64) {
        self.strain.push(strain);
        self.stress.push(stress);
    }

    /// Writes a CSV table with the recorded history
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_csv<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut buffer = String::new();
        write!(&mut buffer, "strain,stress\n").unwrap();
        for i in 0..self.strain.len() {
            write!(&mut buffer, "{:?},{:?}\n", self.strain[i], self.stress[i]).unwrap();
        }
        let mut file = File::create(&path).map_err(|_| "cannot create CSV file")?;
        file.write_all(buffer.as_bytes()).map_err(|_| "cannot write CSV file")?;
        Ok(())
    }

    /// Saves a figure with the stress-strain curve
    pub fn save_figure(&self, full_path: &str) -> Result<(), StrError> {
        let mut curve = Curve::new();
        curve.set_label(&self.name).set_marker_style("o");
        curve.draw(&self.strain, &self.stress);
        let mut plot = Plot::new();
        plot.add(&curve);
        plot.grid_and_labels("strain", "stress");
        plot.save(full_path)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
