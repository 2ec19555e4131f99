use russell_tensor::Mandel;

/// Defines the geometry idealization (plane-strain, plane-stress, none)
///
/// # Default values
///
/// * The default thickness value is **1.0** for all cases
/// * In 2D, the default choice is **plane-strain**
#[derive(Clone, Copy, Debug)]
pub struct Idealization {
    /// Indicates 2D instead of 3D
    pub two_dim: bool,

    /// Indicates a plane-stress idealization in 2D
    ///
    /// **Note:** Only the linear elastic model supports plane-stress.
    pub plane_stress: bool,

    /// Holds the out-of-plane thickness (default = 1.0)
    pub thickness: f64,
}

impl Idealization {
    /// Allocates a new instance
    ///
    /// # Default values
    ///
    /// * `2D`: plane-strain with thickness = 1.0
    /// * `3D`: no idealization with thickness = 1.0
    pub fn new(ndim: usize) -> Self {
        Idealization {
            two_dim: ndim == 2,
            plane_stress: false,
            thickness: 1.0,
        }
    }

    /// Returns the space dimension
    pub fn ndim(&self) -> usize {
        if self.two_dim {
            2
        } else {
            3
        }
    }

    /// Returns the symmetric Mandel representation associated with the idealization
    ///
    /// # Results
    ///
    /// * `2D`: [Mandel::Symmetric2D]
    /// * `3D`: [Mandel::Symmetric]
    pub fn mandel(&self) -> Mandel {
        if self.two_dim {
            Mandel::Symmetric2D
        } else {
            Mandel::Symmetric
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
