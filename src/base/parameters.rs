use serde::{Deserialize, Serialize};

/// Defines the isotropic hardening law for the yield stress
///
/// The yield stress is a function of the cumulated (equivalent) plastic
/// strain p:
///
/// ```text
/// Linear:  σy(p) = z_ini + hh p
/// Voce:    σy(p) = z_ini + (sig_u - z_ini) (1 - exp(-bb p))
/// ```
///
/// where `z_ini` is the initial yield stress held by the material parameters.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum Hardening {
    /// Linear hardening with constant modulus H
    Linear {
        /// Hardening modulus H
        hh: f64,
    },

    /// Voce exponential saturation hardening
    Voce {
        /// Saturation (ultimate) yield stress
        sig_u: f64,

        /// Saturation rate coefficient
        bb: f64,
    },
}

impl Hardening {
    /// Evaluates the yield stress σy(p)
    pub fn yield_stress(&self, z_ini: f64, p: f64) -> f64 {
        match self {
            Hardening::Linear { hh } => z_ini + hh * p,
            Hardening::Voce { sig_u, bb } => z_ini + (sig_u - z_ini) * (1.0 - f64::exp(-bb * p)),
        }
    }

    /// Evaluates the hardening modulus H(p) = dσy/dp
    pub fn modulus(&self, z_ini: f64, p: f64) -> f64 {
        match self {
            Hardening::Linear { hh } => *hh,
            Hardening::Voce { sig_u, bb } => bb * (sig_u - z_ini) * f64::exp(-bb * p),
        }
    }
}

/// Holds parameters for stress-strain relations (material models)
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum StressStrain {
    /// Linear elastic model (small strain)
    LinearElastic {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },

    /// von Mises plasticity model (small strain)
    VonMises {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,

        /// Initial size of the yield surface (initial yield stress)
        z_ini: f64,

        /// Isotropic hardening law
        hardening: Hardening,
    },

    /// Saint Venant-Kirchhoff hyperelastic model (finite strain)
    SaintVenantKirchhoff {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },

    /// Compressible neo-Hookean hyperelastic model (finite strain)
    NeoHookean {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },

    /// von Mises plasticity model at finite strain
    ///
    /// Multiplicative elastic-plastic decomposition with logarithmic
    /// (Hencky) elastic strain.
    FiniteStrainVonMises {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,

        /// Initial size of the yield surface (initial yield stress)
        z_ini: f64,

        /// Isotropic hardening law
        hardening: Hardening,
    },
}

impl StressStrain {
    /// Returns the number of internal variables
    pub fn n_int_var(&self) -> usize {
        match self {
            StressStrain::LinearElastic { .. } => 0,
            StressStrain::VonMises { .. } => 1,
            StressStrain::SaintVenantKirchhoff { .. } => 0,
            StressStrain::NeoHookean { .. } => 0,
            StressStrain::FiniteStrainVonMises { .. } => 1,
        }
    }

    /// Indicates a finite-strain (deformation-gradient driven) model
    pub fn finite_strain(&self) -> bool {
        match self {
            StressStrain::LinearElastic { .. } => false,
            StressStrain::VonMises { .. } => false,
            StressStrain::SaintVenantKirchhoff { .. } => true,
            StressStrain::NeoHookean { .. } => true,
            StressStrain::FiniteStrainVonMises { .. } => true,
        }
    }
}

/// Holds parameters for solid elements
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamSolid {
    /// Intrinsic (real) density
    pub density: f64,

    /// Parameters for the stress-strain model
    pub stress_strain: StressStrain,

    /// Number of integration (Gauss) points
    pub ngauss: Option<usize>,
}

impl ParamSolid {
    /// Returns the number of internal variables
    pub fn n_int_var(&self) -> usize {
        self.stress_strain.n_int_var()
    }

    /// Returns a sample of parameters for the linear elastic model
    pub fn sample_linear_elastic() -> Self {
        ParamSolid {
            density: 1.0,
            stress_strain: StressStrain::LinearElastic {
                young: 1500.0,
                poisson: 0.25,
            },
            ngauss: None,
        }
    }

    /// Returns a sample of parameters for the von Mises model with linear hardening
    pub fn sample_von_mises() -> Self {
        ParamSolid {
            density: 1.0,
            stress_strain: StressStrain::VonMises {
                young: 1500.0,
                poisson: 0.25,
                z_ini: 9.0,
                hardening: Hardening::Linear { hh: 800.0 },
            },
            ngauss: None,
        }
    }

    /// Returns a sample of parameters for the von Mises model with Voce hardening
    ///
    /// These values correspond to an aluminum-like metal with exponential
    /// saturation of the yield stress.
    pub fn sample_von_mises_voce() -> Self {
        ParamSolid {
            density: 1.0,
            stress_strain: StressStrain::VonMises {
                young: 70_000.0,
                poisson: 0.3,
                z_ini: 350.0,
                hardening: Hardening::Voce {
                    sig_u: 500.0,
                    bb: 1000.0,
                },
            },
            ngauss: None,
        }
    }

    /// Returns a sample of parameters for the Saint Venant-Kirchhoff model
    pub fn sample_saint_venant_kirchhoff() -> Self {
        ParamSolid {
            density: 1.0,
            stress_strain: StressStrain::SaintVenantKirchhoff {
                young: 200_000.0,
                poisson: 0.3,
            },
            ngauss: None,
        }
    }

    /// Returns a sample of parameters for the neo-Hookean model
    pub fn sample_neo_hookean() -> Self {
        ParamSolid {
            density: 1.0,
            stress_strain: StressStrain::NeoHookean {
                young: 10_000.0,
                poisson: 0.25,
            },
            ngauss: None,
        }
    }

    /// Returns a sample of parameters for the finite-strain von Mises model
    pub fn sample_finite_strain_von_mises() -> Self {
        ParamSolid {
            density: 1.0,
            stress_strain: StressStrain::FiniteStrainVonMises {
                young: 70_000.0,
                poisson: 0.3,
                z_ini: 350.0,
                hardening: Hardening::Voce {
                    sig_u: 500.0,
                    bb: 1000.0,
                },
            },
            ngauss: None,
        }
    }
}

/// Converts (Young, Poisson) to the Lamé parameters (λ, μ)
pub fn calc_lame(young: f64, poisson: f64) -> (f64, f64) {
    let lambda = young * poisson / ((1.0 + poisson) * (1.0 - 2.0 * poisson));
    let mu = young / (2.0 * (1.0 + poisson));
    (lambda, mu)
}

/// Converts (Young, Poisson) to the bulk and shear moduli (K, G)
pub fn calc_bulk_shear(young: f64, poisson: f64) -> (f64, f64) {
    let kk = young / (3.0 * (1.0 - 2.0 * poisson));
    let gg = young / (2.0 * (1.0 + poisson));
    (kk, gg)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
