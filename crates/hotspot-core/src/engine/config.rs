use crate::core::forcefield::parameterization::AnnotationOptions;
use crate::core::forcefield::params::ColumnLayout;
use crate::core::io::naccess::SasaColumn;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CONTACT_CUTOFF: f64 = 6.0;
pub const DEFAULT_ENERGY_CUTOFF: f64 = 8.0;
pub const DEFAULT_DIELECTRIC: f64 = 80.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Parameter '{name}' must be a positive finite number (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("Partner chains must differ (both are '{0}')")]
    IdenticalChains(char),
}

/// Parameters of one interface decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// First partner chain. Complex-level interaction terms are summed over its residues.
    pub chain_x: char,
    pub chain_y: char,
    /// Heavy atoms closer than this (Å) put their residues in the interface.
    pub contact_cutoff: f64,
    /// Atom pairs at or within this distance (Å) contribute to residue pair energies.
    pub energy_cutoff: f64,
    /// Relative dielectric constant of the Coulomb term.
    pub dielectric: f64,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    chain_x: Option<char>,
    chain_y: Option<char>,
    contact_cutoff: Option<f64>,
    energy_cutoff: Option<f64>,
    dielectric: Option<f64>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chains(mut self, chain_x: char, chain_y: char) -> Self {
        self.chain_x = Some(chain_x);
        self.chain_y = Some(chain_y);
        self
    }
    pub fn chain_x(mut self, chain: char) -> Self {
        self.chain_x = Some(chain);
        self
    }
    pub fn chain_y(mut self, chain: char) -> Self {
        self.chain_y = Some(chain);
        self
    }
    pub fn contact_cutoff(mut self, cutoff: f64) -> Self {
        self.contact_cutoff = Some(cutoff);
        self
    }
    pub fn energy_cutoff(mut self, cutoff: f64) -> Self {
        self.energy_cutoff = Some(cutoff);
        self
    }
    pub fn dielectric(mut self, dielectric: f64) -> Self {
        self.dielectric = Some(dielectric);
        self
    }

    /// Builds the configuration. Cutoffs and dielectric fall back to 6.0 Å, 8.0 Å and 80.
    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let chain_x = self.chain_x.ok_or(ConfigError::MissingParameter("chain_x"))?;
        let chain_y = self.chain_y.ok_or(ConfigError::MissingParameter("chain_y"))?;
        if chain_x == chain_y {
            return Err(ConfigError::IdenticalChains(chain_x));
        }

        let positive = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(value)
            } else {
                Err(ConfigError::NonPositive { name, value })
            }
        };

        Ok(AnalysisConfig {
            chain_x,
            chain_y,
            contact_cutoff: positive(
                "contact_cutoff",
                self.contact_cutoff.unwrap_or(DEFAULT_CONTACT_CUTOFF),
            )?,
            energy_cutoff: positive(
                "energy_cutoff",
                self.energy_cutoff.unwrap_or(DEFAULT_ENERGY_CUTOFF),
            )?,
            dielectric: positive("dielectric", self.dielectric.unwrap_or(DEFAULT_DIELECTRIC))?,
        })
    }
}

/// Where the structure and its per-atom annotations come from.
#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub structure_path: PathBuf,
    /// PDBQT file carrying partial charges and atom type codes.
    pub annotation_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterConfig {
    pub param_path: PathBuf,
    /// Column layout of a flat parameter table; `None` uses the `vdwprm` layout.
    pub layout: Option<ColumnLayout>,
    pub annotation: AnnotationOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SasaConfig {
    /// Surface areas computed on the complex.
    pub bound_path: PathBuf,
    /// Surface areas computed on each partner in isolation. Tables are merged in order.
    pub unbound_paths: Vec<PathBuf>,
    pub column: SasaColumn,
}

/// Everything needed to decompose the binding energy of a complex from files.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposeConfig {
    pub input: InputConfig,
    pub parameters: ParameterConfig,
    pub sasa: SasaConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Default)]
pub struct DecomposeConfigBuilder {
    structure_path: Option<PathBuf>,
    annotation_path: Option<PathBuf>,
    param_path: Option<PathBuf>,
    layout: Option<ColumnLayout>,
    annotation: Option<AnnotationOptions>,
    bound_sasa_path: Option<PathBuf>,
    unbound_sasa_paths: Vec<PathBuf>,
    sasa_column: Option<SasaColumn>,
    analysis: Option<AnalysisConfig>,
}

impl DecomposeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.structure_path = Some(path.into());
        self
    }
    pub fn annotation_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.annotation_path = Some(path.into());
        self
    }
    pub fn param_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.param_path = Some(path.into());
        self
    }
    pub fn param_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = Some(layout);
        self
    }
    pub fn annotation_options(mut self, options: AnnotationOptions) -> Self {
        self.annotation = Some(options);
        self
    }
    pub fn bound_sasa_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bound_sasa_path = Some(path.into());
        self
    }
    pub fn unbound_sasa_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.unbound_sasa_paths.push(path.into());
        self
    }
    pub fn sasa_column(mut self, column: SasaColumn) -> Self {
        self.sasa_column = Some(column);
        self
    }
    pub fn analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn build(self) -> Result<DecomposeConfig, ConfigError> {
        let input = InputConfig {
            structure_path: self
                .structure_path
                .ok_or(ConfigError::MissingParameter("structure_path"))?,
            annotation_path: self
                .annotation_path
                .ok_or(ConfigError::MissingParameter("annotation_path"))?,
        };
        let parameters = ParameterConfig {
            param_path: self
                .param_path
                .ok_or(ConfigError::MissingParameter("param_path"))?,
            layout: self.layout,
            annotation: self.annotation.unwrap_or_default(),
        };
        if self.unbound_sasa_paths.is_empty() {
            return Err(ConfigError::MissingParameter("unbound_sasa_paths"));
        }
        let sasa = SasaConfig {
            bound_path: self
                .bound_sasa_path
                .ok_or(ConfigError::MissingParameter("bound_sasa_path"))?,
            unbound_paths: self.unbound_sasa_paths,
            column: self.sasa_column.unwrap_or_default(),
        };
        Ok(DecomposeConfig {
            input,
            parameters,
            sasa,
            analysis: self
                .analysis
                .ok_or(ConfigError::MissingParameter("analysis"))?,
        })
    }
}
