use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::energy::EnergyCalculationError;
use crate::core::forcefield::parameterization::AnnotationError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::io::error::StructureInputError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load force field parameters: {0}")]
    Parameters(#[from] ParamLoadError),

    #[error("Failed to read '{path}': {source}")]
    Input {
        path: String,
        source: StructureInputError,
    },

    #[error("Annotation failed: {0}")]
    Annotation(#[from] AnnotationError),

    #[error("Chain '{0}' not found in structure")]
    ChainNotFound(char),

    #[error("Energy evaluation failed: {0}")]
    Energy(#[from] EnergyCalculationError),

    #[error("Failed to write structure '{path}': {source}")]
    Output {
        path: String,
        source: StructureInputError,
    },

    #[error("Failed to write report '{path}': {source}")]
    Report { path: String, source: csv::Error },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
