mod file;

use crate::cli::{AnalysisArgs, InputArgs};
use crate::error::{CliError, Result};
use file::PartialAnalysisConfig;
use hotspot::core::forcefield::parameterization::{AnnotationOptions, JoinStrategy};
use hotspot::core::io::naccess::SasaColumn;
use hotspot::engine::config::{self as core_config, AnalysisConfig, DecomposeConfig};
use std::path::PathBuf;

pub use file::PartialConfig;

impl PartialConfig {
    /// Reads the file named by `--config`, or starts from an empty configuration.
    pub fn load(args: &InputArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Builds the library configuration. Command-line flags win over `-S` settings, which
    /// win over the file.
    pub fn merge_with_cli(mut self, args: &InputArgs) -> Result<DecomposeConfig> {
        self.apply_set_values(&args.set_values)?;

        let structure = self.structure.take().unwrap_or_default();
        let forcefield = self.forcefield.take().unwrap_or_default();
        let sasa = self.sasa.take().unwrap_or_default();
        let analysis = self.analysis.take().unwrap_or_default();

        let required = |cli: &Option<PathBuf>, file: Option<PathBuf>, key: &str| {
            cli.clone().or(file).ok_or_else(|| {
                CliError::Config(format!(
                    "A value for '{}' is required either in the config file or via CLI argument.",
                    key
                ))
            })
        };

        let structure_path = required(&args.structure, structure.path, "structure.path")?;
        let annotation_path =
            required(&args.annotations, structure.annotations, "structure.annotations")?;
        let param_path = required(&args.params, forcefield.params, "forcefield.params")?;
        let bound_sasa_path = required(&args.bound_sasa, sasa.bound, "sasa.bound")?;

        let unbound_sasa_paths = if args.unbound_sasa.is_empty() {
            sasa.unbound.unwrap_or_default().into_values().collect()
        } else {
            args.unbound_sasa.clone()
        };

        let sasa_column = match &args.sasa_column {
            Some(value) => value
                .parse::<SasaColumn>()
                .map_err(|e| CliError::Argument(e.to_string()))?,
            None => sasa.column.unwrap_or_default(),
        };

        let mut annotation = AnnotationOptions::default();
        if let Some(default_type) = args.default_type.clone().or(forcefield.default_type) {
            annotation.default_type = default_type;
        }
        annotation.join = if args.positional_join {
            JoinStrategy::Positional
        } else {
            forcefield.join.unwrap_or_default()
        };

        let analysis = merge_analysis(&args.analysis, analysis)?;

        let mut builder = core_config::DecomposeConfigBuilder::new()
            .structure_path(structure_path)
            .annotation_path(annotation_path)
            .param_path(param_path)
            .annotation_options(annotation)
            .bound_sasa_path(bound_sasa_path)
            .sasa_column(sasa_column)
            .analysis(analysis);
        if let Some(columns) = forcefield.columns {
            builder = builder.param_layout(columns.into());
        }
        for path in unbound_sasa_paths {
            builder = builder.unbound_sasa_path(path);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}

fn merge_analysis(args: &AnalysisArgs, file: PartialAnalysisConfig) -> Result<AnalysisConfig> {
    let mut builder = core_config::AnalysisConfigBuilder::new();
    if let Some(chain) = args.chain_x.or(file.chain_x) {
        builder = builder.chain_x(chain);
    }
    if let Some(chain) = args.chain_y.or(file.chain_y) {
        builder = builder.chain_y(chain);
    }
    if let Some(cutoff) = args.contact_cutoff.or(file.contact_cutoff) {
        builder = builder.contact_cutoff(cutoff);
    }
    if let Some(cutoff) = args.energy_cutoff.or(file.energy_cutoff) {
        builder = builder.energy_cutoff(cutoff);
    }
    if let Some(dielectric) = args.dielectric.or(file.dielectric) {
        builder = builder.dielectric(dielectric);
    }
    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Analysis settings from command-line flags alone, for commands without a config file.
pub fn analysis_from_args(args: &AnalysisArgs) -> Result<AnalysisConfig> {
    merge_analysis(args, PartialAnalysisConfig::default())
}
