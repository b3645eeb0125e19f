use crate::error::{CliError, Result};
use hotspot::core::forcefield::parameterization::JoinStrategy;
use hotspot::core::forcefield::params::ColumnLayout;
use hotspot::core::io::naccess::SasaColumn;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(super) struct PartialStructureConfig {
    pub(super) path: Option<PathBuf>,
    pub(super) annotations: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub(super) struct PartialColumnLayout {
    pub(super) code: usize,
    pub(super) epsilon: usize,
    pub(super) sigma: usize,
    pub(super) solvation: usize,
}

impl From<PartialColumnLayout> for ColumnLayout {
    fn from(p: PartialColumnLayout) -> Self {
        Self {
            code: p.code,
            epsilon: p.epsilon,
            sigma: p.sigma,
            solvation: p.solvation,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(super) struct PartialForcefieldConfig {
    pub(super) params: Option<PathBuf>,
    pub(super) columns: Option<PartialColumnLayout>,
    pub(super) default_type: Option<String>,
    pub(super) join: Option<JoinStrategy>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(super) struct PartialSasaConfig {
    pub(super) bound: Option<PathBuf>,
    /// Unbound reports keyed by chain id.
    pub(super) unbound: Option<BTreeMap<String, PathBuf>>,
    pub(super) column: Option<SasaColumn>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(super) struct PartialAnalysisConfig {
    pub(super) chain_x: Option<char>,
    pub(super) chain_y: Option<char>,
    pub(super) contact_cutoff: Option<f64>,
    pub(super) energy_cutoff: Option<f64>,
    pub(super) dielectric: Option<f64>,
}

/// Contents of a TOML configuration file; every field may be overridden from the command
/// line.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub(super) structure: Option<PartialStructureConfig>,
    pub(super) forcefield: Option<PartialForcefieldConfig>,
    pub(super) sasa: Option<PartialSasaConfig>,
    pub(super) analysis: Option<PartialAnalysisConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn parse_chain(key: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::Config(format!(
            "Invalid chain id for {}: '{}'. Expected a single character.",
            key, value
        ))),
    }
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub(super) fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "analysis.chain-x" => {
                    self.analysis.get_or_insert_with(Default::default).chain_x =
                        Some(parse_chain(key, value_str)?);
                }
                "analysis.chain-y" => {
                    self.analysis.get_or_insert_with(Default::default).chain_y =
                        Some(parse_chain(key, value_str)?);
                }
                "analysis.contact-cutoff" => {
                    self.analysis.get_or_insert_with(Default::default).contact_cutoff =
                        Some(parse_value(key, value_str, "float")?);
                }
                "analysis.energy-cutoff" => {
                    self.analysis.get_or_insert_with(Default::default).energy_cutoff =
                        Some(parse_value(key, value_str, "float")?);
                }
                "analysis.dielectric" => {
                    self.analysis.get_or_insert_with(Default::default).dielectric =
                        Some(parse_value(key, value_str, "float")?);
                }
                "forcefield.default-type" => {
                    self.forcefield
                        .get_or_insert_with(Default::default)
                        .default_type = Some(value_str.to_string());
                }
                "forcefield.join" => {
                    let join = match value_str {
                        "keyed" => JoinStrategy::Keyed,
                        "positional" => JoinStrategy::Positional,
                        _ => {
                            return Err(CliError::Config(format!(
                                "Invalid value for {}: '{}'. Expected 'keyed' or 'positional'.",
                                key, value_str
                            )));
                        }
                    };
                    self.forcefield.get_or_insert_with(Default::default).join = Some(join);
                }
                "sasa.column" => {
                    let column = value_str
                        .parse::<SasaColumn>()
                        .map_err(|e| CliError::Config(e.to_string()))?;
                    self.sasa.get_or_insert_with(Default::default).column = Some(column);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
