use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "hotspot - pairwise decomposition of protein-protein binding free energy into per-residue contributions.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decompose the binding free energy of two chains into per-residue contributions.
    Decompose(DecomposeArgs),
    /// List the interface residues of two chains.
    Interface(InterfaceArgs),
    /// Truncate each interface residue to alanine and report the change in binding energy.
    Scan(ScanArgs),
}

/// Which two chains to analyse, and how.
#[derive(Args, Debug, Default, Clone)]
pub struct AnalysisArgs {
    /// First partner chain; complex totals are summed over its residues.
    #[arg(short = 'x', long, value_name = "CHAIN")]
    pub chain_x: Option<char>,

    /// Second partner chain.
    #[arg(short = 'y', long, value_name = "CHAIN")]
    pub chain_y: Option<char>,

    /// Heavy-atom distance (Å) below which residues are in the interface.
    #[arg(long, value_name = "FLOAT")]
    pub contact_cutoff: Option<f64>,

    /// Atom-pair distance (Å) up to which interactions are summed.
    #[arg(long, value_name = "FLOAT")]
    pub energy_cutoff: Option<f64>,

    /// Relative dielectric constant of the Coulomb term.
    #[arg(long, value_name = "FLOAT")]
    pub dielectric: Option<f64>,
}

/// Input files and overrides shared by the energy commands.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Complex structure (PDB).
    #[arg(short, long, value_name = "PATH")]
    pub structure: Option<PathBuf>,

    /// Per-atom partial charges and atom types (PDBQT).
    #[arg(short, long, value_name = "PATH")]
    pub annotations: Option<PathBuf>,

    /// Atom-type parameter table (`vdwprm` flat file or TOML).
    #[arg(short, long, value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// NACCESS report computed on the complex.
    #[arg(long, value_name = "PATH")]
    pub bound_sasa: Option<PathBuf>,

    /// NACCESS report computed on one isolated partner. Repeat for each chain.
    #[arg(long, value_name = "PATH")]
    pub unbound_sasa: Vec<PathBuf>,

    /// `.rsa` column to read: all-atoms, side-chain, main-chain, non-polar, polar,
    /// or a whitespace token index.
    #[arg(long, value_name = "COLUMN")]
    pub sasa_column: Option<String>,

    /// Atom type used for codes missing from the parameter table.
    #[arg(long, value_name = "CODE")]
    pub default_type: Option<String>,

    /// Match annotation records to atoms by position instead of by identity.
    #[arg(long)]
    pub positional_join: bool,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S analysis.dielectric=4
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `decompose` subcommand.
#[derive(Args, Debug)]
pub struct DecomposeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Path for the per-residue energy table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `interface` subcommand.
#[derive(Args, Debug)]
pub struct InterfaceArgs {
    /// Complex structure (PDB).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub structure: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Path for the ΔΔG table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Also write the structure with each residue's ΔΔG in the B-factor column.
    #[arg(long, value_name = "PATH")]
    pub pdb_output: Option<PathBuf>,
}
