use crate::cli::InterfaceArgs;
use crate::config::analysis_from_args;
use crate::error::{CliError, Result};
use hotspot::core::io::{pdb::PdbFile, traits::MolecularFile};
use hotspot::engine::interface::{InterfaceSet, find_interface};
use tracing::info;

pub fn run(args: InterfaceArgs) -> Result<()> {
    let analysis = analysis_from_args(&args.analysis)?;

    info!("Loading input structure from {:?}", &args.structure);
    let (system, _metadata) =
        PdbFile::read_from_path(&args.structure).map_err(|e| CliError::FileParsing {
            path: args.structure.clone(),
            source: e.into(),
        })?;

    let interface = find_interface(
        &system,
        analysis.chain_x,
        analysis.chain_y,
        analysis.contact_cutoff,
    )?;
    print!("{}", format_listing(&interface, &system, analysis.contact_cutoff));
    Ok(())
}

fn format_listing(
    interface: &InterfaceSet,
    system: &hotspot::core::models::system::MolecularSystem,
    cutoff: f64,
) -> String {
    let mut out = format!(
        "{} interface residue(s) within {} Å ({} + {}):\n",
        interface.len(),
        cutoff,
        interface.x.len(),
        interface.y.len()
    );
    for label in interface.labels(system) {
        out.push_str(&label);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const PDB: &str = "\
ATOM      1  CB  SER A   1       0.000   0.000   0.000  1.00 10.00           C
ATOM      2  CB  THR E   1       5.900   0.000   0.000  1.00 10.00           C
END
";

    fn listing(cutoff: &str) -> String {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pair.pdb");
        fs::write(&path, PDB).unwrap();
        let argv = [
            "hotspot",
            "interface",
            "-s",
            path.to_str().unwrap(),
            "-x",
            "A",
            "-y",
            "E",
            "--contact-cutoff",
            cutoff,
        ];
        let Commands::Interface(args) = Cli::parse_from(argv).command else {
            panic!("Expected 'interface' subcommand");
        };
        let analysis = analysis_from_args(&args.analysis).unwrap();
        let (system, _) = PdbFile::read_from_path(&args.structure).unwrap();
        let interface =
            find_interface(&system, analysis.chain_x, analysis.chain_y, analysis.contact_cutoff)
                .unwrap();
        format_listing(&interface, &system, analysis.contact_cutoff)
    }

    #[test]
    fn lists_residues_within_cutoff() {
        let text = listing("6.0");
        assert!(text.starts_with("2 interface residue(s)"));
        assert!(text.contains("SER A1\n"));
        assert!(text.contains("THR E1\n"));
    }

    #[test]
    fn tighter_cutoff_finds_nothing() {
        assert!(listing("5.0").starts_with("0 interface residue(s)"));
    }

    #[test]
    fn missing_chains_are_a_configuration_error() {
        let args = crate::cli::AnalysisArgs::default();
        assert!(matches!(
            analysis_from_args(&args),
            Err(CliError::Config(_))
        ));
    }
}
