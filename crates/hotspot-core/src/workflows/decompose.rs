use crate::core::forcefield::parameterization::{AnnotationDiagnostics, Annotator, SasaTable};
use crate::core::forcefield::params::VdwParamSet;
use crate::core::io::error::StructureInputError;
use crate::core::io::naccess::read_sasa_path;
use crate::core::io::pdb::PdbFile;
use crate::core::io::pdbqt::read_pdbqt_path;
use crate::core::io::report::write_energy_table_to_path;
use crate::core::io::traits::MolecularFile;
use crate::core::models::system::MolecularSystem;
use crate::engine::config::{AnalysisConfig, DecomposeConfig};
use crate::engine::error::EngineError;
use crate::engine::interface::{InterfaceSet, find_interface};
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks::decomposition::{self, Decomposition};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Interface and energy decomposition of one annotated structure.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceAnalysis {
    pub interface: InterfaceSet,
    pub decomposition: Decomposition,
}

#[derive(Debug, Clone)]
pub struct DecompositionReport {
    /// The annotated structure the analysis ran on.
    pub system: MolecularSystem,
    pub diagnostics: AnnotationDiagnostics,
    pub analysis: InterfaceAnalysis,
}

fn input_error(path: &Path) -> impl FnOnce(StructureInputError) -> EngineError + '_ {
    move |source| EngineError::Input {
        path: path.display().to_string(),
        source,
    }
}

/// Loads and annotates the structure described by `config`.
///
/// The parameter table is loaded before anything else so that a missing or malformed
/// table aborts the run without touching the structure inputs.
#[instrument(skip_all, name = "load_annotated_system")]
pub fn load_annotated_system(
    config: &DecomposeConfig,
) -> Result<(MolecularSystem, AnnotationDiagnostics), EngineError> {
    let params_cfg = &config.parameters;
    let params = match &params_cfg.layout {
        Some(layout) => VdwParamSet::load_with_layout(&params_cfg.param_path, layout)?,
        None => VdwParamSet::load(&params_cfg.param_path)?,
    };
    info!(types = params.len(), "Loaded force field parameters.");

    let structure_path = &config.input.structure_path;
    let (mut system, _metadata) =
        PdbFile::read_from_path(structure_path).map_err(input_error(structure_path))?;
    info!(
        atoms = system.atom_count(),
        "Read structure from '{}'.",
        structure_path.display()
    );

    let annotation_path = &config.input.annotation_path;
    let annotations = read_pdbqt_path(annotation_path).map_err(input_error(annotation_path))?;

    let bound_path = &config.sasa.bound_path;
    let bound_sasa =
        read_sasa_path(bound_path, config.sasa.column).map_err(input_error(bound_path))?;
    let mut unbound_sasa = SasaTable::new();
    for path in &config.sasa.unbound_paths {
        unbound_sasa.extend(read_sasa_path(path, config.sasa.column).map_err(input_error(path))?);
    }

    let annotator = Annotator::new(&params, params_cfg.annotation.clone());
    let diagnostics = annotator.annotate(&mut system, &annotations, &bound_sasa, &unbound_sasa)?;
    Ok((system, diagnostics))
}

/// Detects the interface of an annotated structure and decomposes its binding energy.
#[instrument(skip_all, name = "interface_analysis", fields(x = %config.chain_x, y = %config.chain_y))]
pub fn run_on_system(
    system: &MolecularSystem,
    config: &AnalysisConfig,
) -> Result<InterfaceAnalysis, EngineError> {
    let interface = find_interface(system, config.chain_x, config.chain_y, config.contact_cutoff)?;
    if interface.is_empty() {
        warn!(
            "No interface residues within {} Å between chains {} and {}.",
            config.contact_cutoff, config.chain_x, config.chain_y
        );
    }
    let decomposition = decomposition::run(system, &interface, config)?;
    Ok(InterfaceAnalysis {
        interface,
        decomposition,
    })
}

#[instrument(skip_all, name = "decompose_workflow")]
pub fn run(
    config: &DecomposeConfig,
    reporter: &ProgressReporter,
) -> Result<DecompositionReport, EngineError> {
    let (system, diagnostics) = {
        let _phase = reporter.phase("Preparation");
        load_annotated_system(config)?
    };

    let analysis = {
        let _phase = reporter.phase("Decomposition");
        run_on_system(&system, &config.analysis)?
    };

    let total = &analysis.decomposition.total;
    info!(
        "Workflow complete. {} interface residue(s), ΔG_total = {:.4} kcal/mol.",
        analysis.interface.len(),
        total.total
    );
    Ok(DecompositionReport {
        system,
        diagnostics,
        analysis,
    })
}

/// Writes the per-residue table of `analysis`, X residues first, with its total row.
pub fn write_energy_report(
    analysis: &InterfaceAnalysis,
    config: &AnalysisConfig,
    path: &Path,
) -> Result<(), EngineError> {
    let records: Vec<_> = analysis.decomposition.records().cloned().collect();
    write_energy_table_to_path(
        path,
        &records,
        &analysis.decomposition.total,
        (config.chain_x, config.chain_y),
    )
    .map_err(|source| EngineError::Report {
        path: path.display().to_string(),
        source,
    })?;
    info!("Energy table written to '{}'.", path.display());
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::engine::config::{AnalysisConfigBuilder, DecomposeConfig, DecomposeConfigBuilder};
    use std::fs;
    use std::path::Path;

    pub const PDB: &str = "\
ATOM      1  N   LYS A   1       0.000   0.000   0.000  1.00 10.00           N
ATOM      2  CA  LYS A   1       1.450   0.000   0.000  1.00 10.00           C
ATOM      3  CB  LYS A   1       2.000   1.400   0.000  1.00 10.00           C
ATOM      4  NZ  LYS A   1       3.000   2.500   0.000  1.00 10.00           N
ATOM      5  HZ1 LYS A   1       3.500   3.300   0.000  1.00 10.00           H
ATOM      6  CA  GLY A   2      -2.000   0.000   0.000  1.00 10.00           C
ATOM      7  CA  SER A  30      40.000   0.000   0.000  1.00 10.00           C
TER
ATOM      8  CA  ASP E   5       5.500   3.000   0.000  1.00 10.00           C
ATOM      9  OD1 ASP E   5       6.000   5.000   0.000  1.00 10.00           O
ATOM     10  CA  ALA E   6       1.000  -4.500   0.000  1.00 10.00           C
TER
END
";

    pub const PDBQT: &str = "\
ATOM      1  N   LYS A   1       0.000   0.000   0.000  1.00 10.00    -0.300 N
ATOM      2  CA  LYS A   1       1.450   0.000   0.000  1.00 10.00     0.100 C
ATOM      3  CB  LYS A   1       2.000   1.400   0.000  1.00 10.00     0.050 C
ATOM      4  NZ  LYS A   1       3.000   2.500   0.000  1.00 10.00     0.800 N
ATOM      5  HZ1 LYS A   1       3.500   3.300   0.000  1.00 10.00     0.350 HD
ATOM      6  CA  GLY A   2      -2.000   0.000   0.000  1.00 10.00     0.100 C
ATOM      7  CA  SER A  30      40.000   0.000   0.000  1.00 10.00     0.100 C
ATOM      8  CA  ASP E   5       5.500   3.000   0.000  1.00 10.00     0.100 C
ATOM      9  OD1 ASP E   5       6.000   5.000   0.000  1.00 10.00    -0.800 OA
ATOM     10  CA  ALA E   6       1.000  -4.500   0.000  1.00 10.00     0.100 C
";

    pub const VDWPRM: &str = "\
# code  epsilon  sigma  mass  solvation
C   0.1500  4.0000  12.011   0.0120
N   0.1600  3.2500  14.007  -0.0600
O   0.2100  3.0000  15.999  -0.0800
OA  0.2000  3.0000  15.999  -0.0800
HD  0.0200  1.0000   1.008   0.0000
";

    pub const BOUND_RSA: &str = "\
RES LYS A   1    80.00  40.0  60.00  40.0  20.00  40.0  50.00  40.0  30.00  40.0
RES GLY A   2    50.00  40.0  10.00  40.0  40.00  40.0  30.00  40.0  20.00  40.0
RES SER A  30    90.00  40.0  50.00  40.0  40.00  40.0  60.00  40.0  30.00  40.0
RES ASP E   5    70.00  40.0  50.00  40.0  20.00  40.0  20.00  40.0  50.00  40.0
RES ALA E   6    60.00  40.0  30.00  40.0  30.00  40.0  40.00  40.0  20.00  40.0
";

    pub const UNBOUND_A_RSA: &str = "\
RES LYS A   1   150.00  40.0 120.00  40.0  30.00  40.0 100.00  40.0  50.00  40.0
RES GLY A   2    70.00  40.0  10.00  40.0  60.00  40.0  50.00  40.0  20.00  40.0
RES SER A  30    90.00  40.0  50.00  40.0  40.00  40.0  60.00  40.0  30.00  40.0
";

    pub const UNBOUND_E_RSA: &str = "\
RES ASP E   5   120.00  40.0  90.00  40.0  30.00  40.0  40.00  40.0  80.00  40.0
RES ALA E   6    60.00  40.0  30.00  40.0  30.00  40.0  40.00  40.0  20.00  40.0
";

    /// Writes the fixture inputs into `dir` and returns a configuration pointing at them.
    pub fn write_inputs(dir: &Path) -> DecomposeConfig {
        let files = [
            ("complex.pdb", PDB),
            ("complex.pdbqt", PDBQT),
            ("vdwprm", VDWPRM),
            ("complex.rsa", BOUND_RSA),
            ("chain_a.rsa", UNBOUND_A_RSA),
            ("chain_e.rsa", UNBOUND_E_RSA),
        ];
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
        DecomposeConfigBuilder::new()
            .structure_path(dir.join("complex.pdb"))
            .annotation_path(dir.join("complex.pdbqt"))
            .param_path(dir.join("vdwprm"))
            .bound_sasa_path(dir.join("complex.rsa"))
            .unbound_sasa_path(dir.join("chain_a.rsa"))
            .unbound_sasa_path(dir.join("chain_e.rsa"))
            .analysis(AnalysisConfigBuilder::new().chains('A', 'E').build().unwrap())
            .build()
            .unwrap()
    }
}
