use super::decompose::{InterfaceAnalysis, run_on_system};
use crate::core::io::pdb::PdbFile;
use crate::core::io::report::write_scan_table_to_path;
use crate::core::io::traits::MolecularFile;
use crate::core::models::ids::{ResidueId, ResidueKey};
use crate::core::models::records::MutationRecord;
use crate::core::models::residue::AminoAcidType;
use crate::core::models::system::MolecularSystem;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Atoms an alanine keeps from the residue it replaces.
const ALANINE_ATOMS: [&str; 5] = ["N", "CA", "C", "O", "CB"];

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub wild_type: InterfaceAnalysis,
    /// One record per scanned residue, X-side residues first, each side in key order.
    pub mutations: Vec<MutationRecord>,
}

struct Candidate {
    key: ResidueKey,
    residue_id: ResidueId,
    label: String,
}

fn is_scannable(residue_type: Option<AminoAcidType>) -> bool {
    !matches!(
        residue_type,
        None | Some(AminoAcidType::Glycine | AminoAcidType::Alanine | AminoAcidType::Proline)
    )
}

/// Replaces a residue by alanine in place: every atom not named N, CA, C, O or CB is
/// deleted and the residue is renamed `ALA`.
///
/// Retained atoms keep their charges, types and parameters.
pub fn truncate_to_alanine(
    system: &mut MolecularSystem,
    residue_id: ResidueId,
) -> Result<(), EngineError> {
    let residue = system
        .residue(residue_id)
        .ok_or_else(|| EngineError::Internal("Truncation target is not in the system".into()))?;
    let doomed: Vec<_> = residue
        .atoms()
        .iter()
        .copied()
        .filter(|&id| {
            system
                .atom(id)
                .is_some_and(|atom| !ALANINE_ATOMS.contains(&atom.name.as_str()))
        })
        .collect();
    for atom_id in doomed {
        system.remove_atom(atom_id);
    }
    if let Some(residue) = system.residue_mut(residue_id) {
        residue.rename("ALA");
    }
    Ok(())
}

fn collect_candidates(
    system: &MolecularSystem,
    wild_type: &InterfaceAnalysis,
) -> Vec<Candidate> {
    wild_type
        .interface
        .iter()
        .filter_map(|key| {
            let residue_id = system.find_residue_by_key(key)?;
            let residue = system.residue(residue_id)?;
            if !is_scannable(residue.residue_type) {
                debug!(residue = %key, name = %residue.name, "Skipping residue in alanine scan.");
                return None;
            }
            let one_letter = residue.residue_type?.to_one_letter();
            Some(Candidate {
                key: *key,
                residue_id,
                label: format!("{}{}A", one_letter, key),
            })
        })
        .collect()
}

/// Computational alanine scan of every interface residue.
///
/// The wild type is decomposed first. Each interface residue other than glycine, alanine
/// and proline is then truncated to alanine on a copy of the system and the full analysis
/// is repeated, re-detecting the interface. ΔΔG is the mutant's total minus the wild
/// type's. Surface areas are not recomputed for the mutants.
#[instrument(skip_all, name = "alanine_scan_workflow")]
pub fn run(
    system: &MolecularSystem,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<ScanReport, EngineError> {
    let wild_type = {
        let _phase = reporter.phase("Wild type");
        run_on_system(system, config)?
    };
    let wt_total = wild_type.decomposition.total.total;
    info!(
        "Wild-type ΔG_total = {:.4} kcal/mol over {} interface residue(s).",
        wt_total,
        wild_type.interface.len()
    );

    let candidates = collect_candidates(system, &wild_type);
    let _phase = reporter.phase("Alanine scan");
    reporter.report(Progress::TaskStart {
        total_steps: candidates.len() as u64,
    });

    let scan_one = |candidate: &Candidate| -> Result<MutationRecord, EngineError> {
        let mut mutant = system.clone();
        truncate_to_alanine(&mut mutant, candidate.residue_id)?;
        let analysis = run_on_system(&mutant, config)?;
        let ddg = analysis.decomposition.total.total - wt_total;
        debug!(mutation = %candidate.label, ddg = ddg, "Mutant evaluated.");
        reporter.report(Progress::TaskIncrement);
        Ok(MutationRecord {
            key: candidate.key,
            label: candidate.label.clone(),
            ddg,
        })
    };

    #[cfg(not(feature = "parallel"))]
    let mutations: Result<Vec<_>, _> = candidates.iter().map(scan_one).collect();

    #[cfg(feature = "parallel")]
    let mutations: Result<Vec<_>, _> = candidates.par_iter().map(scan_one).collect();

    let mutations = mutations?;
    reporter.report(Progress::TaskFinish);

    info!("Alanine scan complete: {} mutation(s).", mutations.len());
    Ok(ScanReport {
        wild_type,
        mutations,
    })
}

/// Writes each residue's ΔΔG into the B-factor of all its atoms; residues that were not
/// scanned get 0.0.
pub fn annotate_b_factors(system: &mut MolecularSystem, records: &[MutationRecord]) {
    let ddg_by_key: HashMap<ResidueKey, f64> = records.iter().map(|r| (r.key, r.ddg)).collect();
    let ddg_by_residue: HashMap<ResidueId, f64> = system
        .residue_ids_in_order()
        .into_iter()
        .filter_map(|id| {
            let key = system.residue_key(id)?;
            Some((id, ddg_by_key.get(&key).copied().unwrap_or(0.0)))
        })
        .collect();

    for (_, atom) in system.atoms_iter_mut() {
        atom.b_factor = ddg_by_residue.get(&atom.residue_id).copied().unwrap_or(0.0);
    }
}

pub fn write_scan_report(records: &[MutationRecord], path: &Path) -> Result<(), EngineError> {
    write_scan_table_to_path(path, records).map_err(|source| EngineError::Report {
        path: path.display().to_string(),
        source,
    })?;
    info!("ΔΔG table written to '{}'.", path.display());
    Ok(())
}

/// Writes a copy of `system` whose B-factors hold the ΔΔG of each residue.
pub fn write_annotated_structure(
    system: &MolecularSystem,
    records: &[MutationRecord],
    path: &Path,
) -> Result<(), EngineError> {
    let mut annotated = system.clone();
    annotate_b_factors(&mut annotated, records);
    PdbFile::write_system_to_path(&annotated, path).map_err(|source| EngineError::Output {
        path: path.display().to_string(),
        source,
    })?;
    info!("ΔΔG-annotated structure written to '{}'.", path.display());
    Ok(())
}
