use crate::core::forcefield::energy::{EnergyCalculationError, EnergyCalculator};
use crate::core::forcefield::term::EnergyTerm;
use crate::core::models::ids::{AtomId, ResidueId};
use crate::core::models::system::MolecularSystem;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use std::collections::HashMap;
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Non-bonded energy between two residues, summed over heavy-atom pairs no farther apart
/// than `energy_cutoff`.
pub fn residue_pair_energy(
    system: &MolecularSystem,
    residue_a: ResidueId,
    residue_b: ResidueId,
    energy_cutoff: f64,
    dielectric: f64,
) -> Result<EnergyTerm, EnergyCalculationError> {
    let atoms_a: Vec<AtomId> = system.heavy_atoms_of(residue_a).map(|(id, _)| id).collect();
    let atoms_b: Vec<AtomId> = system.heavy_atoms_of(residue_b).map(|(id, _)| id).collect();
    pair_energy_of_atoms(system, &atoms_a, &atoms_b, energy_cutoff, dielectric)
}

fn pair_energy_of_atoms(
    system: &MolecularSystem,
    atoms_a: &[AtomId],
    atoms_b: &[AtomId],
    energy_cutoff: f64,
    dielectric: f64,
) -> Result<EnergyTerm, EnergyCalculationError> {
    let mut term = EnergyTerm::default();
    for atom_a in atoms_a.iter().filter_map(|&id| system.atom(id)) {
        for atom_b in atoms_b.iter().filter_map(|&id| system.atom(id)) {
            if atom_a.distance_to(atom_b) > energy_cutoff {
                continue;
            }
            term += EnergyCalculator::calculate_pair(atom_a, atom_b, dielectric)?;
        }
    }
    Ok(term)
}

/// Evaluates every (X residue, Y residue) pair once.
///
/// Row `i` holds the energies of `x_residues[i]` with each of `y_residues`, in order. Rows
/// are evaluated in parallel under the `parallel` feature; the collect preserves order.
#[instrument(skip_all, name = "pair_energy_task", fields(rows = x_residues.len(), cols = y_residues.len()))]
pub fn run(
    system: &MolecularSystem,
    x_residues: &[ResidueId],
    y_residues: &[ResidueId],
    config: &AnalysisConfig,
) -> Result<Vec<Vec<EnergyTerm>>, EngineError> {
    let heavy_atoms: HashMap<ResidueId, Vec<AtomId>> = x_residues
        .iter()
        .chain(y_residues)
        .map(|&res_id| {
            (
                res_id,
                system.heavy_atoms_of(res_id).map(|(id, _)| id).collect(),
            )
        })
        .collect();
    let atoms_of = |res_id: &ResidueId| heavy_atoms.get(res_id).map_or(&[][..], |v| v.as_slice());

    let compute_row = |x_id: &ResidueId| -> Result<Vec<EnergyTerm>, EngineError> {
        y_residues
            .iter()
            .map(|y_id| {
                pair_energy_of_atoms(
                    system,
                    atoms_of(x_id),
                    atoms_of(y_id),
                    config.energy_cutoff,
                    config.dielectric,
                )
                .map_err(EngineError::from)
            })
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let matrix = x_residues.iter().map(compute_row).collect();

    #[cfg(feature = "parallel")]
    let matrix = x_residues.par_iter().map(compute_row).collect();

    matrix
}
