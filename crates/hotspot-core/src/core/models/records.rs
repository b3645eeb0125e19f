use super::ids::ResidueKey;
use crate::core::forcefield::term::EnergyTerm;

/// Binding free energy contributions of one interface residue, in kcal/mol.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueEnergyRecord {
    pub key: ResidueKey,
    pub residue_name: String,
    pub elec: f64,
    pub vdw: f64,
    /// Change in solvation free energy on binding.
    pub solv: f64,
    pub total: f64,
    /// Whether both bound and unbound surface areas were available.
    pub sasa_known: bool,
}

impl ResidueEnergyRecord {
    pub fn new(
        key: ResidueKey,
        residue_name: &str,
        interaction: EnergyTerm,
        solv: f64,
        sasa_known: bool,
    ) -> Self {
        Self {
            key,
            residue_name: residue_name.to_string(),
            elec: interaction.elec,
            vdw: interaction.vdw,
            solv,
            total: interaction.elec + interaction.vdw + solv,
            sasa_known,
        }
    }

    /// Label in the form used by interface listings, e.g. `GLN A42`.
    pub fn label(&self) -> String {
        format!("{} {}", self.residue_name, self.key)
    }
}

/// Complex-level binding free energy, in kcal/mol.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComplexEnergy {
    pub elec: f64,
    pub vdw: f64,
    pub solv: f64,
    pub total: f64,
}

impl ComplexEnergy {
    pub fn new(interaction: EnergyTerm, solv: f64) -> Self {
        Self {
            elec: interaction.elec,
            vdw: interaction.vdw,
            solv,
            total: interaction.elec + interaction.vdw + solv,
        }
    }
}

/// Result of truncating one residue to alanine.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub key: ResidueKey,
    /// Wild-type one-letter code, chain, number and target, e.g. `KE417A`.
    pub label: String,
    /// ΔG_total(mutant) - ΔG_total(wild type), in kcal/mol.
    pub ddg: f64,
}
