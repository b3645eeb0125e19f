use super::pair_energy;
use crate::core::forcefield::solvation::delta_solvation;
use crate::core::forcefield::term::EnergyTerm;
use crate::core::models::ids::{ResidueId, ResidueKey};
use crate::core::models::records::{ComplexEnergy, ResidueEnergyRecord};
use crate::core::models::system::MolecularSystem;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::interface::InterfaceSet;
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

const SIDE_MISMATCH_TOLERANCE: f64 = 1e-6;

/// Per-residue contributions on both sides of an interface and the complex total.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub x_records: Vec<ResidueEnergyRecord>,
    pub y_records: Vec<ResidueEnergyRecord>,
    pub total: ComplexEnergy,
}

impl Decomposition {
    /// Records of both sides, X residues first.
    pub fn records(&self) -> impl Iterator<Item = &ResidueEnergyRecord> {
        self.x_records.iter().chain(self.y_records.iter())
    }

    pub fn record(&self, key: &ResidueKey) -> Option<&ResidueEnergyRecord> {
        self.records().find(|r| &r.key == key)
    }
}

fn resolve(
    system: &MolecularSystem,
    keys: &BTreeSet<ResidueKey>,
) -> Result<Vec<(ResidueKey, ResidueId)>, EngineError> {
    keys.iter()
        .map(|key| {
            system
                .find_residue_by_key(key)
                .map(|id| (*key, id))
                .ok_or_else(|| {
                    EngineError::Internal(format!("Interface residue {} is not in the system", key))
                })
        })
        .collect()
}

fn build_record(
    system: &MolecularSystem,
    key: ResidueKey,
    res_id: ResidueId,
    interaction: EnergyTerm,
) -> Result<ResidueEnergyRecord, EngineError> {
    let residue = system
        .residue(res_id)
        .ok_or_else(|| EngineError::Internal(format!("Residue {} vanished during analysis", key)))?;
    let solv = delta_solvation(system, res_id)?;
    Ok(ResidueEnergyRecord::new(
        key,
        &residue.name,
        interaction,
        solv,
        residue.sasa.is_complete(),
    ))
}

/// Decomposes the binding free energy over the residues of a detected interface.
///
/// Every (X, Y) residue pair is evaluated once; its term is credited to the X residue's
/// row sum and the Y residue's column sum. Each record also carries the residue's change
/// in solvation on binding.
///
/// # Return
///
/// The complex total takes its interaction terms from the X side and its solvation term
/// from both sides.
#[instrument(skip_all, name = "decomposition_task")]
pub fn run(
    system: &MolecularSystem,
    interface: &InterfaceSet,
    config: &AnalysisConfig,
) -> Result<Decomposition, EngineError> {
    let x_residues = resolve(system, &interface.x)?;
    let y_residues = resolve(system, &interface.y)?;

    let x_ids: Vec<ResidueId> = x_residues.iter().map(|(_, id)| *id).collect();
    let y_ids: Vec<ResidueId> = y_residues.iter().map(|(_, id)| *id).collect();
    let matrix = pair_energy::run(system, &x_ids, &y_ids, config)?;

    let row_sums: Vec<EnergyTerm> = matrix.iter().map(|row| row.iter().copied().sum()).collect();
    let mut column_sums = vec![EnergyTerm::default(); y_ids.len()];
    for row in &matrix {
        for (sum, term) in column_sums.iter_mut().zip(row) {
            *sum += *term;
        }
    }

    let x_records = x_residues
        .into_iter()
        .zip(row_sums)
        .map(|((key, id), term)| build_record(system, key, id, term))
        .collect::<Result<Vec<_>, _>>()?;
    let y_records = y_residues
        .into_iter()
        .zip(column_sums)
        .map(|((key, id), term)| build_record(system, key, id, term))
        .collect::<Result<Vec<_>, _>>()?;

    let x_interaction: EnergyTerm = x_records
        .iter()
        .map(|r| EnergyTerm::new(r.elec, r.vdw))
        .sum();
    let y_interaction: EnergyTerm = y_records
        .iter()
        .map(|r| EnergyTerm::new(r.elec, r.vdw))
        .sum();
    let mismatch = (x_interaction.total() - y_interaction.total()).abs();
    if mismatch > SIDE_MISMATCH_TOLERANCE {
        warn!(
            x_side = x_interaction.total(),
            y_side = y_interaction.total(),
            "Interaction sums of the two partners disagree."
        );
    }

    let solv: f64 = x_records.iter().chain(&y_records).map(|r| r.solv).sum();
    let total = ComplexEnergy::new(x_interaction, solv);
    debug!(
        elec = total.elec,
        vdw = total.vdw,
        solv = total.solv,
        total = total.total,
        "Decomposition complete."
    );

    Ok(Decomposition {
        x_records,
        y_records,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::AtomTypeParameters;
    use crate::core::models::atom::Atom;
    use crate::core::models::residue::ResidueSasa;
    use crate::engine::config::AnalysisConfigBuilder;
    use crate::engine::interface::find_interface;
    use nalgebra::Point3;
    use std::sync::Arc;

    fn params(solvation: f64) -> Arc<AtomTypeParameters> {
        Arc::new(AtomTypeParameters {
            code: "C".to_string(),
            epsilon: 0.1,
            sigma: 3.5,
            solvation,
        })
    }

    fn add_residue(
        system: &mut MolecularSystem,
        chain: char,
        number: isize,
        name: &str,
        atoms: &[(&str, [f64; 3], f64)],
        sasa: ResidueSasa,
    ) {
        let chain_id = system.add_chain(chain);
        let res_id = system
            .add_residue(chain_id, number, None, name, false)
            .unwrap();
        for (atom_name, p, q) in atoms {
            let mut atom = Atom::new(atom_name, res_id, Point3::new(p[0], p[1], p[2]));
            atom.partial_charge = Some(*q);
            atom.params = Some(params(0.01));
            system.add_atom_to_residue(res_id, atom).unwrap();
        }
        system.residue_mut(res_id).unwrap().sasa = sasa;
    }

    fn sasa(bound: f64, unbound: f64) -> ResidueSasa {
        ResidueSasa {
            bound: Some(bound),
            unbound: Some(unbound),
        }
    }

    fn complex() -> MolecularSystem {
        let mut system = MolecularSystem::new();
        add_residue(
            &mut system,
            'A',
            1,
            "LYS",
            &[("CE", [0.0, 0.0, 0.0], 0.2), ("NZ", [1.4, 0.0, 0.0], 0.8)],
            sasa(10.0, 60.0),
        );
        add_residue(
            &mut system,
            'A',
            2,
            "SER",
            &[("OG", [0.0, 4.0, 0.0], -0.4)],
            sasa(20.0, 20.0),
        );
        add_residue(
            &mut system,
            'E',
            5,
            "ASP",
            &[("OD1", [4.5, 0.5, 0.0], -0.8), ("OD2", [4.5, -0.8, 0.5], -0.8)],
            sasa(5.0, 50.0),
        );
        add_residue(
            &mut system,
            'E',
            6,
            "GLU",
            &[("OE1", [3.0, 5.5, 0.0], -0.5)],
            ResidueSasa::default(),
        );
        system
    }

    fn config() -> AnalysisConfig {
        AnalysisConfigBuilder::new().chains('A', 'E').build().unwrap()
    }

    fn decompose(system: &MolecularSystem) -> Decomposition {
        let interface = find_interface(system, 'A', 'E', 6.0).unwrap();
        run(system, &interface, &config()).unwrap()
    }

    #[test]
    fn side_sums_agree() {
        let system = complex();
        let result = decompose(&system);
        let x_elec: f64 = result.x_records.iter().map(|r| r.elec).sum();
        let y_elec: f64 = result.y_records.iter().map(|r| r.elec).sum();
        let x_vdw: f64 = result.x_records.iter().map(|r| r.vdw).sum();
        let y_vdw: f64 = result.y_records.iter().map(|r| r.vdw).sum();
        assert!((x_elec - y_elec).abs() < 1e-9);
        assert!((x_vdw - y_vdw).abs() < 1e-9);
        assert!(x_elec < 0.0);
    }

    #[test]
    fn total_uses_x_side_interactions_and_all_solvation() {
        let system = complex();
        let result = decompose(&system);
        let x_elec: f64 = result.x_records.iter().map(|r| r.elec).sum();
        let solv: f64 = result.records().map(|r| r.solv).sum();
        assert_eq!(result.total.elec, x_elec);
        assert!((result.total.solv - solv).abs() < 1e-12);
        assert!(
            (result.total.total - (result.total.elec + result.total.vdw + result.total.solv)).abs()
                < 1e-12
        );
    }

    #[test]
    fn records_follow_key_order_and_carry_solvation() {
        let system = complex();
        let result = decompose(&system);
        let x_keys: Vec<_> = result.x_records.iter().map(|r| r.key).collect();
        assert_eq!(
            x_keys,
            vec![ResidueKey::new('A', 1, None), ResidueKey::new('A', 2, None)]
        );

        let lys = result.record(&ResidueKey::new('A', 1, None)).unwrap();
        assert_eq!(lys.residue_name, "LYS");
        assert!((lys.solv - 0.01 * (10.0 - 60.0)).abs() < 1e-12);
        assert!(lys.sasa_known);

        let ser = result.record(&ResidueKey::new('A', 2, None)).unwrap();
        assert_eq!(ser.solv, 0.0);
    }

    #[test]
    fn residue_without_sasa_is_flagged() {
        let system = complex();
        let result = decompose(&system);
        let glu = result.record(&ResidueKey::new('E', 6, None)).unwrap();
        assert!(!glu.sasa_known);
        assert_eq!(glu.solv, 0.0);
    }

    #[test]
    fn empty_interface_yields_zero_total() {
        let system = complex();
        let result = run(&system, &InterfaceSet::default(), &config()).unwrap();
        assert!(result.x_records.is_empty());
        assert!(result.y_records.is_empty());
        assert_eq!(result.total, ComplexEnergy::default());
    }

    #[test]
    fn unknown_interface_residue_is_an_internal_error() {
        let system = complex();
        let mut interface = InterfaceSet::default();
        interface.x.insert(ResidueKey::new('A', 99, None));
        assert!(matches!(
            run(&system, &interface, &config()),
            Err(EngineError::Internal(_))
        ));
    }
}
