use super::energy::EnergyCalculationError;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::BindingState;
use crate::core::models::system::MolecularSystem;

/// Solvation free energy of a residue in one binding state, in kcal/mol.
///
/// The mean heavy-atom solvation coefficient is scaled by the residue's accessible area
/// in that state: `(Σ coeff) × SASA / n_heavy`. A residue without heavy atoms, or whose
/// area is zero or unknown, contributes nothing.
pub fn solvation_energy(
    system: &MolecularSystem,
    residue_id: ResidueId,
    state: BindingState,
) -> Result<f64, EnergyCalculationError> {
    let Some(residue) = system.residue(residue_id) else {
        return Ok(0.0);
    };
    let sasa = residue.sasa.get(state).unwrap_or(0.0);
    if sasa == 0.0 {
        return Ok(0.0);
    }

    let mut coeff_sum = 0.0;
    let mut n_heavy = 0usize;
    for (_, atom) in system.heavy_atoms_of(residue_id) {
        let params = atom
            .params
            .as_ref()
            .ok_or(EnergyCalculationError::UnparameterizedAtom(atom.serial))?;
        coeff_sum += params.solvation;
        n_heavy += 1;
    }
    if n_heavy == 0 {
        return Ok(0.0);
    }

    Ok(coeff_sum * sasa / n_heavy as f64)
}

/// Change in solvation free energy on binding: bound minus unbound.
pub fn delta_solvation(
    system: &MolecularSystem,
    residue_id: ResidueId,
) -> Result<f64, EnergyCalculationError> {
    Ok(solvation_energy(system, residue_id, BindingState::Bound)?
        - solvation_energy(system, residue_id, BindingState::Unbound)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::AtomTypeParameters;
    use crate::core::models::atom::Atom;
    use crate::core::models::residue::ResidueSasa;
    use nalgebra::Point3;
    use std::sync::Arc;

    fn params(code: &str, solvation: f64) -> Arc<AtomTypeParameters> {
        Arc::new(AtomTypeParameters {
            code: code.to_string(),
            epsilon: 0.1,
            sigma: 3.5,
            solvation,
        })
    }

    fn residue_with_atoms(
        atoms: &[(&str, Option<Arc<AtomTypeParameters>>)],
        sasa: ResidueSasa,
    ) -> (MolecularSystem, ResidueId) {
        let mut system = MolecularSystem::new();
        let chain_id = system.add_chain('A');
        let res_id = system.add_residue(chain_id, 1, None, "SER", false).unwrap();
        for (i, (name, p)) in atoms.iter().enumerate() {
            let mut atom = Atom::new(name, res_id, Point3::new(i as f64, 0.0, 0.0));
            atom.params = p.clone();
            system.add_atom_to_residue(res_id, atom).unwrap();
        }
        system.residue_mut(res_id).unwrap().sasa = sasa;
        (system, res_id)
    }

    #[test]
    fn solvation_energy_scales_mean_coefficient_by_area() {
        let (system, res_id) = residue_with_atoms(
            &[
                ("CA", Some(params("C", 0.012))),
                ("OG", Some(params("OA", -0.06))),
                ("HG", Some(params("HD", 5.0))),
            ],
            ResidueSasa {
                bound: Some(10.0),
                unbound: Some(50.0),
            },
        );
        let bound = solvation_energy(&system, res_id, BindingState::Bound).unwrap();
        let unbound = solvation_energy(&system, res_id, BindingState::Unbound).unwrap();
        assert!((bound - (-0.048 * 10.0 / 2.0)).abs() < 1e-12);
        assert!((unbound - (-0.048 * 50.0 / 2.0)).abs() < 1e-12);
        let delta = delta_solvation(&system, res_id).unwrap();
        assert!((delta - (bound - unbound)).abs() < 1e-12);
    }

    #[test]
    fn equal_areas_give_zero_delta() {
        let (system, res_id) = residue_with_atoms(
            &[("CB", Some(params("C", 0.012)))],
            ResidueSasa {
                bound: Some(42.0),
                unbound: Some(42.0),
            },
        );
        assert_eq!(delta_solvation(&system, res_id).unwrap(), 0.0);
    }

    #[test]
    fn missing_or_zero_area_contributes_nothing() {
        let (system, res_id) = residue_with_atoms(
            &[("CB", None)],
            ResidueSasa {
                bound: Some(0.0),
                unbound: None,
            },
        );
        assert_eq!(delta_solvation(&system, res_id).unwrap(), 0.0);
    }

    #[test]
    fn residue_with_only_hydrogens_contributes_nothing() {
        let (system, res_id) = residue_with_atoms(
            &[("H", Some(params("HD", 1.0)))],
            ResidueSasa {
                bound: Some(5.0),
                unbound: Some(10.0),
            },
        );
        assert_eq!(delta_solvation(&system, res_id).unwrap(), 0.0);
    }

    #[test]
    fn unparameterized_heavy_atom_is_an_error_when_area_is_known() {
        let (system, res_id) = residue_with_atoms(
            &[("CB", None)],
            ResidueSasa {
                bound: Some(5.0),
                unbound: Some(10.0),
            },
        );
        assert!(matches!(
            delta_solvation(&system, res_id),
            Err(EnergyCalculationError::UnparameterizedAtom(_))
        ));
    }
}
