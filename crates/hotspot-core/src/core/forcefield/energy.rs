use super::potentials;
use super::term::EnergyTerm;
use crate::core::models::atom::Atom;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnergyCalculationError {
    #[error("Atom with serial {0} is not parameterized for VDW calculation")]
    UnparameterizedAtom(usize),
}

pub struct EnergyCalculator;

impl EnergyCalculator {
    pub fn calculate_vdw(atom1: &Atom, atom2: &Atom) -> Result<f64, EnergyCalculationError> {
        let p1 = atom1
            .params
            .as_ref()
            .ok_or(EnergyCalculationError::UnparameterizedAtom(atom1.serial))?;
        let p2 = atom2
            .params
            .as_ref()
            .ok_or(EnergyCalculationError::UnparameterizedAtom(atom2.serial))?;

        let (epsilon, sigma) =
            potentials::combine_lorentz_berthelot(p1.epsilon, p1.sigma, p2.epsilon, p2.sigma);
        Ok(potentials::lennard_jones_12_6(
            atom1.distance_to(atom2),
            sigma,
            epsilon,
        ))
    }

    pub fn calculate_coulomb(atom1: &Atom, atom2: &Atom, dielectric: f64) -> f64 {
        potentials::coulomb(
            atom1.distance_to(atom2),
            atom1.charge_or_zero(),
            atom2.charge_or_zero(),
            dielectric,
        )
    }

    /// Both non-bonded terms for one atom pair.
    pub fn calculate_pair(
        atom1: &Atom,
        atom2: &Atom,
        dielectric: f64,
    ) -> Result<EnergyTerm, EnergyCalculationError> {
        Ok(EnergyTerm::new(
            Self::calculate_coulomb(atom1, atom2, dielectric),
            Self::calculate_vdw(atom1, atom2)?,
        ))
    }
}
