use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Non-bonded interaction energy between two groups of atoms, in kcal/mol.
///
/// Electrostatic and van der Waals parts are kept separate and only combined in reports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub elec: f64,
    pub vdw: f64,
}

impl EnergyTerm {
    pub fn new(elec: f64, vdw: f64) -> Self {
        Self { elec, vdw }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.elec + self.vdw
    }
}

impl Add for EnergyTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elec: self.elec + rhs.elec,
            vdw: self.vdw + rhs.vdw,
        }
    }
}

impl AddAssign for EnergyTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.elec += rhs.elec;
        self.vdw += rhs.vdw;
    }
}

impl Sum for EnergyTerm {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, term| acc + term)
    }
}
