use super::ids::ResidueId;
use crate::core::forcefield::params::AtomTypeParameters;
use nalgebra::Point3;
use std::sync::Arc;

/// Represents an atom of a protein structure together with its force-field annotation.
///
/// Coordinates and identity come from the structure file. The charge, force-field type
/// and resolved van der Waals parameters are filled in by the
/// [`Annotator`](crate::core::forcefield::parameterization::Annotator) and are never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number from the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "OG1").
    pub name: String,
    /// The element symbol, upper-cased (e.g., "C", "FE").
    pub element: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Occupancy as read from the structure file.
    pub occupancy: f64,
    /// Temperature factor column; reused to carry per-residue scores on output.
    pub b_factor: f64,
    /// The partial atomic charge in elementary charge units.
    ///
    /// `None` means no charge could be assigned, which is not the same as a charge
    /// that happens to be zero.
    pub partial_charge: Option<f64>,
    /// The force field atom type code (e.g., "C", "OA", "N").
    pub force_field_type: String,
    /// Resolved van der Waals and solvation parameters, shared with every other atom
    /// of the same type.
    pub params: Option<Arc<AtomTypeParameters>>,
}

impl Atom {
    /// Creates a new, unannotated `Atom`.
    ///
    /// The element is inferred from the atom name; use [`Atom::with_element`] when the
    /// structure file provides one explicitly.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        let name = name.trim();
        Self {
            serial: 0,
            name: name.to_string(),
            element: infer_element(name),
            residue_id,
            position,
            occupancy: 1.0,
            b_factor: 0.0,
            partial_charge: None,
            force_field_type: String::new(),
            params: None,
        }
    }

    pub fn with_element(mut self, element: &str) -> Self {
        let element = element.trim();
        if !element.is_empty() {
            self.element = element.to_ascii_uppercase();
        }
        self
    }

    /// Hydrogen and deuterium atoms are left out of every energy, contact and surface
    /// calculation.
    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        matches!(self.element.as_str(), "H" | "D")
    }

    #[inline]
    pub fn is_heavy(&self) -> bool {
        !self.is_hydrogen()
    }

    /// The charge used in energy terms. Missing charges contribute nothing.
    #[inline]
    pub fn charge_or_zero(&self) -> f64 {
        self.partial_charge.unwrap_or(0.0)
    }

    #[inline]
    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}

/// Derives an element symbol from a PDB atom name when the element columns are blank.
///
/// Leading digits are skipped ("1HB" is a hydrogen); the first letter is taken as the
/// element.
pub fn infer_element(atom_name: &str) -> String {
    atom_name
        .trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;
    use nalgebra::Point3;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.element, "C");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.force_field_type, "");
        assert_eq!(atom.partial_charge, None);
        assert_eq!(atom.occupancy, 1.0);
        assert!(atom.params.is_none());
    }

    #[test]
    fn explicit_element_overrides_inferred_one() {
        let atom = Atom::new("CA", ResidueId::default(), Point3::origin()).with_element("ca");
        assert_eq!(atom.element, "CA");
    }

    #[test]
    fn blank_explicit_element_keeps_inferred_one() {
        let atom = Atom::new("OG1", ResidueId::default(), Point3::origin()).with_element("  ");
        assert_eq!(atom.element, "O");
    }

    #[test]
    fn hydrogens_are_detected_from_element() {
        let h = Atom::new("1HB", ResidueId::default(), Point3::origin());
        let d = Atom::new("N", ResidueId::default(), Point3::origin()).with_element("D");
        let c = Atom::new("CB", ResidueId::default(), Point3::origin());
        assert!(h.is_hydrogen());
        assert!(d.is_hydrogen());
        assert!(c.is_heavy());
    }

    #[test]
    fn missing_charge_counts_as_zero_in_energies() {
        let mut atom = Atom::new("N", ResidueId::default(), Point3::origin());
        assert_eq!(atom.charge_or_zero(), 0.0);
        atom.partial_charge = Some(-0.35);
        assert_eq!(atom.charge_or_zero(), -0.35);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Atom::new("C", ResidueId::default(), Point3::new(0.0, 0.0, 0.0));
        let b = Atom::new("C", ResidueId::default(), Point3::new(3.0, 4.0, 0.0));
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn infer_element_skips_leading_digits() {
        assert_eq!(infer_element("2HG1"), "H");
        assert_eq!(infer_element(" SG "), "S");
        assert_eq!(infer_element(""), "");
    }
}
