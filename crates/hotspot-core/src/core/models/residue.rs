use super::ids::{AtomId, ChainId, ResidueKey};
use phf::{Map, phf_map};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcidType {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // Alanine (ALA)
    Glycine,    // Glycine (GLY)
    Isoleucine, // Isoleucine (ILE)
    Leucine,    // Leucine (LEU)
    Proline,    // Proline (PRO)
    Valine,     // Valine (VAL)

    // --- Aromatic ---
    Phenylalanine, // Phenylalanine (PHE)
    Tryptophan,    // Tryptophan (TRP)
    Tyrosine,      // Tyrosine (TYR)

    // --- Polar, Uncharged ---
    Asparagine, // Asparagine (ASN)
    Cysteine,   // Cysteine (CYS, CYX)
    Glutamine,  // Glutamine (GLN)
    Serine,     // Serine (SER)
    Threonine,  // Threonine (THR)
    Methionine, // Methionine (MET)

    // --- Positively Charged (Basic) ---
    Arginine, // Arginine (ARG)
    Lysine,   // Lysine (LYS)

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // Aspartic Acid (ASP)
    GlutamicAcid, // Glutamic Acid (GLU)

    // --- Histidine and its protonation-state names (HIS, HID, HIE, HIP, HSD, HSE, HSP) ---
    Histidine,
}

static AMINO_ACID_NAMES: Map<&'static str, AminoAcidType> = phf_map! {
    "ALA" => AminoAcidType::Alanine,
    "GLY" => AminoAcidType::Glycine,
    "ILE" => AminoAcidType::Isoleucine,
    "LEU" => AminoAcidType::Leucine,
    "PRO" => AminoAcidType::Proline,
    "VAL" => AminoAcidType::Valine,
    "PHE" => AminoAcidType::Phenylalanine,
    "TRP" => AminoAcidType::Tryptophan,
    "TYR" => AminoAcidType::Tyrosine,
    "ASN" => AminoAcidType::Asparagine,
    "CYS" => AminoAcidType::Cysteine,
    "CYX" => AminoAcidType::Cysteine,
    "GLN" => AminoAcidType::Glutamine,
    "SER" => AminoAcidType::Serine,
    "THR" => AminoAcidType::Threonine,
    "MET" => AminoAcidType::Methionine,
    "ARG" => AminoAcidType::Arginine,
    "LYS" => AminoAcidType::Lysine,
    "ASP" => AminoAcidType::AsparticAcid,
    "GLU" => AminoAcidType::GlutamicAcid,
    "HIS" => AminoAcidType::Histidine,
    "HID" => AminoAcidType::Histidine,
    "HIE" => AminoAcidType::Histidine,
    "HIP" => AminoAcidType::Histidine,
    "HSD" => AminoAcidType::Histidine,
    "HSE" => AminoAcidType::Histidine,
    "HSP" => AminoAcidType::Histidine,
};

impl AminoAcidType {
    pub fn to_three_letter(&self) -> &'static str {
        match self {
            AminoAcidType::Alanine => "ALA",
            AminoAcidType::Glycine => "GLY",
            AminoAcidType::Isoleucine => "ILE",
            AminoAcidType::Leucine => "LEU",
            AminoAcidType::Proline => "PRO",
            AminoAcidType::Valine => "VAL",
            AminoAcidType::Phenylalanine => "PHE",
            AminoAcidType::Tryptophan => "TRP",
            AminoAcidType::Tyrosine => "TYR",
            AminoAcidType::Asparagine => "ASN",
            AminoAcidType::Cysteine => "CYS",
            AminoAcidType::Glutamine => "GLN",
            AminoAcidType::Serine => "SER",
            AminoAcidType::Threonine => "THR",
            AminoAcidType::Methionine => "MET",
            AminoAcidType::Arginine => "ARG",
            AminoAcidType::Lysine => "LYS",
            AminoAcidType::AsparticAcid => "ASP",
            AminoAcidType::GlutamicAcid => "GLU",
            AminoAcidType::Histidine => "HIS",
        }
    }

    pub fn to_one_letter(&self) -> char {
        match self {
            AminoAcidType::Alanine => 'A',
            AminoAcidType::Glycine => 'G',
            AminoAcidType::Isoleucine => 'I',
            AminoAcidType::Leucine => 'L',
            AminoAcidType::Proline => 'P',
            AminoAcidType::Valine => 'V',
            AminoAcidType::Phenylalanine => 'F',
            AminoAcidType::Tryptophan => 'W',
            AminoAcidType::Tyrosine => 'Y',
            AminoAcidType::Asparagine => 'N',
            AminoAcidType::Cysteine => 'C',
            AminoAcidType::Glutamine => 'Q',
            AminoAcidType::Serine => 'S',
            AminoAcidType::Threonine => 'T',
            AminoAcidType::Methionine => 'M',
            AminoAcidType::Arginine => 'R',
            AminoAcidType::Lysine => 'K',
            AminoAcidType::AsparticAcid => 'D',
            AminoAcidType::GlutamicAcid => 'E',
            AminoAcidType::Histidine => 'H',
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown amino acid residue name: '{0}'")]
pub struct ParseAminoAcidError(pub String);

impl FromStr for AminoAcidType {
    type Err = ParseAminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_uppercase();
        AMINO_ACID_NAMES
            .get(name.as_str())
            .copied()
            .ok_or(ParseAminoAcidError(s.to_string()))
    }
}

impl fmt::Display for AminoAcidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_three_letter())
    }
}

/// Selects which of the two binding states a surface area refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingState {
    /// Both chains in complex.
    Bound,
    /// The residue's own chain in isolation.
    Unbound,
}

/// Solvent accessible surface areas of a residue in Å².
///
/// `None` means the external accessibility report had no entry for this residue.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResidueSasa {
    pub bound: Option<f64>,
    pub unbound: Option<f64>,
}

impl ResidueSasa {
    pub fn get(&self, state: BindingState) -> Option<f64> {
        match state {
            BindingState::Bound => self.bound,
            BindingState::Unbound => self.unbound,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.bound.is_some() && self.unbound.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub residue_number: isize,              // Residue sequence number from source file
    pub insertion_code: Option<char>,       // PDB insertion code, if any
    pub name: String,                       // Name of the residue (e.g., "ALA", "GLY")
    pub residue_type: Option<AminoAcidType>, // Standard amino acid, if recognized
    pub is_hetero: bool,                    // Read from HETATM records
    pub chain_id: ChainId,                  // ID of the parent chain
    pub sasa: ResidueSasa,                  // Bound/unbound accessible surface
    pub(crate) atoms: Vec<AtomId>,          // Atoms in file order
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
        is_hetero: bool,
        chain_id: ChainId,
    ) -> Self {
        let name = name.trim();
        Self {
            residue_number,
            insertion_code: insertion_code.filter(|c| !c.is_whitespace()),
            name: name.to_string(),
            residue_type: name.parse().ok(),
            is_hetero,
            chain_id,
            sasa: ResidueSasa::default(),
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
    }

    pub(crate) fn remove_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.retain(|&id| id != atom_id);
        if self.atom_name_map.get(atom_name) == Some(&atom_id) {
            self.atom_name_map.remove(atom_name);
        }
    }

    /// Renames the residue and re-derives its amino acid type.
    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.residue_type = self.name.parse().ok();
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    /// Standard residues take part in contact and energy analysis; hetero groups
    /// (waters, ions, ligands) never do.
    pub fn is_standard(&self) -> bool {
        !self.is_hetero
    }

    pub fn key(&self, chain_id: char) -> ResidueKey {
        ResidueKey::new(chain_id, self.residue_number, self.insertion_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::{AtomId, ChainId};
    use slotmap::KeyData;
    use std::collections::HashSet;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn dummy_chain_id(n: u64) -> ChainId {
        ChainId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let chain_id = dummy_chain_id(1);
        let residue = Residue::new(10, Some(' '), "GLY", false, chain_id);
        assert_eq!(residue.residue_number, 10);
        assert_eq!(residue.insertion_code, None);
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.residue_type, Some(AminoAcidType::Glycine));
        assert_eq!(residue.chain_id, chain_id);
        assert_eq!(residue.sasa, ResidueSasa::default());
        assert!(residue.is_standard());
        assert!(residue.atoms().is_empty());
    }

    #[test]
    fn hetero_residue_is_not_standard() {
        let residue = Residue::new(901, None, "HOH", true, dummy_chain_id(1));
        assert!(!residue.is_standard());
        assert_eq!(residue.residue_type, None);
    }

    #[test]
    fn add_atom_allows_multiple_atoms_with_different_names() {
        let mut residue = Residue::new(7, None, "SER", false, dummy_chain_id(3));
        let atom_id1 = dummy_atom_id(1);
        let atom_id2 = dummy_atom_id(2);
        residue.add_atom("CA", atom_id1);
        residue.add_atom("CB", atom_id2);
        let atom_set: HashSet<_> = residue.atoms().iter().copied().collect();
        assert!(atom_set.contains(&atom_id1));
        assert!(atom_set.contains(&atom_id2));
        assert_eq!(residue.get_atom_id_by_name("CB"), Some(atom_id2));
    }

    #[test]
    fn remove_atom_removes_atom_and_name_mapping() {
        let mut residue = Residue::new(8, None, "THR", false, dummy_chain_id(4));
        let atom_id = dummy_atom_id(100);
        residue.add_atom("OG1", atom_id);
        residue.remove_atom("OG1", atom_id);
        assert!(residue.atoms().is_empty());
        assert!(residue.get_atom_id_by_name("OG1").is_none());
    }

    #[test]
    fn rename_updates_residue_type() {
        let mut residue = Residue::new(417, None, "LYS", false, dummy_chain_id(1));
        residue.rename("ALA");
        assert_eq!(residue.name, "ALA");
        assert_eq!(residue.residue_type, Some(AminoAcidType::Alanine));
    }

    #[test]
    fn key_carries_chain_number_and_insertion() {
        let residue = Residue::new(42, Some('A'), "GLN", false, dummy_chain_id(1));
        assert_eq!(residue.key('E'), ResidueKey::new('E', 42, Some('A')));
    }

    #[test]
    fn amino_acid_parsing_accepts_histidine_variants_and_is_case_insensitive() {
        assert_eq!("hie".parse(), Ok(AminoAcidType::Histidine));
        assert_eq!("HSP".parse(), Ok(AminoAcidType::Histidine));
        assert_eq!(" cyx".parse(), Ok(AminoAcidType::Cysteine));
        assert!("HOH".parse::<AminoAcidType>().is_err());
    }

    #[test]
    fn one_letter_codes_match_conventions() {
        assert_eq!(AminoAcidType::Lysine.to_one_letter(), 'K');
        assert_eq!(AminoAcidType::Tryptophan.to_one_letter(), 'W');
        assert_eq!(AminoAcidType::GlutamicAcid.to_string(), "GLU");
    }

    #[test]
    fn residue_sasa_reports_completeness_per_state() {
        let sasa = ResidueSasa {
            bound: Some(0.0),
            unbound: None,
        };
        assert_eq!(sasa.get(BindingState::Bound), Some(0.0));
        assert_eq!(sasa.get(BindingState::Unbound), None);
        assert!(!sasa.is_complete());
    }
}
