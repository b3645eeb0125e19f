use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    pub struct AtomId;
    pub struct ResidueId;
    pub struct ChainId;
}

/// Identity of a residue as written in the source files: chain, sequence number and
/// optional insertion code.
///
/// Ordering is by chain, then sequence number, then insertion code (a residue with no
/// insertion code sorts before `42A`, `42B`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain_id: char,
    pub residue_number: isize,
    pub insertion_code: Option<char>,
}

impl ResidueKey {
    pub fn new(chain_id: char, residue_number: isize, insertion_code: Option<char>) -> Self {
        Self {
            chain_id,
            residue_number,
            insertion_code: insertion_code.filter(|c| !c.is_whitespace()),
        }
    }

    /// The same residue position with the insertion code dropped.
    pub fn without_insertion(&self) -> Self {
        Self {
            insertion_code: None,
            ..*self
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.chain_id, self.residue_number)?;
        if let Some(icode) = self.insertion_code {
            write!(f, "{}", icode)?;
        }
        Ok(())
    }
}

/// Identity of an atom: its residue plus the atom name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomKey {
    pub residue: ResidueKey,
    pub atom_name: String,
}

impl AtomKey {
    pub fn new(residue: ResidueKey, atom_name: &str) -> Self {
        Self {
            residue,
            atom_name: atom_name.trim().to_string(),
        }
    }
}
