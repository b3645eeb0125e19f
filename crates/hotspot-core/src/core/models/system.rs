use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId, ResidueKey};
use super::residue::Residue;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Represents a complete protein complex: atoms grouped into residues grouped into chains.
///
/// Components are stored in slot maps so their IDs stay valid when other components are
/// removed. Lookup maps allow residues and chains to be found by the identifiers used in
/// the input files.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains.
    chains: SlotMap<ChainId, Chain>,
    /// Chain IDs in the order they were first seen.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding residues by chain, sequence number and insertion code.
    residue_id_map: HashMap<(ChainId, isize, Option<char>), ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms in the system, in storage order.
    ///
    /// Use [`MolecularSystem::atom_ids_in_order`] when file order matters.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atoms_iter_mut(&mut self) -> impl Iterator<Item = (AtomId, &mut Atom)> {
        self.atoms.iter_mut()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The residue ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Residue)` if the residue exists, otherwise `None`.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn residue_mut(&mut self, id: ResidueId) -> Option<&mut Residue> {
        self.residues.get_mut(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over chains in the order they were first added.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Finds a chain ID by its single-character identifier.
    ///
    /// # Arguments
    ///
    /// * `id` - The character identifier of the chain.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its chain ID, sequence number and insertion code.
    pub fn find_residue_by_id(
        &self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, residue_number, insertion_code))
            .copied()
    }

    /// Finds a residue ID by its file-level identity.
    pub fn find_residue_by_key(&self, key: &ResidueKey) -> Option<ResidueId> {
        let chain_id = self.find_chain_by_id(key.chain_id)?;
        self.find_residue_by_id(chain_id, key.residue_number, key.insertion_code)
    }

    /// Builds the file-level identity of a residue.
    ///
    /// # Return
    ///
    /// Returns `None` if the residue or its parent chain no longer exists.
    pub fn residue_key(&self, id: ResidueId) -> Option<ResidueKey> {
        let residue = self.residues.get(id)?;
        let chain = self.chains.get(residue.chain_id)?;
        Some(residue.key(chain.id))
    }

    /// Adds a new chain to the system or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given ID already exists,
    /// it returns the existing chain ID without creating a duplicate.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(&id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Adds a new residue to the system or returns the existing one.
    ///
    /// This method is idempotent on (chain, sequence number, insertion code).
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain to add the residue to.
    /// * `residue_number` - The sequence number of the residue.
    /// * `insertion_code` - The insertion code, if any.
    /// * `name` - The name of the residue.
    /// * `is_hetero` - Whether the residue was read from HETATM records.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
        is_hetero: bool,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let insertion_code = insertion_code.filter(|c| !c.is_whitespace());
        let key = (chain_id, residue_number, insertion_code);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(residue_number, insertion_code, name, is_hetero, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        atom.residue_id = residue_id;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        self.residues[residue_id].add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Removes an atom from the system and from its parent residue.
    ///
    /// # Return
    ///
    /// Returns `Some(Atom)` if the atom existed and was removed, otherwise `None`.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(atom_id)?;
        if let Some(residue) = self.residues.get_mut(atom.residue_id) {
            residue.remove_atom(&atom.name, atom_id);
        }
        Some(atom)
    }

    /// Returns every atom ID in traversal order: chain, then residue, then atom, each in
    /// the order it was added.
    pub fn atom_ids_in_order(&self) -> Vec<AtomId> {
        self.residue_ids_in_order()
            .into_iter()
            .filter_map(|res_id| self.residues.get(res_id))
            .flat_map(|residue| residue.atoms().iter().copied())
            .collect()
    }

    /// Returns every residue ID in traversal order.
    pub fn residue_ids_in_order(&self) -> Vec<ResidueId> {
        self.chains_iter()
            .flat_map(|(_, chain)| chain.residues().iter().copied())
            .collect()
    }

    /// Iterates over the heavy atoms of a residue.
    pub fn heavy_atoms_of(&self, residue_id: ResidueId) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.residues
            .get(residue_id)
            .map(|residue| residue.atoms())
            .unwrap_or(&[])
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| (id, atom)))
            .filter(|(_, atom)| atom.is_heavy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    struct TestRefs {
        chain_a_id: ChainId,
        gly_id: ResidueId,
        gly_n_id: AtomId,
        gly_ca_id: AtomId,
        ala_id: ResidueId,
        ala_ca_id: AtomId,
    }

    fn create_standard_test_system() -> (MolecularSystem, TestRefs) {
        let mut system = MolecularSystem::new();
        let chain_a_id = system.add_chain('A');

        let gly_id = system
            .add_residue(chain_a_id, 1, None, "GLY", false)
            .unwrap();
        let gly_n_id = system
            .add_atom_to_residue(gly_id, Atom::new("N", gly_id, Point3::new(0.0, 0.0, 0.0)))
            .unwrap();
        let gly_ca_id = system
            .add_atom_to_residue(gly_id, Atom::new("CA", gly_id, Point3::new(1.4, 0.0, 0.0)))
            .unwrap();

        let ala_id = system
            .add_residue(chain_a_id, 2, None, "ALA", false)
            .unwrap();
        let ala_ca_id = system
            .add_atom_to_residue(ala_id, Atom::new("CA", ala_id, Point3::new(2.0, 1.0, 0.0)))
            .unwrap();

        let refs = TestRefs {
            chain_a_id,
            gly_id,
            gly_n_id,
            gly_ca_id,
            ala_id,
            ala_ca_id,
        };
        (system, refs)
    }

    #[test]
    fn add_chain_is_idempotent() {
        let mut system = MolecularSystem::new();
        let first = system.add_chain('A');
        let second = system.add_chain('A');
        assert_eq!(first, second);
        assert_eq!(system.chains_iter().count(), 1);
    }

    #[test]
    fn add_residue_is_idempotent_on_number_and_insertion_code() {
        let (mut system, refs) = create_standard_test_system();
        let again = system
            .add_residue(refs.chain_a_id, 1, Some(' '), "GLY", false)
            .unwrap();
        assert_eq!(again, refs.gly_id);

        let inserted = system
            .add_residue(refs.chain_a_id, 1, Some('A'), "SER", false)
            .unwrap();
        assert_ne!(inserted, refs.gly_id);
        assert_eq!(system.chain(refs.chain_a_id).unwrap().residues().len(), 3);
    }

    #[test]
    fn add_residue_fails_for_unknown_chain() {
        let mut system = MolecularSystem::new();
        assert!(
            system
                .add_residue(ChainId::default(), 1, None, "ALA", false)
                .is_none()
        );
    }

    #[test]
    fn find_residue_by_key_uses_file_identity() {
        let (system, refs) = create_standard_test_system();
        assert_eq!(
            system.find_residue_by_key(&ResidueKey::new('A', 2, None)),
            Some(refs.ala_id)
        );
        assert_eq!(
            system.find_residue_by_key(&ResidueKey::new('B', 2, None)),
            None
        );
        assert_eq!(
            system.residue_key(refs.gly_id),
            Some(ResidueKey::new('A', 1, None))
        );
    }

    #[test]
    fn atom_ids_in_order_follow_chain_residue_atom_insertion() {
        let (system, refs) = create_standard_test_system();
        assert_eq!(
            system.atom_ids_in_order(),
            vec![refs.gly_n_id, refs.gly_ca_id, refs.ala_ca_id]
        );
    }

    #[test]
    fn remove_atom_detaches_it_from_residue() {
        let (mut system, refs) = create_standard_test_system();
        let removed = system.remove_atom(refs.gly_ca_id).unwrap();
        assert_eq!(removed.name, "CA");
        assert!(system.atom(refs.gly_ca_id).is_none());
        let gly = system.residue(refs.gly_id).unwrap();
        assert_eq!(gly.atoms(), &[refs.gly_n_id]);
        assert!(gly.get_atom_id_by_name("CA").is_none());
        assert!(system.remove_atom(refs.gly_ca_id).is_none());
    }

    #[test]
    fn heavy_atoms_of_skips_hydrogens() {
        let (mut system, refs) = create_standard_test_system();
        system
            .add_atom_to_residue(
                refs.ala_id,
                Atom::new("HA", refs.ala_id, Point3::new(2.5, 1.5, 0.0)),
            )
            .unwrap();
        let heavy: Vec<_> = system.heavy_atoms_of(refs.ala_id).map(|(id, _)| id).collect();
        assert_eq!(heavy, vec![refs.ala_ca_id]);
    }

    #[test]
    fn chains_iterate_in_insertion_order() {
        let mut system = MolecularSystem::new();
        system.add_chain('E');
        system.add_chain('A');
        let ids: Vec<char> = system.chains_iter().map(|(_, c)| c.id).collect();
        assert_eq!(ids, vec!['E', 'A']);
    }
}
