use crate::core::models::ids::{ChainId, ResidueKey};
use crate::core::models::system::MolecularSystem;
use crate::engine::error::EngineError;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Interface residues of the two partner chains, each set ordered by residue key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceSet {
    pub x: BTreeSet<ResidueKey>,
    pub y: BTreeSet<ResidueKey>,
}

impl InterfaceSet {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }

    pub fn len(&self) -> usize {
        self.x.len() + self.y.len()
    }

    /// The same interface seen from the other partner.
    pub fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Both sides in order, X residues first.
    pub fn iter(&self) -> impl Iterator<Item = &ResidueKey> {
        self.x.iter().chain(self.y.iter())
    }

    /// Labels such as `GLN A42` for every interface residue, X residues first.
    pub fn labels(&self, system: &MolecularSystem) -> Vec<String> {
        self.iter()
            .filter_map(|key| {
                let residue = system.residue(system.find_residue_by_key(key)?)?;
                Some(format!("{} {}", residue.name, key))
            })
            .collect()
    }
}

/// Heavy-atom positions of the standard residues of one chain.
fn heavy_atoms_of_chain(system: &MolecularSystem, chain_id: ChainId) -> Vec<([f64; 3], ResidueKey)> {
    let Some(chain) = system.chain(chain_id) else {
        return Vec::new();
    };
    chain
        .residues()
        .iter()
        .filter_map(|&res_id| {
            let residue = system.residue(res_id)?;
            residue.is_standard().then(|| (res_id, residue.key(chain.id)))
        })
        .flat_map(|(res_id, key)| {
            system
                .heavy_atoms_of(res_id)
                .map(move |(_, atom)| ([atom.position.x, atom.position.y, atom.position.z], key))
        })
        .collect()
}

/// Finds the residues of each chain that have a heavy atom closer than `cutoff` (Å) to a
/// heavy atom of the partner chain. Hydrogens and hetero residues are ignored.
///
/// # Errors
///
/// Returns [`EngineError::ChainNotFound`] if either chain is absent from the system.
#[instrument(skip_all, name = "interface_detection", fields(x = %chain_x, y = %chain_y, cutoff = cutoff))]
pub fn find_interface(
    system: &MolecularSystem,
    chain_x: char,
    chain_y: char,
    cutoff: f64,
) -> Result<InterfaceSet, EngineError> {
    let x_id = system
        .find_chain_by_id(chain_x)
        .ok_or(EngineError::ChainNotFound(chain_x))?;
    let y_id = system
        .find_chain_by_id(chain_y)
        .ok_or(EngineError::ChainNotFound(chain_y))?;

    let x_atoms = heavy_atoms_of_chain(system, x_id);
    let y_atoms = heavy_atoms_of_chain(system, y_id);
    if x_atoms.is_empty() || y_atoms.is_empty() {
        return Ok(InterfaceSet::default());
    }

    let y_positions: Vec<[f64; 3]> = y_atoms.iter().map(|(pos, _)| *pos).collect();
    // Built in one pass so that many atoms sharing a coordinate (planar or idealized
    // chains) do not overflow a bucket.
    let kdtree: ImmutableKdTree<f64, 3> = ImmutableKdTree::new_from_slice(&y_positions);
    let cutoff_sq = cutoff * cutoff;

    let contacts_of = |(pos, x_key): &([f64; 3], ResidueKey)| -> Option<(ResidueKey, Vec<ResidueKey>)> {
        let partners: Vec<ResidueKey> = kdtree
            .within_unsorted::<SquaredEuclidean>(pos, cutoff_sq)
            .into_iter()
            .filter(|nb| nb.distance < cutoff_sq)
            .map(|nb| y_atoms[nb.item as usize].1)
            .collect();
        (!partners.is_empty()).then_some((*x_key, partners))
    };

    #[cfg(not(feature = "parallel"))]
    let contacts: Vec<_> = x_atoms.iter().filter_map(contacts_of).collect();

    #[cfg(feature = "parallel")]
    let contacts: Vec<_> = x_atoms.par_iter().filter_map(contacts_of).collect();

    let mut interface = InterfaceSet::default();
    for (x_key, partners) in contacts {
        interface.x.insert(x_key);
        interface.y.extend(partners);
    }

    debug!(
        x_residues = interface.x.len(),
        y_residues = interface.y.len(),
        "Interface detected."
    );
    Ok(interface)
}
