//! # Core Models Module
//!
//! Data structures representing an annotated two-chain protein complex.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom coordinates, element, partial charge and force-field annotation
//! - [`residue`] - Residue identity, amino acid classification and bound/unbound SASA
//! - [`chain`] - Ordered residues of one chain
//! - [`system`] - The complete complex with slot-map storage and identity lookups
//! - [`ids`] - Stable slot-map keys and the file-level `ResidueKey` / `AtomKey`
//! - [`records`] - Per-residue, complex-level and mutation energy results
//!
//! ## Usage
//!
//! ```ignore
//! use hotspot::core::models::{atom::Atom, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain('A');
//! let residue_id = system.add_residue(chain_id, 417, None, "LYS", false)?;
//!
//! let atom = Atom::new("CA", residue_id, Point3::new(0.0, 0.0, 0.0));
//! system.add_atom_to_residue(residue_id, atom)?;
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod records;
pub mod residue;
pub mod system;
