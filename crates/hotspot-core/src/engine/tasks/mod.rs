//! Computational tasks of one interface analysis.
//!
//! Tasks operate on an annotated [`MolecularSystem`](crate::core::models::system::MolecularSystem)
//! and never modify it. [`pair_energy`] evaluates the residue pair matrix between the two
//! interface sets; [`decomposition`] reduces that matrix into per-residue records and the
//! complex total.

pub mod decomposition;
pub mod pair_energy;
