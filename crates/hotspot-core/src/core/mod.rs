//! # Core Module
//!
//! Stateless building blocks of the interface analysis.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains, the complete
//!   system and the result records
//! - **Energy Terms** ([`forcefield`]) - Parameter tables, annotation of a structure with
//!   charges, types and surface areas, pairwise potentials and the solvation term
//! - **File I/O** ([`io`]) - PDB structures, PDBQT annotations, NACCESS surface areas and
//!   CSV reports

pub mod forcefield;
pub mod io;
pub mod models;
