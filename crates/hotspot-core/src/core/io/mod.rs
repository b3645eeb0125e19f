//! Readers and writers for the files the analysis consumes and produces.
//!
//! Structures are read from and written to PDB ([`pdb`]). Per-atom charges and types come
//! from PDBQT ([`pdbqt`]), residue surface areas from NACCESS reports ([`naccess`]). Energy
//! tables are written as CSV ([`report`]).

pub mod error;
pub mod naccess;
pub mod pdb;
pub mod pdbqt;
pub mod report;
pub mod traits;
