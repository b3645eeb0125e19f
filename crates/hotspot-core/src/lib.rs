//! # Hotspot Core Library
//!
//! Pairwise decomposition of protein-protein binding free energy into per-residue
//! contributions, for locating interface hot spots.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Data models (`MolecularSystem`), the force-field
//!   parameter table, the Coulomb and Lennard-Jones potentials, the surface-area solvation
//!   term, and readers and writers for PDB, PDBQT, NACCESS and CSV reports.
//!
//! - **[`engine`]: The Analysis Layer.** Interface detection with a k-d tree, the residue
//!   pair energy matrix and its reduction into per-residue records.
//!
//! - **[`workflows`]: The Public API.** Complete procedures: decomposition of a complex
//!   from its input files and the computational alanine scan.
//!
//! All energies are in kcal/mol and all distances in Å.

pub mod core;
pub mod engine;
pub mod workflows;
