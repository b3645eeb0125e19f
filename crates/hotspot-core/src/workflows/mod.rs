//! # Workflows Module
//!
//! End-to-end procedures built from the `core` and `engine` layers. These are the entry
//! points used by the command-line front end.
//!
//! - **Decomposition** ([`decompose`]) - Load a structure with its charges, types and
//!   surface areas, detect the interface of two chains and decompose the binding free
//!   energy per residue.
//! - **Alanine Scan** ([`scan`]) - Truncate each interface residue to alanine and report
//!   the change in binding free energy.
//!
//! Workflows report progress through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter) and log through
//! `tracing`; they never install a subscriber themselves.

pub mod decompose;
pub mod scan;
