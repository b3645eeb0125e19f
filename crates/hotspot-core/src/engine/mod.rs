//! # Engine Module
//!
//! The analysis layer: it takes an annotated complex and turns it into per-residue
//! binding energy contributions.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Partner chains, contact and energy cutoffs, dielectric
//! - **Interface Detection** ([`interface`]) - k-d tree search for residues in contact
//! - **Tasks** ([`tasks`]) - Pair energy matrix and its per-residue decomposition
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - The error type shared by the engine and workflows
//!
//! Energy evaluation over residue rows runs in parallel when the `parallel` feature is
//! enabled. Results are collected in order and reduced sequentially, so they do not depend
//! on the number of threads.

pub mod config;
pub mod error;
pub mod interface;
pub mod progress;
pub mod tasks;
