//! # Force Field Module
//!
//! Parameters and potentials used to decompose interface binding energy.
//!
//! ## Overview
//!
//! Interactions between the two partner chains are described by two non-bonded terms and
//! one implicit-solvent term:
//!
//! - **Electrostatics** - Coulomb's law with a uniform dielectric (ε_r = 80 by default)
//! - **Van der Waals** - 12-6 Lennard-Jones with Lorentz-Berthelot mixing
//! - **Solvation** - atomic solvation coefficients scaled by the change in accessible area
//!
//! ## Key Components
//!
//! - [`params`] - Atom-type parameter tables (`vdwprm` flat files or TOML)
//! - [`parameterization`] - Joins charges, types and surface areas onto a structure
//! - [`energy`] - Atom-pair energy evaluation
//! - [`solvation`] - Residue solvation free energy and its change on binding
//! - [`term`] - Electrostatic and van der Waals energy pair with arithmetic
//!
//! ## Usage
//!
//! ```ignore
//! use hotspot::core::forcefield::{parameterization::*, params::VdwParamSet};
//!
//! let params = VdwParamSet::load(Path::new("vdwprm"))?;
//! let diagnostics = Annotator::new(&params, AnnotationOptions::default())
//!     .annotate(&mut system, &annotations, &bound_sasa, &unbound_sasa)?;
//! ```

pub mod energy;
pub mod parameterization;
pub mod params;
pub(crate) mod potentials;
pub mod solvation;
pub mod term;
