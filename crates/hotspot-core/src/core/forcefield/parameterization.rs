use super::params::VdwParamSet;
use crate::core::models::{
    ids::{AtomId, AtomKey, ResidueKey},
    system::MolecularSystem,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_FALLBACK_TYPE: &str = "C";

/// Charge and force-field type for one atom, as read from an annotation file.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomAnnotation {
    pub key: AtomKey,
    pub partial_charge: Option<f64>,
    pub type_code: String,
}

/// Ordered per-atom annotation records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationTable {
    records: Vec<AtomAnnotation>,
}

impl AnnotationTable {
    pub fn new(records: Vec<AtomAnnotation>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: AtomAnnotation) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[AtomAnnotation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-residue solvent accessible surface areas in Å².
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SasaTable {
    entries: HashMap<ResidueKey, f64>,
}

impl SasaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ResidueKey, area: f64) {
        self.entries.insert(key, area);
    }

    /// Adds `area` to the residue's running total.
    pub fn accumulate(&mut self, key: ResidueKey, area: f64) {
        *self.entries.entry(key).or_insert(0.0) += area;
    }

    pub fn get(&self, key: &ResidueKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Looks up a residue, falling back to the same position without insertion code.
    pub fn lookup(&self, key: &ResidueKey) -> Option<f64> {
        self.get(key).or_else(|| {
            key.insertion_code
                .and_then(|_| self.get(&key.without_insertion()))
        })
    }

    /// Merges another table into this one; entries of `other` win on conflicts.
    pub fn extend(&mut self, other: SasaTable) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How annotation records are matched to structure atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoinStrategy {
    /// Match on chain, residue number, insertion code and atom name.
    #[default]
    Keyed,
    /// The i-th atom in traversal order takes the i-th record.
    Positional,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationOptions {
    /// Type code substituted for codes missing from the parameter table.
    pub default_type: String,
    pub join: JoinStrategy,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            default_type: DEFAULT_FALLBACK_TYPE.to_string(),
            join: JoinStrategy::default(),
        }
    }
}

/// Counts describing how completely a structure was annotated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationDiagnostics {
    pub atom_count: usize,
    pub heavy_atom_count: usize,
    pub standard_residue_count: usize,
    pub total_charge: f64,
    pub missing_charges: usize,
    pub missing_annotations: usize,
    pub unknown_type_substitutions: usize,
    /// Original codes that were replaced by the default type, with their counts.
    pub substituted_types: BTreeMap<String, usize>,
    pub missing_bound_sasa: usize,
    pub missing_unbound_sasa: usize,
}

impl AnnotationDiagnostics {
    pub fn has_gaps(&self) -> bool {
        self.missing_charges > 0
            || self.missing_annotations > 0
            || self.unknown_type_substitutions > 0
            || self.missing_bound_sasa > 0
            || self.missing_unbound_sasa > 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("Default atom type '{0}' is not defined in the parameter table")]
    DefaultTypeUndefined(String),
}

/// Attaches charges, force-field types, parameters and surface areas to a structure.
pub struct Annotator<'a> {
    params: &'a VdwParamSet,
    options: AnnotationOptions,
}

impl<'a> Annotator<'a> {
    pub fn new(params: &'a VdwParamSet, options: AnnotationOptions) -> Self {
        Self { params, options }
    }

    /// Annotates every atom and every standard residue of `system`.
    ///
    /// # Arguments
    ///
    /// * `system` - The structure to annotate in place.
    /// * `annotations` - Per-atom charge and type records.
    /// * `bound_sasa` - Residue areas computed on the complex.
    /// * `unbound_sasa` - Residue areas computed on each chain in isolation.
    ///
    /// # Return
    ///
    /// Diagnostics counting every data gap that was filled with a fallback.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationError::DefaultTypeUndefined`] if the fallback type code is absent
    /// from the parameter table.
    pub fn annotate(
        &self,
        system: &mut MolecularSystem,
        annotations: &AnnotationTable,
        bound_sasa: &SasaTable,
        unbound_sasa: &SasaTable,
    ) -> Result<AnnotationDiagnostics, AnnotationError> {
        let default_params = self
            .params
            .get(&self.options.default_type)
            .cloned()
            .ok_or_else(|| AnnotationError::DefaultTypeUndefined(self.options.default_type.clone()))?;

        let mut diag = AnnotationDiagnostics::default();
        let atom_ids = system.atom_ids_in_order();
        let matched = self.match_records(system, &atom_ids, annotations);

        for (atom_id, record) in atom_ids.into_iter().zip(matched) {
            let Some(atom) = system.atom_mut(atom_id) else {
                continue;
            };
            diag.atom_count += 1;
            if atom.is_heavy() {
                diag.heavy_atom_count += 1;
            }

            let Some(record) = record else {
                diag.missing_annotations += 1;
                diag.missing_charges += 1;
                atom.partial_charge = None;
                atom.force_field_type = default_params.code.clone();
                atom.params = Some(default_params.clone());
                continue;
            };

            atom.partial_charge = record.partial_charge;
            match atom.partial_charge {
                Some(q) => diag.total_charge += q,
                None => diag.missing_charges += 1,
            }

            match self.params.get(&record.type_code) {
                Some(params) => {
                    atom.force_field_type = record.type_code.clone();
                    atom.params = Some(params.clone());
                }
                None => {
                    diag.unknown_type_substitutions += 1;
                    *diag
                        .substituted_types
                        .entry(record.type_code.clone())
                        .or_insert(0) += 1;
                    atom.force_field_type = default_params.code.clone();
                    atom.params = Some(default_params.clone());
                }
            }
        }

        self.assign_sasa(system, bound_sasa, unbound_sasa, &mut diag);
        log_diagnostics(&diag, &self.options.default_type);
        Ok(diag)
    }

    fn match_records<'t>(
        &self,
        system: &MolecularSystem,
        atom_ids: &[AtomId],
        annotations: &'t AnnotationTable,
    ) -> Vec<Option<&'t AtomAnnotation>> {
        match self.options.join {
            JoinStrategy::Keyed => {
                let mut index: HashMap<&AtomKey, &AtomAnnotation> = HashMap::new();
                for record in annotations.records() {
                    index.entry(&record.key).or_insert(record);
                }
                atom_ids
                    .iter()
                    .map(|&atom_id| {
                        let atom = system.atom(atom_id)?;
                        let residue_key = system.residue_key(atom.residue_id)?;
                        index.get(&AtomKey::new(residue_key, &atom.name)).copied()
                    })
                    .collect()
            }
            JoinStrategy::Positional => {
                if annotations.len() > atom_ids.len() {
                    warn!(
                        surplus = annotations.len() - atom_ids.len(),
                        "Annotation table has more records than the structure has atoms; extra records ignored."
                    );
                }
                (0..atom_ids.len())
                    .map(|i| annotations.records().get(i))
                    .collect()
            }
        }
    }

    fn assign_sasa(
        &self,
        system: &mut MolecularSystem,
        bound_sasa: &SasaTable,
        unbound_sasa: &SasaTable,
        diag: &mut AnnotationDiagnostics,
    ) {
        for residue_id in system.residue_ids_in_order() {
            let Some(key) = system.residue_key(residue_id) else {
                continue;
            };
            let Some(residue) = system.residue_mut(residue_id) else {
                continue;
            };
            if !residue.is_standard() {
                continue;
            }
            diag.standard_residue_count += 1;

            residue.sasa.bound = bound_sasa.lookup(&key);
            residue.sasa.unbound = unbound_sasa.lookup(&key);
            if residue.sasa.bound.is_none() {
                diag.missing_bound_sasa += 1;
            }
            if residue.sasa.unbound.is_none() {
                diag.missing_unbound_sasa += 1;
            }
        }
    }
}

fn log_diagnostics(diag: &AnnotationDiagnostics, default_type: &str) {
    info!(
        atoms = diag.atom_count,
        heavy_atoms = diag.heavy_atom_count,
        standard_residues = diag.standard_residue_count,
        total_charge = diag.total_charge,
        "Structure annotated."
    );
    if diag.missing_annotations > 0 {
        warn!(
            count = diag.missing_annotations,
            "Atoms without an annotation record; charge left unset and default type used."
        );
    }
    if diag.missing_charges > 0 {
        warn!(
            count = diag.missing_charges,
            "Atoms without a usable partial charge; they contribute no electrostatics."
        );
    }
    if diag.unknown_type_substitutions > 0 {
        warn!(
            count = diag.unknown_type_substitutions,
            codes = ?diag.substituted_types,
            "Unknown atom types replaced by '{}'.",
            default_type
        );
    }
    if diag.missing_bound_sasa > 0 || diag.missing_unbound_sasa > 0 {
        warn!(
            bound = diag.missing_bound_sasa,
            unbound = diag.missing_unbound_sasa,
            "Residues without surface area entries; their solvation term is zero."
        );
    }
}
