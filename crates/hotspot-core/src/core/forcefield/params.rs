use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Van der Waals and solvation parameters for one force-field atom type.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomTypeParameters {
    /// The atom type code, e.g. "C", "OA", "N".
    pub code: String,
    /// Lennard-Jones well depth ε in kcal/mol.
    pub epsilon: f64,
    /// Lennard-Jones diameter σ in Å.
    pub sigma: f64,
    /// Atomic solvation coefficient in kcal/mol/Å².
    pub solvation: f64,
}

/// Column positions of a flat whitespace-separated parameter table.
///
/// The default matches the `vdwprm` layout `code  ε  σ  mass  solvation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub code: usize,
    pub epsilon: usize,
    pub sigma: usize,
    pub solvation: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            code: 0,
            epsilon: 1,
            sigma: 2,
            solvation: 4,
        }
    }
}

impl ColumnLayout {
    fn min_columns(&self) -> usize {
        self.code
            .max(self.epsilon)
            .max(self.sigma)
            .max(self.solvation)
            + 1
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamParseErrorKind {
    #[error("expected at least {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },
    #[error("column {column} is not a number: '{value}'")]
    InvalidNumber { column: usize, value: String },
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Parse error in '{path}' at line {line}: {kind}")]
    Parse {
        path: String,
        line: usize,
        kind: ParamParseErrorKind,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Parameter file '{path}' defines no atom types")]
    Empty { path: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlParamFile {
    types: HashMap<String, TomlTypeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTypeEntry {
    epsilon: f64,
    sigma: f64,
    #[serde(default)]
    solvation: f64,
}

/// Immutable table of atom-type parameters.
///
/// Entries are reference-counted so annotated atoms can share them without copying.
#[derive(Debug, Clone, Default)]
pub struct VdwParamSet {
    types: HashMap<String, Arc<AtomTypeParameters>>,
}

impl VdwParamSet {
    /// Loads a parameter table, choosing the format by file extension.
    ///
    /// `.toml` files are read as `[types.<code>]` tables; anything else is treated as a
    /// flat whitespace table with the default [`ColumnLayout`].
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        Self::load_with_layout(path, &ColumnLayout::default())
    }

    pub fn load_with_layout(path: &Path, layout: &ColumnLayout) -> Result<Self, ParamLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path_str.clone(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let set = if is_toml {
            Self::from_toml_str(&content, &path_str)?
        } else {
            Self::from_flat_str(&content, &path_str, layout)?
        };

        debug!(path = %path_str, types = set.len(), "Loaded atom type parameters.");
        Ok(set)
    }

    fn from_toml_str(content: &str, path: &str) -> Result<Self, ParamLoadError> {
        let file: TomlParamFile = toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string(),
            source: e,
        })?;

        let set = Self::from_entries(file.types.into_iter().map(|(code, entry)| {
            AtomTypeParameters {
                code,
                epsilon: entry.epsilon,
                sigma: entry.sigma,
                solvation: entry.solvation,
            }
        }));
        if set.is_empty() {
            return Err(ParamLoadError::Empty {
                path: path.to_string(),
            });
        }
        Ok(set)
    }

    /// Parses a flat whitespace table. Blank lines and lines starting with `#` are skipped.
    pub fn from_flat_str(
        content: &str,
        path: &str,
        layout: &ColumnLayout,
    ) -> Result<Self, ParamLoadError> {
        let mut types = HashMap::new();

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let parse_err = |kind| ParamLoadError::Parse {
                path: path.to_string(),
                line: idx + 1,
                kind,
            };

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() < layout.min_columns() {
                return Err(parse_err(ParamParseErrorKind::MissingColumns {
                    expected: layout.min_columns(),
                    found: fields.len(),
                }));
            }

            let number = |column: usize| {
                fields[column]
                    .parse::<f64>()
                    .map_err(|_| ParamParseErrorKind::InvalidNumber {
                        column,
                        value: fields[column].to_string(),
                    })
            };
            let epsilon = number(layout.epsilon).map_err(parse_err)?;
            let sigma = number(layout.sigma).map_err(parse_err)?;
            let solvation = number(layout.solvation).map_err(parse_err)?;

            let code = fields[layout.code].to_string();
            let params = AtomTypeParameters {
                code: code.clone(),
                epsilon,
                sigma,
                solvation,
            };
            if types.insert(code.clone(), Arc::new(params)).is_some() {
                warn!(
                    path,
                    line = idx + 1,
                    code = %code,
                    "Duplicate atom type in parameter file; the later row wins."
                );
            }
        }

        if types.is_empty() {
            return Err(ParamLoadError::Empty {
                path: path.to_string(),
            });
        }
        Ok(Self { types })
    }

    /// Builds a table directly from parameter entries. Later duplicates replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = AtomTypeParameters>) -> Self {
        let types = entries
            .into_iter()
            .map(|p| (p.code.clone(), Arc::new(p)))
            .collect();
        Self { types }
    }

    pub fn get(&self, code: &str) -> Option<&Arc<AtomTypeParameters>> {
        self.types.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.types.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const VDWPRM: &str = "\
# code  eps    sig    mass    fsrf
C      0.150  4.00   12.011  0.012
N      0.160  3.50   14.007 -0.060

OA     0.200  3.20   15.999 -0.060
";

    #[test]
    fn load_flat_table_uses_vdwprm_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vdwprm");
        fs::write(&path, VDWPRM).unwrap();

        let set = VdwParamSet::load(&path).unwrap();
        assert_eq!(set.len(), 3);
        let oa = set.get("OA").unwrap();
        assert_eq!(oa.epsilon, 0.2);
        assert_eq!(oa.sigma, 3.2);
        assert_eq!(oa.solvation, -0.06);
        assert!(set.get("oa").is_none());
    }

    #[test]
    fn load_toml_table_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(
            &path,
            r#"
            [types.C]
            epsilon = 0.15
            sigma = 4.0
            solvation = 0.012

            [types.SA]
            epsilon = 0.2
            sigma = 4.0
            "#,
        )
        .unwrap();

        let set = VdwParamSet::load(&path).unwrap();
        assert_eq!(set.get("C").unwrap().solvation, 0.012);
        assert_eq!(set.get("SA").unwrap().solvation, 0.0);
    }

    #[test]
    fn custom_layout_reads_other_columns() {
        let layout = ColumnLayout {
            code: 0,
            epsilon: 2,
            sigma: 1,
            solvation: 3,
        };
        let set = VdwParamSet::from_flat_str("C 4.0 0.15 0.01\n", "inline", &layout).unwrap();
        let c = set.get("C").unwrap();
        assert_eq!(c.epsilon, 0.15);
        assert_eq!(c.sigma, 4.0);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = VdwParamSet::load(&dir.path().join("absent.prm"));
        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
    }

    #[test]
    fn short_row_reports_line_number() {
        let content = "# header\nC 0.15 4.0 12.0 0.01\nN 0.16\n";
        let result = VdwParamSet::from_flat_str(content, "inline", &ColumnLayout::default());
        match result {
            Err(ParamLoadError::Parse { line, kind, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(
                    kind,
                    ParamParseErrorKind::MissingColumns {
                        expected: 5,
                        found: 2
                    }
                );
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn non_numeric_field_is_a_parse_error() {
        let result =
            VdwParamSet::from_flat_str("C abc 4.0 12.0 0.01\n", "inline", &ColumnLayout::default());
        assert!(matches!(
            result,
            Err(ParamLoadError::Parse {
                line: 1,
                kind: ParamParseErrorKind::InvalidNumber { column: 1, .. },
                ..
            })
        ));
    }

    #[test]
    fn table_with_only_comments_is_empty_error() {
        let result = VdwParamSet::from_flat_str("# nothing\n\n", "inline", &ColumnLayout::default());
        assert!(matches!(result, Err(ParamLoadError::Empty { .. })));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "this is not toml").unwrap();
        assert!(matches!(
            VdwParamSet::load(&path),
            Err(ParamLoadError::Toml { .. })
        ));
    }

    #[test]
    fn duplicate_code_keeps_last_row() {
        let content = "C 0.1 4.0 12.0 0.01\nC 0.2 4.0 12.0 0.01\n";
        let set = VdwParamSet::from_flat_str(content, "inline", &ColumnLayout::default()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("C").unwrap().epsilon, 0.2);
    }

    #[test]
    fn loading_twice_gives_same_mapping() {
        let a = VdwParamSet::from_flat_str(VDWPRM, "a", &ColumnLayout::default()).unwrap();
        let b = VdwParamSet::from_flat_str(VDWPRM, "a", &ColumnLayout::default()).unwrap();
        for code in ["C", "N", "OA"] {
            assert_eq!(a.get(code), b.get(code));
        }
    }
}
