use super::error::{
    ParseErrorKind, StructureInputError, column_char, slice_and_trim, split_residue_number,
};
use crate::core::forcefield::parameterization::SasaTable;
use crate::core::models::ids::ResidueKey;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// First whitespace token of a `RES` line that holds an area value.
const RSA_FIRST_VALUE_TOKEN: usize = 4;

/// Which absolute accessibility column of an `.rsa` residue record to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SasaColumn {
    AllAtoms,
    SideChain,
    MainChain,
    #[default]
    NonPolar,
    Polar,
    /// Whitespace token index within the whole `RES` line (`RES ALA A 1` are tokens 0-3).
    Raw(usize),
}

impl SasaColumn {
    fn token_index(&self) -> usize {
        match self {
            SasaColumn::AllAtoms => 4,
            SasaColumn::SideChain => 6,
            SasaColumn::MainChain => 8,
            SasaColumn::NonPolar => 10,
            SasaColumn::Polar => 12,
            SasaColumn::Raw(idx) => *idx,
        }
    }
}

impl FromStr for SasaColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all-atoms" => Ok(SasaColumn::AllAtoms),
            "side-chain" => Ok(SasaColumn::SideChain),
            "main-chain" => Ok(SasaColumn::MainChain),
            "non-polar" => Ok(SasaColumn::NonPolar),
            "polar" => Ok(SasaColumn::Polar),
            other => match other.parse::<usize>() {
                Ok(idx) if idx >= RSA_FIRST_VALUE_TOKEN => Ok(SasaColumn::Raw(idx)),
                _ => Err(format!(
                    "invalid SASA column '{}': expected all-atoms, side-chain, main-chain, non-polar, polar or a token index >= {}",
                    s, RSA_FIRST_VALUE_TOKEN
                )),
            },
        }
    }
}

impl TryFrom<String> for SasaColumn {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SasaColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SasaColumn::AllAtoms => f.write_str("all-atoms"),
            SasaColumn::SideChain => f.write_str("side-chain"),
            SasaColumn::MainChain => f.write_str("main-chain"),
            SasaColumn::NonPolar => f.write_str("non-polar"),
            SasaColumn::Polar => f.write_str("polar"),
            SasaColumn::Raw(idx) => write!(f, "{}", idx),
        }
    }
}

/// Reads residue areas from the `RES` records of a NACCESS `.rsa` report.
///
/// Residue identity is taken from the fixed columns (name 5-7, chain 9, number and
/// optional insertion code 10-14); area values are the whitespace fields after them.
pub fn read_rsa(
    reader: &mut impl BufRead,
    column: SasaColumn,
) -> Result<SasaTable, StructureInputError> {
    let mut table = SasaTable::new();
    let value_idx = column.token_index().saturating_sub(RSA_FIRST_VALUE_TOKEN);

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = line_num + 1;
        if !line.starts_with("RES ") {
            continue;
        }

        let chain_id = line.get(8..9).and_then(|s| s.chars().next()).unwrap_or(' ');
        let number_field = slice_and_trim(&line, 9, 14);
        let (residue_number, insertion_code) =
            split_residue_number(number_field).ok_or_else(|| StructureInputError::Parse {
                line: line_num,
                kind: ParseErrorKind::InvalidInt {
                    columns: "10-14".into(),
                    value: number_field.into(),
                },
            })?;

        let values: Vec<&str> = line.get(14..).unwrap_or("").split_whitespace().collect();
        let token = values.get(value_idx).ok_or(StructureInputError::Parse {
            line: line_num,
            kind: ParseErrorKind::MissingFields {
                expected: column.token_index() + 1,
                found: values.len() + RSA_FIRST_VALUE_TOKEN,
            },
        })?;
        let area: f64 = token.parse().map_err(|_| StructureInputError::Parse {
            line: line_num,
            kind: ParseErrorKind::InvalidFloat {
                columns: format!("field {}", column.token_index()),
                value: token.to_string(),
            },
        })?;

        table.insert(
            ResidueKey::new(chain_id, residue_number, insertion_code),
            area,
        );
    }

    Ok(table)
}

/// Sums the per-atom areas of a NACCESS `.asa` file into residue totals.
///
/// The atom area is read from columns 55-62. Hydrogen atoms are not summed.
pub fn read_asa(reader: &mut impl BufRead) -> Result<SasaTable, StructureInputError> {
    let mut table = SasaTable::new();

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = line_num + 1;
        if !matches!(slice_and_trim(&line, 0, 6), "ATOM" | "HETATM") {
            continue;
        }

        let res_num_str = slice_and_trim(&line, 22, 26);
        let residue_number: isize =
            res_num_str.parse().map_err(|_| StructureInputError::Parse {
                line: line_num,
                kind: ParseErrorKind::InvalidInt {
                    columns: "23-26".into(),
                    value: res_num_str.into(),
                },
            })?;
        let asa_str = slice_and_trim(&line, 54, 62);
        let area: f64 = asa_str.parse().map_err(|_| StructureInputError::Parse {
            line: line_num,
            kind: ParseErrorKind::InvalidFloat {
                columns: "55-62".into(),
                value: asa_str.into(),
            },
        })?;

        let atom_name = slice_and_trim(&line, 12, 16);
        if crate::core::models::atom::infer_element(atom_name) == "H" {
            continue;
        }

        let chain_id = line.get(21..22).and_then(|s| s.chars().next()).unwrap_or(' ');
        let key = ResidueKey::new(chain_id, residue_number, column_char(&line, 26));
        table.accumulate(key, area);
    }

    Ok(table)
}

/// Loads a surface area table, choosing the reader by extension (`.asa` is per-atom,
/// anything else is treated as an `.rsa` residue report).
pub fn read_sasa_path(path: &Path, column: SasaColumn) -> Result<SasaTable, StructureInputError> {
    let mut reader = BufReader::new(File::open(path)?);
    let is_asa = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("asa"));
    if is_asa {
        read_asa(&mut reader)
    } else {
        read_rsa(&mut reader, column)
    }
}
