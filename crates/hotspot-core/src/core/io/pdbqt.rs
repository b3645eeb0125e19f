use super::error::{ParseErrorKind, StructureInputError, column_char, slice_and_trim};
use crate::core::forcefield::parameterization::{AnnotationTable, AtomAnnotation};
use crate::core::models::ids::{AtomKey, ResidueKey};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads per-atom partial charges and atom types from a PDBQT file.
///
/// Atom identity comes from the fixed PDB columns. Charge and type are the last two
/// whitespace-separated fields, which tolerates writers that drift from the nominal
/// columns. A charge that does not parse to a finite number is recorded as `None`.
pub fn read_pdbqt(reader: &mut impl BufRead) -> Result<AnnotationTable, StructureInputError> {
    let mut table = AnnotationTable::default();

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = line_num + 1;

        match slice_and_trim(&line, 0, 6) {
            "ATOM" | "HETATM" => {}
            "ENDMDL" | "END" => break,
            _ => continue,
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(StructureInputError::Parse {
                line: line_num,
                kind: ParseErrorKind::MissingFields {
                    expected: 4,
                    found: fields.len(),
                },
            });
        }
        let atom_name = slice_and_trim(&line, 12, 16);
        if atom_name.is_empty() {
            return Err(StructureInputError::Parse {
                line: line_num,
                kind: ParseErrorKind::MissingRequiredField {
                    columns: "13-16".into(),
                },
            });
        }
        let res_num_str = slice_and_trim(&line, 22, 26);
        let res_num: isize = res_num_str.parse().map_err(|_| StructureInputError::Parse {
            line: line_num,
            kind: ParseErrorKind::InvalidInt {
                columns: "23-26".into(),
                value: res_num_str.into(),
            },
        })?;
        let chain_id = line.get(21..22).and_then(|s| s.chars().next()).unwrap_or(' ');
        let residue = ResidueKey::new(chain_id, res_num, column_char(&line, 26));

        let type_code = fields[fields.len() - 1];
        let partial_charge = fields[fields.len() - 2]
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite());

        table.push(AtomAnnotation {
            key: AtomKey::new(residue, atom_name),
            partial_charge,
            type_code: type_code.to_string(),
        });
    }

    Ok(table)
}

pub fn read_pdbqt_path(path: &Path) -> Result<AnnotationTable, StructureInputError> {
    let mut reader = BufReader::new(File::open(path)?);
    read_pdbqt(&mut reader)
}
