use super::error::{ParseErrorKind, StructureInputError, column_char, slice_and_trim};
use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::io::{BufRead, Write};

const MIN_COORDINATE_LINE_LEN: usize = 54;

/// Header records kept verbatim so they can be written back out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub header_lines: Vec<String>,
}

/// Protein Data Bank format, fixed-column ATOM/HETATM records.
///
/// Only the first model is read. Alternate locations other than blank or `A` are
/// skipped so each atom appears once.
pub struct PdbFile;

fn parse_float(line: &str, start: usize, end: usize, line_num: usize) -> Result<f64, StructureInputError> {
    let field = slice_and_trim(line, start, end);
    field.parse().map_err(|_| StructureInputError::Parse {
        line: line_num,
        kind: ParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: field.to_string(),
        },
    })
}

fn parse_optional_float(
    line: &str,
    start: usize,
    end: usize,
    default: f64,
    line_num: usize,
) -> Result<f64, StructureInputError> {
    if slice_and_trim(line, start, end).is_empty() {
        Ok(default)
    } else {
        parse_float(line, start, end, line_num)
    }
}

impl MolecularFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = StructureInputError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut system = MolecularSystem::new();
        let mut metadata = PdbMetadata::default();
        let mut atom_count = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = slice_and_trim(&line, 0, 6);

            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_COORDINATE_LINE_LEN {
                        return Err(StructureInputError::Parse {
                            line: line_num,
                            kind: ParseErrorKind::LineTooShort {
                                record: "ATOM/HETATM",
                                min: MIN_COORDINATE_LINE_LEN,
                            },
                        });
                    }
                    if let Some(alt_loc) = column_char(&line, 16) {
                        if alt_loc != 'A' {
                            continue;
                        }
                    }

                    let name = slice_and_trim(&line, 12, 16);
                    if name.is_empty() {
                        return Err(StructureInputError::Parse {
                            line: line_num,
                            kind: ParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let serial_str = slice_and_trim(&line, 6, 11);
                    let serial = serial_str.parse::<usize>().unwrap_or(0);
                    let res_name = slice_and_trim(&line, 17, 20);
                    let chain_id = line.get(21..22).and_then(|s| s.chars().next()).unwrap_or(' ');
                    let res_num_str = slice_and_trim(&line, 22, 26);
                    let res_num: isize = res_num_str.parse().map_err(|_| StructureInputError::Parse {
                        line: line_num,
                        kind: ParseErrorKind::InvalidInt {
                            columns: "23-26".into(),
                            value: res_num_str.into(),
                        },
                    })?;
                    let insertion_code = column_char(&line, 26);

                    let x = parse_float(&line, 30, 38, line_num)?;
                    let y = parse_float(&line, 38, 46, line_num)?;
                    let z = parse_float(&line, 46, 54, line_num)?;
                    let occupancy = parse_optional_float(&line, 54, 60, 1.0, line_num)?;
                    let b_factor = parse_optional_float(&line, 60, 66, 0.0, line_num)?;
                    let element = slice_and_trim(&line, 76, 78);

                    let chain = system.add_chain(chain_id);
                    let is_hetero = record_type == "HETATM";
                    let residue_id = system
                        .add_residue(chain, res_num, insertion_code, res_name, is_hetero)
                        .ok_or_else(|| {
                            StructureInputError::MissingRecord(format!("chain '{}'", chain_id))
                        })?;

                    let mut atom =
                        Atom::new(name, residue_id, Point3::new(x, y, z)).with_element(element);
                    atom.serial = serial;
                    atom.occupancy = occupancy;
                    atom.b_factor = b_factor;
                    system.add_atom_to_residue(residue_id, atom);
                    atom_count += 1;
                }
                "ENDMDL" | "END" => break,
                "MODEL" | "TER" | "CONECT" | "MASTER" | "ANISOU" => {}
                _ if atom_count == 0 && !line.trim().is_empty() => {
                    metadata.header_lines.push(line);
                }
                _ => {}
            }
        }

        if atom_count == 0 {
            return Err(StructureInputError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok((system, metadata))
    }

    fn write_to(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for line in &metadata.header_lines {
            writeln!(writer, "{}", line)?;
        }

        let mut next_serial = 1usize;
        for (_, chain) in system.chains_iter() {
            let mut last = None;
            for &residue_id in chain.residues() {
                let Some(residue) = system.residue(residue_id) else {
                    continue;
                };
                let record_type = if residue.is_hetero { "HETATM" } else { "ATOM" };
                for &atom_id in residue.atoms() {
                    let Some(atom) = system.atom(atom_id) else {
                        continue;
                    };
                    let serial = if atom.serial > 0 { atom.serial } else { next_serial };
                    next_serial = serial + 1;
                    writeln!(
                        writer,
                        "{:<6}{:>5} {:<4} {:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                        record_type,
                        serial,
                        format_atom_name(&atom.name, &atom.element),
                        residue.name,
                        chain.id,
                        residue.residue_number,
                        residue.insertion_code.unwrap_or(' '),
                        atom.position.x,
                        atom.position.y,
                        atom.position.z,
                        atom.occupancy,
                        atom.b_factor,
                        atom.element,
                    )?;
                    last = Some((serial, residue));
                }
            }
            if let Some((serial, residue)) = last {
                writeln!(
                    writer,
                    "TER   {:>5}      {:>3} {}{:>4}{}",
                    serial + 1,
                    residue.name,
                    chain.id,
                    residue.residue_number,
                    residue.insertion_code.unwrap_or(' '),
                )?;
                next_serial = serial + 2;
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}

/// Aligns an atom name in the 4-character PDB field: one-letter elements start in the
/// second column ("CA" -> " CA "), four-character names and two-letter elements fill it.
fn format_atom_name(name: &str, element: &str) -> String {
    if name.len() >= 4 || element.len() == 2 {
        format!("{:<4}", name)
    } else {
        format!(" {:<3}", name)
    }
}
