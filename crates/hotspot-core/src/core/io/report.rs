use crate::core::models::ids::ResidueKey;
use crate::core::models::records::{ComplexEnergy, MutationRecord, ResidueEnergyRecord};
use std::io::Write;
use std::path::Path;

const ENERGY_HEADER: [&str; 9] = [
    "Chain",
    "Residue",
    "Insertion",
    "Name",
    "ΔG_elec",
    "ΔG_vdw",
    "ΔG_solv",
    "ΔG_total",
    "SASA known",
];

const SCAN_HEADER: [&str; 5] = ["Chain", "Residue", "Insertion", "Mutation", "ΔΔG"];

fn fmt_energy(value: f64) -> String {
    format!("{:.4}", value)
}

fn key_fields(key: &ResidueKey) -> [String; 3] {
    [
        key.chain_id.to_string(),
        key.residue_number.to_string(),
        key.insertion_code.map(String::from).unwrap_or_default(),
    ]
}

/// Writes the per-residue energy table followed by a `TOTAL(X-Y)` row.
pub fn write_energy_table(
    writer: impl Write,
    records: &[ResidueEnergyRecord],
    total: &ComplexEnergy,
    chains: (char, char),
) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(ENERGY_HEADER)?;

    for record in records {
        let [chain, number, insertion] = key_fields(&record.key);
        csv.write_record([
            chain,
            number,
            insertion,
            record.residue_name.clone(),
            fmt_energy(record.elec),
            fmt_energy(record.vdw),
            fmt_energy(record.solv),
            fmt_energy(record.total),
            record.sasa_known.to_string(),
        ])?;
    }

    csv.write_record([
        format!("TOTAL({}-{})", chains.0, chains.1),
        String::new(),
        String::new(),
        String::new(),
        fmt_energy(total.elec),
        fmt_energy(total.vdw),
        fmt_energy(total.solv),
        fmt_energy(total.total),
        String::new(),
    ])?;
    csv.flush()?;
    Ok(())
}

pub fn write_energy_table_to_path(
    path: &Path,
    records: &[ResidueEnergyRecord],
    total: &ComplexEnergy,
    chains: (char, char),
) -> csv::Result<()> {
    let file = std::fs::File::create(path)?;
    write_energy_table(file, records, total, chains)
}

/// Writes one row per scanned residue with its ΔΔG.
pub fn write_scan_table(writer: impl Write, records: &[MutationRecord]) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(SCAN_HEADER)?;
    for record in records {
        let [chain, number, insertion] = key_fields(&record.key);
        csv.write_record([
            chain,
            number,
            insertion,
            record.label.clone(),
            fmt_energy(record.ddg),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_scan_table_to_path(path: &Path, records: &[MutationRecord]) -> csv::Result<()> {
    let file = std::fs::File::create(path)?;
    write_scan_table(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::term::EnergyTerm;
    use tempfile::tempdir;

    fn records() -> Vec<ResidueEnergyRecord> {
        vec![
            ResidueEnergyRecord::new(
                ResidueKey::new('A', 42, Some('B')),
                "GLN",
                EnergyTerm::new(-1.25, -0.5),
                0.125,
                true,
            ),
            ResidueEnergyRecord::new(
                ResidueKey::new('E', 505, None),
                "TYR",
                EnergyTerm::new(-1.25, -0.5),
                0.0,
                false,
            ),
        ]
    }

    #[test]
    fn energy_table_has_header_rows_and_total() {
        let mut out = Vec::new();
        let total = ComplexEnergy::new(EnergyTerm::new(-1.25, -0.5), 0.125);
        write_energy_table(&mut out, &records(), &total, ('A', 'E')).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Chain,Residue,Insertion,Name,ΔG_elec,ΔG_vdw,ΔG_solv,ΔG_total,SASA known"
        );
        assert_eq!(lines[1], "A,42,B,GLN,-1.2500,-0.5000,0.1250,-1.6250,true");
        assert_eq!(lines[2], "E,505,,TYR,-1.2500,-0.5000,0.0000,-1.7500,false");
        assert_eq!(lines[3], "TOTAL(A-E),,,,-1.2500,-0.5000,0.1250,-1.6250,");
    }

    #[test]
    fn scan_table_lists_mutations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ddg.csv");
        let records = vec![MutationRecord {
            key: ResidueKey::new('E', 417, None),
            label: "KE417A".to_string(),
            ddg: 1.5,
        }];
        write_scan_table_to_path(&path, &records).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(3), Some("Mutation"));
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(0), Some("E"));
        assert_eq!(rows[0].get(3), Some("KE417A"));
        assert_eq!(rows[0].get(4), Some("1.5000"));
    }
}
