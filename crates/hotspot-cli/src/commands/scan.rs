use crate::cli::ScanArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use hotspot::core::models::records::MutationRecord;
use hotspot::{engine::progress::ProgressReporter, workflows};
use tracing::info;

const HOT_SPOTS_SHOWN: usize = 5;

pub fn run(args: ScanArgs, progress: &CliProgressHandler) -> Result<()> {
    let config = PartialConfig::load(&args.input)?.merge_with_cli(&args.input)?;

    info!("Loading and annotating the wild-type complex...");
    let (system, _diagnostics) = workflows::decompose::load_annotated_system(&config)?;

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    println!("Starting alanine scan...");
    let report = workflows::scan::run(&system, &config.analysis, &reporter)?;

    workflows::scan::write_scan_report(&report.mutations, &args.output)?;
    if let Some(path) = &args.pdb_output {
        workflows::scan::write_annotated_structure(&system, &report.mutations, path)?;
    }

    println!(
        "✓ Scanned {} residue(s). Wild-type ΔG_total = {:.4} kcal/mol.",
        report.mutations.len(),
        report.wild_type.decomposition.total.total
    );
    for record in hot_spots(&report.mutations) {
        println!("  {:<10} ΔΔG = {:+.4} kcal/mol", record.label, record.ddg);
    }
    println!("  ΔΔG table written to: {}", args.output.display());
    if let Some(path) = &args.pdb_output {
        println!("  Annotated structure written to: {}", path.display());
    }
    Ok(())
}

/// The mutations that destabilize binding the most, largest ΔΔG first.
fn hot_spots(records: &[MutationRecord]) -> Vec<&MutationRecord> {
    let mut sorted: Vec<&MutationRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.ddg.total_cmp(&a.ddg));
    sorted.truncate(HOT_SPOTS_SHOWN);
    sorted
}
