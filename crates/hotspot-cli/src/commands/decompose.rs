use crate::cli::DecomposeArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use hotspot::{engine::progress::ProgressReporter, workflows};
use tracing::{info, warn};

pub fn run(args: DecomposeArgs, progress: &CliProgressHandler) -> Result<()> {
    let partial_config = PartialConfig::load(&args.input)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args.input)?;

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    println!(
        "Decomposing binding energy of chains {} and {}...",
        config.analysis.chain_x, config.analysis.chain_y
    );
    let report = workflows::decompose::run(&config, &reporter)?;

    let diag = &report.diagnostics;
    println!(
        "Annotated {} atoms ({} heavy), total charge {:+.3} e.",
        diag.atom_count, diag.heavy_atom_count, diag.total_charge
    );
    if diag.has_gaps() {
        warn!("Input data has gaps; see the warnings above for details.");
        println!(
            "Warning: {} missing charge(s), {} unknown type(s), {}/{} missing bound/unbound SASA.",
            diag.missing_charges,
            diag.unknown_type_substitutions,
            diag.missing_bound_sasa,
            diag.missing_unbound_sasa
        );
    }

    workflows::decompose::write_energy_report(&report.analysis, &config.analysis, &args.output)?;

    let total = &report.analysis.decomposition.total;
    println!(
        "✓ {} interface residue(s). ΔG_total = {:.4} kcal/mol (elec {:.4}, vdw {:.4}, solv {:.4}).",
        report.analysis.interface.len(),
        total.total,
        total.elec,
        total.vdw,
        total.solv
    );
    println!("  Energy table written to: {}", args.output.display());
    Ok(())
}
