use super::CommandResult;
use crate::experiments::run_historical;
use crate::quota::QuotaOptions;
use crate::reports::BatchReport;
use colored::Colorize;
use instant::Instant;
use std::path::Path;

/// Evaluate the recorded assignments of the historical elections with ids
/// in `first..=last`, next to every assignment method.
pub fn real_world(
    data_dir: &Path,
    first: u32,
    last: u32,
    output_dir: &Path,
    options: &QuotaOptions,
) -> CommandResult {
    if !data_dir.exists() {
        return Err(format!("Data directory does not exist: {}", data_dir.display()).into());
    }
    if first > last {
        return Err(format!("Empty election range: {}..={}", first, last).into());
    }

    println!(
        "🚀 Evaluating historical elections {}..={} from {}",
        first.to_string().bright_cyan(),
        last.to_string().bright_cyan(),
        data_dir.display().to_string().bright_cyan()
    );

    let started = Instant::now();
    let results = run_historical(data_dir, first..=last, options)?;
    let elapsed = started.elapsed();

    if results.evaluated == 0 && results.failures.is_empty() {
        eprintln!("⚠️  No election directories found in that range");
    }

    let report = BatchReport::from_results("Bundestag", &results, elapsed.as_millis());
    report.write_to(output_dir, "bundestag_results")?;

    println!(
        "✅ Evaluated {} elections ({} skipped) in {:.2} seconds; report written to {}",
        results.evaluated.to_string().bright_green().bold(),
        results.failures.len().to_string().yellow(),
        elapsed.as_secs_f64(),
        output_dir.join("bundestag_results.txt").display().to_string().bright_green()
    );
    Ok(())
}
