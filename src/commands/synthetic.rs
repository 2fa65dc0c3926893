use super::CommandResult;
use crate::experiments::run_synthetic;
use crate::generator::SyntheticSettings;
use crate::quota::QuotaOptions;
use crate::reports::BatchReport;
use colored::Colorize;
use instant::Instant;
use std::fs;
use std::path::PathBuf;

pub struct SyntheticArgs {
    /// Experiment set 1, 2 or 3; ignored when `config` is given.
    pub set: u8,
    pub config: Option<PathBuf>,
    pub elections: Option<usize>,
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
}

/// Resolve the sampling settings: a JSON file if given, otherwise the preset,
/// with the command-line overrides applied on top.
pub fn resolve_settings(args: &SyntheticArgs) -> Result<SyntheticSettings, Box<dyn std::error::Error>> {
    let mut settings = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
            serde_json::from_str(&text)?
        }
        None => SyntheticSettings::preset(args.set)
            .ok_or_else(|| format!("Unknown experiment set {} (expected 1, 2 or 3)", args.set))?,
    };
    if let Some(elections) = args.elections {
        settings.elections = elections;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    Ok(settings)
}

pub fn synthetic(args: &SyntheticArgs, options: &QuotaOptions) -> CommandResult {
    let settings = resolve_settings(args)?;
    let stem = match args.config {
        Some(_) => "results_synth_custom".to_string(),
        None => format!("results_synth_{}", args.set),
    };

    println!(
        "🚀 Generating {} synthetic elections ({} parties, {} seats, seed {})",
        settings.elections.to_string().bright_cyan(),
        settings.parties,
        settings.seats,
        settings.seed
    );

    let started = Instant::now();
    let results = run_synthetic(&settings, options)?;
    let elapsed = started.elapsed();

    let report = BatchReport::from_results("Synthetic", &results, elapsed.as_millis())
        .with_description(format!(
            "Number of elections: {} | Number of parties: {} | Number of seats: {}",
            settings.elections, settings.parties, settings.seats
        ));
    report.write_to(&args.output_dir, &stem)?;

    println!(
        "✅ Evaluated {} elections ({} skipped) in {:.2} seconds; report written to {}",
        results.evaluated.to_string().bright_green().bold(),
        results.failures.len().to_string().yellow(),
        elapsed.as_secs_f64(),
        args.output_dir
            .join(format!("{}.txt", stem))
            .display()
            .to_string()
            .bright_green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SyntheticArgs {
        SyntheticArgs {
            set: 2,
            config: None,
            elections: None,
            seed: None,
            output_dir: PathBuf::from("out"),
        }
    }

    #[test]
    fn preset_with_overrides() {
        let mut args = args();
        args.elections = Some(4);
        args.seed = Some(99);
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.seats, 100);
        assert_eq!(settings.weight_range, 1..1000);
        assert_eq!((settings.elections, settings.seed), (4, 99));
    }

    #[test]
    fn unknown_set_is_rejected() {
        let mut args = args();
        args.set = 7;
        assert!(resolve_settings(&args).is_err());
    }

    #[test]
    fn config_file_replaces_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"elections": 2, "parties": 3, "seats": 4, "seed": 5,
                "voteRange": {"start": 5, "end": 50},
                "weightRange": {"start": 1, "end": 9}}"#,
        )
        .unwrap();
        let mut args = args();
        args.config = Some(path);
        let settings = resolve_settings(&args).unwrap();
        assert_eq!((settings.parties, settings.seats, settings.seed), (3, 4, 5));
    }

    #[test]
    fn writes_report_for_small_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("settings.json");
        fs::write(
            &config,
            r#"{"elections": 3, "parties": 3, "seats": 5,
                "voteRange": {"start": 5, "end": 50},
                "weightRange": {"start": 1, "end": 10}}"#,
        )
        .unwrap();
        let args = SyntheticArgs {
            set: 1,
            config: Some(config),
            elections: None,
            seed: None,
            output_dir: dir.path().join("results"),
        };

        synthetic(&args, &QuotaOptions::default()).unwrap();

        let text = fs::read_to_string(dir.path().join("results/results_synth_custom.txt")).unwrap();
        assert!(text.contains("Number of elections: 3 | Number of parties: 3 | Number of seats: 5"));
        assert!(text.contains("GREEDY"));
        assert!(dir.path().join("results/results_synth_custom.json").exists());
    }
}
