use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use weighted_seats::commands::{evaluate, real_world, synthetic, SyntheticArgs};
use weighted_seats::quota::QuotaOptions;

#[derive(Parser)]
#[clap(version, about = "Evaluate weighted seat assignments against proportionality axioms")]
struct Opts {
    /// Wall-clock limit in seconds for each quota computation
    #[clap(long, global = true)]
    time_limit: Option<u64>,
    /// Largest knapsack table a single quota solve may allocate
    #[clap(long, global = true)]
    max_table_cells: Option<u64>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate recorded committee assignments of historical elections
    RealWorld {
        /// Directory holding one numbered directory per election
        data_dir: PathBuf,
        /// First election id to evaluate
        #[clap(long, default_value = "1")]
        first: u32,
        /// Last election id to evaluate
        #[clap(long, default_value = "20")]
        last: u32,
        /// Report output directory
        #[clap(long, default_value = "experiment_results")]
        output: PathBuf,
    },
    /// Evaluate the assignment methods on generated elections
    Synthetic {
        /// Experiment set (1, 2 or 3)
        #[clap(long, default_value = "1")]
        set: u8,
        /// Override the number of elections
        #[clap(long)]
        elections: Option<usize>,
        /// Override the random seed
        #[clap(long)]
        seed: Option<u64>,
        /// JSON file with sampling settings, used instead of the set
        #[clap(long)]
        config: Option<PathBuf>,
        /// Report output directory
        #[clap(long, default_value = "experiment_results")]
        output: PathBuf,
    },
    /// Print quotas, assignments and axioms for one historical election
    Evaluate {
        /// Directory holding one numbered directory per election
        data_dir: PathBuf,
        /// Election id
        id: u32,
    },
}

fn main() {
    let opts = Opts::parse();

    let mut options = QuotaOptions::default();
    options.time_limit = opts.time_limit.map(Duration::from_secs);
    if let Some(cells) = opts.max_table_cells {
        options.max_table_cells = cells;
    }

    let outcome = match opts.command {
        Command::RealWorld {
            data_dir,
            first,
            last,
            output,
        } => real_world(&data_dir, first, last, &output, &options),
        Command::Synthetic {
            set,
            elections,
            seed,
            config,
            output,
        } => synthetic(
            &SyntheticArgs {
                set,
                config,
                elections,
                seed,
                output_dir: output,
            },
            &options,
        ),
        Command::Evaluate { data_dir, id } => evaluate(&data_dir, id, &options),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
