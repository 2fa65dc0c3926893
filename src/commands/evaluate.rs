use super::CommandResult;
use crate::experiments::{evaluate_sources, AssignmentSource};
use crate::formats::historical::load_election;
use crate::methods::{describe_assignments, AssignmentMethod};
use crate::quota::{compute_quotas, QuotaOptions};
use colored::Colorize;
use itertools::Itertools;
use std::path::Path;

/// Print one historical election with its quotas, every method's
/// assignment and the axiom report of each.
pub fn evaluate(data_dir: &Path, id: u32, options: &QuotaOptions) -> CommandResult {
    let election = load_election(data_dir, id)?;
    let instance = &election.instance;

    println!(
        "📋 Election {}: {} parties, {} seats",
        id.to_string().bright_cyan(),
        instance.num_parties(),
        instance.num_seats()
    );
    for (label, votes) in election.parties.iter().zip(instance.votes()) {
        println!("  {:<24} {}", label, votes);
    }
    println!(
        "  Weights: [{}]",
        instance.weights().iter().map(|w| w.to_string()).join(", ")
    );

    let quotas = compute_quotas(instance, options)?;
    println!("  Weight quotas: [{}]", quotas.weight.iter().map(|q| format!("{:.2}", q)).join(", "));
    println!("  Lower quotas:  [{}]", quotas.lower.iter().join(", "));
    println!("  Upper quotas:  [{}]", quotas.upper.iter().join(", "));

    println!("\n{}", describe_assignments(instance));
    println!("Recorded --> {}", election.assignment);

    let mut sources = vec![AssignmentSource::Recorded];
    sources.extend(AssignmentMethod::ALL.iter().map(|&m| AssignmentSource::Method(m)));
    let reports = evaluate_sources(instance, Some(&election.assignment), &sources, options)?;

    for (source, report) in sources.iter().zip(&reports) {
        println!("\n{}", format!("📊 {}", source.name()).bold());
        print!("{}", report);
    }
    Ok(())
}
