//! Aggregated results of a batch run, rendered to text or JSON.

use crate::axioms::{AxiomValue, AXIOM_NAMES};
use crate::experiments::BatchResults;
use crate::util::write_serialized;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Positions in [`crate::axioms::AxiomReport::values`] of the satisfaction
/// axioms, in the order they are listed in a report.
const LISTED_AXIOMS: [usize; 9] = [0, 1, 11, 2, 3, 4, 5, 9, 10];

/// Positions of the three distances.
const LISTED_DISTANCES: [usize; 3] = [6, 7, 8];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxiomRate {
    pub axiom: String,
    /// Share of the evaluated elections satisfying the axiom, in percent,
    /// rounded to two decimals.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceSummary {
    pub distance: String,
    pub values: Vec<f64>,
    pub max: f64,
    /// Rounded to one decimal.
    pub median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSummary {
    pub method: String,
    pub satisfaction: Vec<AxiomRate>,
    pub distances: Vec<DistanceSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureEntry {
    pub label: String,
    pub error: String,
}

/// Everything written for one batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    /// Free-form line describing the batch, e.g. the synthetic dimensions.
    pub description: Option<String>,
    pub elections: usize,
    pub evaluated: usize,
    pub duration_ms: u128,
    pub summaries: Vec<MethodSummary>,
    pub failures: Vec<FailureEntry>,
}

impl BatchReport {
    pub fn from_results(title: &str, results: &BatchResults, duration_ms: u128) -> Self {
        let summaries = results
            .sources
            .iter()
            .zip(&results.reports)
            .map(|(source, reports)| {
                summarize_method(source.name(), reports.iter().map(|report| report.values()))
            })
            .collect();

        BatchReport {
            title: title.to_string(),
            generated_at: Utc::now(),
            description: None,
            elections: results.evaluated + results.failures.len(),
            evaluated: results.evaluated,
            duration_ms,
            summaries,
            failures: results
                .failures
                .iter()
                .map(|failure| FailureEntry {
                    label: failure.label.clone(),
                    error: failure.error.clone(),
                })
                .collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Write `<stem>.txt` and `<stem>.json` into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path, stem: &str) -> ReportResult<()> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(format!("{}.txt", stem)), self.to_string())?;
        write_serialized(&dir.join(format!("{}.json", stem)), self)?;
        Ok(())
    }
}

/// Fold the per-election result vectors of one method into a summary.
pub fn summarize_method(
    method: &str,
    vectors: impl Iterator<Item = [AxiomValue; 12]>,
) -> MethodSummary {
    let mut satisfied = [0usize; 12];
    let mut distances: [Vec<f64>; 12] = Default::default();
    let mut count = 0;

    for values in vectors {
        count += 1;
        for (i, value) in values.iter().enumerate() {
            match *value {
                AxiomValue::Satisfied(true) => satisfied[i] += 1,
                AxiomValue::Satisfied(false) => {}
                AxiomValue::Distance(d) => distances[i].push(d),
            }
        }
    }

    MethodSummary {
        method: method.to_string(),
        satisfaction: LISTED_AXIOMS
            .iter()
            .map(|&i| AxiomRate {
                axiom: AXIOM_NAMES[i].to_string(),
                percent: percentage(satisfied[i], count),
            })
            .collect(),
        distances: LISTED_DISTANCES
            .iter()
            .map(|&i| {
                let values = std::mem::take(&mut distances[i]);
                DistanceSummary {
                    distance: AXIOM_NAMES[i].to_string(),
                    max: values.iter().copied().fold(0.0, f64::max),
                    median: round_to(median(&values), 1),
                    values,
                }
            })
            .collect(),
    }
}

fn percentage(hits: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round_to(hits as f64 * 100.0 / count as f64, 2)
}

/// Middle value, or the mean of the two middle values; 0 when empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl fmt::Display for MethodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "-".repeat(39);
        writeln!(f, "{}{}{}", banner, self.method.to_uppercase(), banner)?;
        for rate in &self.satisfaction {
            writeln!(f, "{} provided in {:?}% of the instances.", rate.axiom, rate.percent)?;
        }
        for distance in &self.distances {
            writeln!(
                f,
                "\n{}: [{}]",
                distance.distance,
                distance.values.iter().map(|v| format!("{:.1}", v)).join(", ")
            )?;
            writeln!(
                f,
                "Max {}: {:.1}, Median {}: {:.1}",
                distance.distance, distance.max, distance.distance, distance.median
            )?;
        }
        writeln!(f, "\n{}\n", "-".repeat(89))
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} results for the following seat assignments: {}.",
            self.title,
            self.summaries.iter().map(|s| s.method.as_str()).join(", ")
        )?;
        writeln!(f, "Generated at {}\n", self.generated_at.to_rfc3339())?;
        if let Some(description) = &self.description {
            writeln!(f, "{}\n", description)?;
        }
        writeln!(
            f,
            "Evaluated {} of {} elections in {} ms.\n",
            self.evaluated, self.elections, self.duration_ms
        )?;
        for summary in &self.summaries {
            write!(f, "{}", summary)?;
        }
        if !self.failures.is_empty() {
            writeln!(f, "Skipped elections:")?;
            for failure in &self.failures {
                writeln!(f, "  {}: {}", failure.label, failure.error)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axioms::AxiomReport;
    use crate::experiments::{AssignmentSource, InstanceFailure};
    use crate::methods::AssignmentMethod;

    fn report(wlq_o: bool, to_wq: f64) -> AxiomReport {
        AxiomReport {
            wlq_o,
            wlq_x: true,
            wlq_1: true,
            wuq_o: false,
            wuq_x: true,
            wuq_1: true,
            avg_dist_to_wq: to_wq,
            avg_dist_below_wlq: 0.0,
            avg_dist_above_wuq: 0.0,
            wef_x: true,
            wef_1: true,
            wlq_x_r: wlq_o,
        }
    }

    #[test]
    fn median_of_odd_and_even_lengths() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn summarizes_rates_and_distances() {
        let reports = vec![report(true, 0.5), report(false, 1.2), report(true, 0.2)];
        let summary = summarize_method("Greedy", reports.iter().map(|r| r.values()));

        let wlq_o = &summary.satisfaction[0];
        assert_eq!(wlq_o.axiom, "WLQo");
        assert_eq!(wlq_o.percent, 66.67);
        assert_eq!(summary.satisfaction[2].axiom, "WLQ-X-r");
        assert_eq!(summary.satisfaction[4].percent, 0.0);
        assert_eq!(summary.satisfaction[5].percent, 100.0);

        let to_wq = &summary.distances[0];
        assert_eq!(to_wq.values, vec![0.5, 1.2, 0.2]);
        assert_eq!(to_wq.max, 1.2);
        assert_eq!(to_wq.median, 0.5);
    }

    #[test]
    fn median_is_rounded_to_one_decimal() {
        let reports = vec![report(true, 0.1), report(true, 0.4)];
        let summary = summarize_method("Adams", reports.iter().map(|r| r.values()));
        // (0.1 + 0.4) / 2 = 0.25
        assert_eq!(summary.distances[0].median, 0.3);
    }

    #[test]
    fn empty_batch_reports_zeroes() {
        let summary = summarize_method("Adams", std::iter::empty());
        assert!(summary.satisfaction.iter().all(|rate| rate.percent == 0.0));
        assert!(summary.distances.iter().all(|d| d.max == 0.0 && d.median == 0.0));
    }

    fn results() -> BatchResults {
        BatchResults {
            sources: vec![
                AssignmentSource::Recorded,
                AssignmentSource::Method(AssignmentMethod::Greedy),
            ],
            reports: vec![vec![report(false, 2.0)], vec![report(true, 0.0)]],
            evaluated: 1,
            failures: vec![InstanceFailure {
                label: "election 3".to_string(),
                error: "Invalid input: all parties have zero votes".to_string(),
            }],
        }
    }

    #[test]
    fn renders_text_in_report_layout() {
        let text = BatchReport::from_results("Bundestag", &results(), 12).to_string();

        assert!(text.starts_with(
            "Bundestag results for the following seat assignments: Bundestag, Greedy."
        ));
        assert!(text.contains("BUNDESTAG"));
        assert!(text.contains("WLQo provided in 0.0% of the instances."));
        assert!(text.contains("WLQo provided in 100.0% of the instances."));
        assert!(text.contains("Max AvgDistToWQ: 2.0, Median AvgDistToWQ: 2.0"));
        assert!(text.contains("Evaluated 1 of 2 elections"));
        assert!(text.contains("election 3: Invalid input"));
    }

    #[test]
    fn writes_text_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let report = BatchReport::from_results("Synthetic", &results(), 5)
            .with_description("Number of elections: 1");
        report.write_to(dir.path(), "results").unwrap();

        let json: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("results.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(json["evaluated"], 1);
        assert_eq!(json["summaries"][1]["method"], "Greedy");
        assert_eq!(json["summaries"][1]["satisfaction"][0]["percent"], 100.0);

        let text = fs::read_to_string(dir.path().join("results.txt")).unwrap();
        assert!(text.contains("Number of elections: 1"));
    }
}
