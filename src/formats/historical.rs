//! Reader for historical committee records.
//!
//! Each election lives in its own directory named by an integer id:
//!
//! ```text
//! <root>/<id>/german_parliament_<id>.txt   # "<party label>:<votes>" per line
//! <root>/<id>/bundestag_<id>.txt           # "<seat weight>:<party, 1-based>" per line
//! ```
//!
//! Lines are trimmed; empty or single-character lines and lines starting
//! with `#` are skipped.

use super::{FormatError, Result};
use crate::model::{ElectionInstance, PartyId, SeatAssignment};
use nom::character::complete::{char, digit1, space0};
use nom::combinator::{all_consuming, map_res};
use nom::number::complete::double;
use nom::sequence::{delimited, separated_pair};
use nom::IResult;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A recorded election: the votes, the seats and who actually got them.
#[derive(Debug, Clone, Serialize)]
pub struct HistoricalElection {
    pub id: u32,
    /// Party labels, in the order of `instance.votes()`.
    pub parties: Vec<String>,
    pub instance: ElectionInstance,
    pub assignment: SeatAssignment,
}

pub fn votes_path(root: &Path, id: u32) -> PathBuf {
    root.join(id.to_string())
        .join(format!("german_parliament_{}.txt", id))
}

pub fn seats_path(root: &Path, id: u32) -> PathBuf {
    root.join(id.to_string()).join(format!("bundestag_{}.txt", id))
}

/// Ids of the election directories under `root`, ascending.
pub fn discover_elections(root: &Path) -> Result<Vec<u32>> {
    let entries = fs::read_dir(root).map_err(|source| FormatError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut ids = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| FormatError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(id) = entry.file_name().to_str().and_then(|n| n.parse().ok()) {
            ids.push(id);
        }
    }
    ids.sort_unstable();
    Ok(ids)
}

/// Load one election. Parties are reordered by non-increasing votes (ties
/// keep file order) and the recorded seat holders are relabelled to match.
pub fn load_election(root: &Path, id: u32) -> Result<HistoricalElection> {
    let votes_file = votes_path(root, id);
    let seats_file = seats_path(root, id);

    let parties: Vec<(String, u64)> = read_records(&votes_file, parse_vote_line)?
        .into_iter()
        .map(|(_, party)| party)
        .collect();
    let seats = read_records(&seats_file, parse_seat_line)?;

    for &(line, (_, party)) in &seats {
        if party >= parties.len() {
            return Err(FormatError::Parse {
                path: seats_file.clone(),
                line,
                message: format!(
                    "seat held by party {} but only {} parties are listed",
                    party + 1,
                    parties.len()
                ),
            });
        }
    }

    let mut order: Vec<PartyId> = (0..parties.len()).collect();
    order.sort_by(|&a, &b| parties[b].1.cmp(&parties[a].1));
    let mut relabel = vec![0; parties.len()];
    for (new, &old) in order.iter().enumerate() {
        relabel[old] = new;
    }

    let labels = order.iter().map(|&p| parties[p].0.clone()).collect();
    let votes: Vec<u64> = order.iter().map(|&p| parties[p].1).collect();
    let seats: Vec<(f64, Option<PartyId>)> = seats
        .into_iter()
        .map(|(_, (weight, party))| (weight, Some(relabel[party])))
        .collect();

    let (instance, assignment) = ElectionInstance::with_assignment(&votes, &seats)?;
    Ok(HistoricalElection {
        id,
        parties: labels,
        instance,
        assignment,
    })
}

/// Parse every meaningful line of `path`, paired with its 1-based line
/// number. The parser gets the trimmed line and reports a message on failure.
fn read_records<T>(
    path: &Path,
    parse: fn(&str) -> std::result::Result<T, String>,
) -> Result<Vec<(usize, T)>> {
    let text = fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.len() <= 1 || line.starts_with('#') {
            continue;
        }
        let record = parse(line).map_err(|message| FormatError::Parse {
            path: path.to_path_buf(),
            line: number + 1,
            message,
        })?;
        records.push((number + 1, record));
    }
    Ok(records)
}

fn vote_count(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |digits: &str| digits.parse::<u64>())(input)
}

fn party_number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>())(input)
}

fn padded<'a, O>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(space0, parser, space0)
}

/// `"<label>:<votes>"`; the count follows the last colon. A line without a
/// colon is a bare count.
pub fn parse_vote_line(line: &str) -> std::result::Result<(String, u64), String> {
    let (label, count) = match line.rfind(':') {
        Some(split) => (line[..split].trim(), &line[split + 1..]),
        None => ("", line),
    };
    let (_, votes) = all_consuming(padded(vote_count))(count)
        .map_err(|_| format!("expected a vote count, found {:?}", count.trim()))?;
    Ok((label.to_string(), votes))
}

/// `"<weight>:<party>"` with a 1-based party number; returns the 0-based index.
pub fn parse_seat_line(line: &str) -> std::result::Result<(f64, PartyId), String> {
    let (_, (weight, party)) =
        all_consuming(separated_pair(padded(double), char(':'), padded(party_number)))(line)
            .map_err(|_| format!("expected \"<weight>:<party>\", found {:?}", line))?;
    if party == 0 {
        return Err("party numbers start at 1".to_string());
    }
    Ok((weight, party - 1))
}
