//! Line-oriented on-disk format for both tiers.
//!
//! Full-fidelity files are one `<timestamp>,<value>` per line, written with
//! append-mode opens only (raw samples never need combining, so there is
//! nothing to read back before writing). Aggregate files are one
//! `<bin_timestamp>,<min>,<max>,<sum>,<count>` per line and are always
//! rewritten whole after merging incoming records with whatever is already
//! on disk, because two `put` calls touching the same bin must combine, not
//! duplicate.
//!
//! Readers tolerate a trailing malformed line: a concurrent writer rewriting
//! an aggregate file can be observed mid-write, which truncates the last
//! line. A line that fails to parse is dropped rather than treated as a
//! hard error, but only at end of file — an unparsable line elsewhere is
//! real corruption and is surfaced.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tlm_core::{AggregateSample, Error, Result, Sample};

use crate::merge::merge_aggregates;

pub fn read_full(path: &Path) -> Result<Vec<Sample>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    parse_lines(&contents, parse_full_line, path)
}

pub fn append_full(path: &Path, samples: &[Sample]) -> Result<()> {
    if samples.is_empty() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut buf = String::new();
    for s in samples {
        buf.push_str(&format!("{},{}\n", s.timestamp, s.value));
    }
    file.write_all(buf.as_bytes())?;
    Ok(())
}

pub fn read_aggregates(path: &Path) -> Result<Vec<AggregateSample>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    parse_lines(&contents, parse_aggregate_line, path)
}

/// Merge `incoming` (sorted, deduped by bin) into whatever is already on
/// disk at `path`, then rewrite the file whole.
pub fn write_aggregates_merged(path: &Path, incoming: &[AggregateSample]) -> Result<()> {
    if incoming.is_empty() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let existing = read_aggregates(path)?;
    let merged = merge_aggregates(&existing, incoming);

    let mut buf = String::new();
    for a in &merged {
        buf.push_str(&format!(
            "{},{},{},{},{}\n",
            a.bin_timestamp, a.min, a.max, a.sum, a.count
        ));
    }
    fs::write(path, buf)?;
    Ok(())
}

fn parse_lines<T>(contents: &str, parse: fn(&str) -> Option<T>, path: &Path) -> Result<Vec<T>> {
    let lines: Vec<&str> = contents.lines().collect();
    let mut out = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        match parse(line) {
            Some(v) => out.push(v),
            None if idx == lines.len() - 1 => {
                // Trailing partial line from a concurrent rewrite; drop it.
            }
            None => {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("malformed line in {}: {:?}", path.display(), line),
                )))
            }
        }
    }
    Ok(out)
}

fn parse_full_line(line: &str) -> Option<Sample> {
    let mut parts = line.splitn(2, ',');
    let ts: f64 = parts.next()?.parse().ok()?;
    let value: f64 = parts.next()?.parse().ok()?;
    Some(Sample::new(ts, value))
}

fn parse_aggregate_line(line: &str) -> Option<AggregateSample> {
    let mut parts = line.split(',');
    let bin_timestamp: i64 = parts.next()?.parse().ok()?;
    let min: f64 = parts.next()?.parse().ok()?;
    let max: f64 = parts.next()?.parse().ok()?;
    let sum: f64 = parts.next()?.parse().ok()?;
    let count: u64 = parts.next()?.parse().ok()?;
    Some(AggregateSample {
        bin_timestamp,
        min,
        max,
        sum,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn full_round_trip_is_append_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("full_file");
        append_full(&path, &[Sample::new(1.0, 7.0)]).unwrap();
        append_full(&path, &[Sample::new(2.0, 8.0)]).unwrap();
        let got = read_full(&path).unwrap();
        assert_eq!(got, vec![Sample::new(1.0, 7.0), Sample::new(2.0, 8.0)]);
    }

    #[test]
    fn missing_full_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope");
        assert!(read_full(&path).unwrap().is_empty());
    }

    #[test]
    fn aggregate_writes_merge_across_calls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agg_file");
        write_aggregates_merged(&path, &[AggregateSample::from_single(0, 7.0)]).unwrap();
        write_aggregates_merged(&path, &[AggregateSample::from_single(0, 10.0)]).unwrap();
        let got = read_aggregates(&path).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].min, 7.0);
        assert_eq!(got[0].max, 10.0);
        assert_eq!(got[0].count, 2);
    }

    #[test]
    fn trailing_partial_line_is_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agg_file");
        fs::write(&path, "0,1.0,1.0,1.0,1\n10,2.0,2.0,2.0,1\n10,2.0,2.0,2") // truncated last line
            .unwrap();
        let got = read_aggregates(&path).unwrap();
        assert_eq!(got.len(), 2);
    }
}
