use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tlm_core::{
    validate_dataset_id, wallclock, AggregateSample, Error, Fidelity, IngestPoint, QueryPoint,
    Result, Sample,
};
use tlm_engine::{aggregate_samples, bin_items, codec, enumerate_shards};

use crate::registry;

/// The multi-fidelity on-disk telemetry index.
///
/// `put` fans a batch of samples out into a full-fidelity log plus six
/// pre-aggregated down-sampled layers; `get` selects the coarsest tier that
/// still yields a useful number of points for the requested window and
/// concatenates whatever shards cover it. Single-writer, many-reader: see
/// the crate-level docs for the concurrency caveats around aggregate-tier
/// read-modify-write.
pub struct Index {
    data_root: PathBuf,
    num_puts: AtomicU64,
    num_gets: AtomicU64,
}

impl Index {
    /// Open (creating if absent) an index rooted at `base_path/data`.
    pub fn open<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let data_root = base_path.as_ref().join("data");
        if data_root.exists() && !data_root.is_dir() {
            return Err(Error::StoreNotDirectory(data_root));
        }
        fs::create_dir_all(&data_root)?;
        Ok(Self {
            data_root,
            num_puts: AtomicU64::new(0),
            num_gets: AtomicU64::new(0),
        })
    }

    pub fn num_puts(&self) -> u64 {
        self.num_puts.load(Ordering::Relaxed)
    }

    pub fn num_gets(&self) -> u64 {
        self.num_gets.load(Ordering::Relaxed)
    }

    /// Ingest a batch of points for `dataset_id`, fanning out to every
    /// fidelity tier. Samples are sorted ascending by timestamp (stable on
    /// ties) before any I/O happens; a failure partway through a tier leaves
    /// earlier tiers durably written — there is no rollback.
    ///
    /// Not safe for concurrent writers: aggregate tiers read the existing
    /// file, merge, and rewrite it whole, so two overlapping `put` calls
    /// touching the same dataset/tier/bin can lose an update. Callers that
    /// need multi-writer safety must serialize `put` per dataset themselves.
    pub fn put(&self, dataset_id: &str, points: &[IngestPoint]) -> Result<()> {
        validate_dataset_id(dataset_id)?;

        let mut samples: Vec<Sample> = points
            .iter()
            .map(|p| wallclock::parse_local(&p.date).map(|ts| Sample::new(ts, p.value)))
            .collect::<Result<Vec<_>>>()?;
        samples.sort_by(|a, b| a.timestamp.partial_cmp(&b.timestamp).unwrap());

        self.write_full_tier(dataset_id, &samples)?;
        for tier in Fidelity::AGGREGATED {
            self.write_aggregate_tier(dataset_id, tier, &samples)?;
        }

        self.num_puts.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn write_full_tier(&self, dataset_id: &str, samples: &[Sample]) -> Result<()> {
        let tier = Fidelity::Full;
        let groups = bin_items(samples, tier.file_span() as i64, |s| s.timestamp as i64);
        for group in groups {
            let path = tlm_engine::shard_path(
                &self.data_root,
                tier,
                dataset_id,
                group.group_timestamp,
            )?;
            codec::append_full(&path, &group.items)?;
        }
        Ok(())
    }

    fn write_aggregate_tier(&self, dataset_id: &str, tier: Fidelity, samples: &[Sample]) -> Result<()> {
        let period = tier.agg_period().expect("aggregated tier has a period");
        let aggregates = aggregate_samples(samples, period as i64);
        if aggregates.is_empty() {
            return Ok(());
        }
        let groups = bin_items(&aggregates, tier.file_span() as i64, |a| a.bin_timestamp);
        for group in groups {
            let path = tlm_engine::shard_path(
                &self.data_root,
                tier,
                dataset_id,
                group.group_timestamp,
            )?;
            codec::write_aggregates_merged(&path, &group.items)?;
        }
        Ok(())
    }

    /// Query `dataset_id` for the window `[start, end]` (ISO-8601 local-time
    /// date strings). When `fidelity` is omitted, the coarsest tier that
    /// still yields a useful point count is selected automatically. Results
    /// are the concatenation of whatever shards cover the window, in
    /// shard-enumeration order — not guaranteed globally sorted.
    pub fn get(
        &self,
        dataset_id: &str,
        start: &str,
        end: &str,
        fidelity: Option<Fidelity>,
    ) -> Result<Vec<QueryPoint>> {
        validate_dataset_id(dataset_id)?;
        let start_secs = wallclock::parse_local(start)?;
        let end_secs = wallclock::parse_local(end)?;

        let tier = fidelity.unwrap_or_else(|| Fidelity::recommended(end_secs - start_secs));
        let paths = enumerate_shards(
            &self.data_root,
            tier,
            dataset_id,
            start_secs as i64,
            end_secs as i64,
        )?;

        let mut out = Vec::new();
        for path in paths {
            match tier {
                Fidelity::Full => {
                    for sample in codec::read_full(&path)? {
                        out.push(QueryPoint::Raw {
                            date: wallclock::format_local(sample.timestamp),
                            value: sample.value,
                        });
                    }
                }
                _ => {
                    for agg in codec::read_aggregates(&path)? {
                        out.push(aggregate_to_query_point(agg));
                    }
                }
            }
        }

        self.num_gets.fetch_add(1, Ordering::Relaxed);
        Ok(out)
    }

    /// List dataset ids containing `query` as a substring, at most `max`.
    pub fn datasets(&self, query: &str, max: usize) -> Vec<String> {
        let full_root = self.data_root.join(Fidelity::Full.dir_name());
        registry::list_datasets(&full_root, query, max)
    }
}

fn aggregate_to_query_point(agg: AggregateSample) -> QueryPoint {
    QueryPoint::Aggregate {
        date: wallclock::format_local(agg.bin_timestamp as f64),
        min: agg.min,
        mean: agg.mean(),
        max: agg.max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open() -> (TempDir, Index) {
        let dir = TempDir::new().unwrap();
        let idx = Index::open(dir.path()).unwrap();
        (dir, idx)
    }

    #[test]
    fn s3_empty_before_any_put() {
        let (_dir, idx) = open();
        let got = idx
            .get("ds", "2024-01-01T00:00:00", "2024-01-01T01:00:00", None)
            .unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn s6_invalid_ids_rejected_before_any_io() {
        let (dir, idx) = open();
        let points = [IngestPoint::new("2024-01-01T00:00:00", 1.0)];
        for bad in ["a/b", "..", "x y"] {
            assert!(idx.put(bad, &points).is_err());
        }
        let full_root = dir.path().join("data").join("full");
        assert!(!full_root.exists() || fs::read_dir(&full_root).unwrap().next().is_none());
    }

    #[test]
    fn s1_basic_round_trip_full_tier() {
        let (_dir, idx) = open();
        let points = vec![
            IngestPoint::new("2024-01-01T01:00:00", 7.0),
            IngestPoint::new("2024-01-01T01:01:00", 8.0),
            IngestPoint::new("2024-01-01T02:00:00", 9.0),
            IngestPoint::new("2024-01-01T02:30:00", 10.0),
            IngestPoint::new("2024-01-01T02:30:01", 11.5),
            IngestPoint::new("2024-01-01T03:00:00", 10.0),
            IngestPoint::new("2024-01-01T03:00:00.100000", 9.0),
            IngestPoint::new("2024-01-01T03:00:00.200000", 8.0),
            IngestPoint::new("2024-01-01T03:00:00.300000", 7.0),
        ];
        idx.put("ds", &points).unwrap();

        let got = idx
            .get(
                "ds",
                "2024-01-01T00:50:00",
                "2024-01-01T03:30:00",
                Some(Fidelity::Full),
            )
            .unwrap();
        assert_eq!(got.len(), 9);
    }

    #[test]
    fn s2_aggregate_combines_across_puts() {
        let (_dir, idx) = open();
        idx.put(
            "ds",
            &[
                IngestPoint::new("2024-01-01T03:00:00.000000", 7.0),
                IngestPoint::new("2024-01-01T03:00:00.100000", 8.0),
            ],
        )
        .unwrap();
        idx.put(
            "ds",
            &[
                IngestPoint::new("2024-01-01T03:00:00.200000", 9.0),
                IngestPoint::new("2024-01-01T03:00:00.300000", 10.0),
            ],
        )
        .unwrap();
        idx.put(
            "ds",
            &[
                IngestPoint::new("2024-01-01T03:00:01.000000", 7.0),
                IngestPoint::new("2024-01-01T03:00:01.100000", 8.0),
            ],
        )
        .unwrap();

        let got = idx
            .get(
                "ds",
                "2024-01-01T02:59:59",
                "2024-01-01T03:00:02",
                Some(Fidelity::F1),
            )
            .unwrap();
        assert_eq!(got.len(), 2);
        match &got[0] {
            QueryPoint::Aggregate { min, max, .. } => {
                assert_eq!(*min, 7.0);
                assert_eq!(*max, 10.0);
            }
            _ => panic!("expected aggregate point"),
        }
    }

    #[test]
    fn s4_dataset_discovery() {
        let (_dir, idx) = open();
        for id in ["test_query1", "test_query2", "test_query3"] {
            idx.put(id, &[IngestPoint::new("2024-01-01T00:00:00", 1.0)])
                .unwrap();
        }
        let all = idx.datasets("", 300);
        assert!(all.contains(&"test_query1".to_string()));
        assert!(all.contains(&"test_query2".to_string()));
        assert!(all.contains(&"test_query3".to_string()));
        assert_eq!(idx.datasets("1", 300), vec!["test_query1"]);
        assert!(idx.datasets("4", 300).is_empty());
    }

    #[test]
    fn counters_are_monotone() {
        let (_dir, idx) = open();
        assert_eq!(idx.num_puts(), 0);
        assert_eq!(idx.num_gets(), 0);
        idx.put("ds", &[IngestPoint::new("2024-01-01T00:00:00", 1.0)])
            .unwrap();
        idx.get("ds", "2024-01-01T00:00:00", "2024-01-01T00:01:00", None)
            .unwrap();
        assert_eq!(idx.num_puts(), 1);
        assert_eq!(idx.num_gets(), 1);
    }
}
