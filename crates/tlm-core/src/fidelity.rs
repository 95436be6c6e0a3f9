/// Number of records a file should target at any tier.
pub const GROUP: u64 = 5000;

/// Maximum number of shards a single query may enumerate.
pub const MAX_SHARDS: usize = 500;

/// One of the seven pre-computed aggregation levels.
///
/// `FULL` stores raw samples; every other tier stores `AggregateSample`
/// records pre-combined over `agg_period()` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fidelity {
    Full,
    F1,
    F10,
    F100,
    F1000,
    F10000,
    F100000,
}

impl Fidelity {
    pub const ALL: [Fidelity; 7] = [
        Fidelity::Full,
        Fidelity::F1,
        Fidelity::F10,
        Fidelity::F100,
        Fidelity::F1000,
        Fidelity::F10000,
        Fidelity::F100000,
    ];

    /// Every tier except `FULL`, in ascending aggregation period.
    pub const AGGREGATED: [Fidelity; 6] = [
        Fidelity::F1,
        Fidelity::F10,
        Fidelity::F100,
        Fidelity::F1000,
        Fidelity::F10000,
        Fidelity::F100000,
    ];

    /// Aggregation bin duration in seconds, or `None` for `FULL`.
    pub fn agg_period(self) -> Option<u64> {
        match self {
            Fidelity::Full => None,
            Fidelity::F1 => Some(1),
            Fidelity::F10 => Some(10),
            Fidelity::F100 => Some(100),
            Fidelity::F1000 => Some(1000),
            Fidelity::F10000 => Some(10_000),
            Fidelity::F100000 => Some(100_000),
        }
    }

    /// Wall-clock seconds covered by one on-disk file at this tier, tuned so
    /// a file holds roughly `GROUP` records.
    pub fn file_span(self) -> u64 {
        match self {
            Fidelity::Full => GROUP / 10,
            _ => GROUP * self.agg_period().unwrap(),
        }
    }

    /// Directory name segment for this tier under `BASE/data/`.
    pub fn dir_name(self) -> &'static str {
        match self {
            Fidelity::Full => "full",
            Fidelity::F1 => "1",
            Fidelity::F10 => "10",
            Fidelity::F100 => "100",
            Fidelity::F1000 => "1000",
            Fidelity::F10000 => "10000",
            Fidelity::F100000 => "100000",
        }
    }

    /// Select the coarsest-yet-sufficient tier for a query window of the
    /// given duration in seconds, targeting a few thousand returned points.
    pub fn recommended(duration_secs: f64) -> Fidelity {
        for tier in Fidelity::ALL {
            let threshold = match tier.agg_period() {
                None => GROUP as f64 / 10.0,
                Some(period) => GROUP as f64 * period as f64,
            };
            if duration_secs < threshold {
                return tier;
            }
        }
        Fidelity::F100000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_spans_match_spec() {
        assert_eq!(Fidelity::Full.file_span(), 500);
        assert_eq!(Fidelity::F1.file_span(), 5_000);
        assert_eq!(Fidelity::F10.file_span(), 50_000);
        assert_eq!(Fidelity::F100.file_span(), 500_000);
        assert_eq!(Fidelity::F1000.file_span(), 5_000_000);
        assert_eq!(Fidelity::F10000.file_span(), 50_000_000);
        assert_eq!(Fidelity::F100000.file_span(), 500_000_000);
    }

    #[test]
    fn recommended_thresholds() {
        assert_eq!(Fidelity::recommended(100.0), Fidelity::Full);
        assert_eq!(Fidelity::recommended(499.9), Fidelity::Full);
        assert_eq!(Fidelity::recommended(500.0), Fidelity::F1);
        assert_eq!(Fidelity::recommended(4_999.0), Fidelity::F1);
        assert_eq!(Fidelity::recommended(5_000.0), Fidelity::F10);
        assert_eq!(Fidelity::recommended(499_999.0), Fidelity::F100);
        assert_eq!(Fidelity::recommended(50_000_001.0), Fidelity::F100000);
    }
}
