/// A raw telemetry reading at full fidelity.
///
/// `timestamp` is epoch seconds; fractional seconds are preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A pre-aggregated summary of one bin at a down-sampled fidelity.
///
/// `bin_timestamp` is the bin's left edge, truncated to the tier's
/// `agg_period`, in whole epoch seconds. `sum`/`count` are kept (rather than
/// a pre-divided mean) so two aggregates for the same bin can be combined
/// associatively — see `tlm_engine::merge`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateSample {
    pub bin_timestamp: i64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl AggregateSample {
    pub fn from_single(bin_timestamp: i64, value: f64) -> Self {
        Self {
            bin_timestamp,
            min: value,
            max: value,
            sum: value,
            count: 1,
        }
    }

    /// Combine two aggregates for the same bin.
    pub fn combine(&self, other: &AggregateSample) -> AggregateSample {
        debug_assert_eq!(self.bin_timestamp, other.bin_timestamp);
        AggregateSample {
            bin_timestamp: self.bin_timestamp,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            sum: self.sum + other.sum,
            count: self.count + other.count,
        }
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// One point in a query response: raw at `FULL` fidelity, aggregated
/// otherwise. Public wire shape — dates are ISO-8601 local-time strings.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPoint {
    Raw { date: String, value: f64 },
    Aggregate {
        date: String,
        min: f64,
        mean: f64,
        max: f64,
    },
}

/// One point supplied to `Index::put`. Public wire shape.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestPoint {
    pub date: String,
    pub value: f64,
}

impl IngestPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}
