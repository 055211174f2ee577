//! TimestampRange - drops records whose Unix timestamp field falls outside
//! a half-open `[start, end)` interval.
//!
//! Bounds are given as `YYYY-MM-DD HH:MM:SS` in UTC, or the literal `now`,
//! which is sampled once when the filter is built. A field that does not
//! parse as a base-10 `i64` counts as out of range.

use std::sync::atomic::{AtomicU64, Ordering};

use jiff::Timestamp;
use jiff::civil::DateTime;

use crate::config::{ConfigOption, StageConfig};
use crate::error::{ConfigError, DatetimeError, Result};
use crate::record::{FieldIndex, Record};
use crate::stage::{Filter, FilterDesc, FilterParams, FilterStats};

const NAME: &str = "TimestampRange";

/// Bound value meaning "the moment the filter is constructed".
pub const NOW: &str = "now";

const LAYOUT: &str = "%Y-%m-%d %H:%M:%S";
const SHAPE: &[u8; 19] = b"dddd-dd-dd dd:dd:dd";
const UNIX_EPOCH: DateTime = DateTime::constant(1970, 1, 1, 0, 0, 0, 0);

const OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: "StartDatetime",
        help: "Lower bound of the accepted time interval (inclusive, UTC) format:'2006-01-31 15:04:05'. Also accepts 'now'",
        default: "no bound",
        required: true,
    },
    ConfigOption {
        name: "EndDatetime",
        help: "Upper bound of the accepted time interval (exclusive, UTC) format:'2006-01-31 15:04:05'. Also accepts 'now'",
        default: "no bound",
        required: true,
    },
    ConfigOption {
        name: "Field",
        help: "Name of the field containing the Unix EPOCH timestamp",
        default: "",
        required: true,
    },
];

pub const TIMESTAMP_RANGE_DESC: FilterDesc = FilterDesc {
    name: NAME,
    help: "Discard records if the value of a field containing a timestamp is out of the given time range (i.e StartDateTime <= value < EndDateTime)",
    options: OPTIONS,
    new: new_filter,
};

/// Decoded options for [`TimestampRange`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampRangeConfig {
    pub start_datetime: String,
    pub end_datetime: String,
    pub field: String,
}

impl TimestampRangeConfig {
    pub fn from_stage_config(cfg: &StageConfig) -> Result<Self> {
        Ok(Self {
            start_datetime: cfg.require(NAME, "StartDatetime")?.to_string(),
            end_datetime: cfg.require(NAME, "EndDatetime")?.to_string(),
            field: cfg.require(NAME, "Field")?.to_string(),
        })
    }
}

pub struct TimestampRange {
    num_processed_lines: AtomicU64,
    num_filtered_lines: AtomicU64,
    start: i64,
    end: i64,
    fidx: FieldIndex,
}

impl TimestampRange {
    pub fn new(
        cfg: &TimestampRangeConfig,
        field_by_name: &dyn Fn(&str) -> Option<FieldIndex>,
    ) -> Result<Self> {
        let fidx =
            field_by_name(&cfg.field).ok_or_else(|| ConfigError::UnknownField(cfg.field.clone()))?;
        let start = parse_bound(&cfg.start_datetime).map_err(ConfigError::InvalidStart)?;
        let end = parse_bound(&cfg.end_datetime).map_err(ConfigError::InvalidEnd)?;

        tracing::debug!(field = %cfg.field, start, end, "timestamp range configured");
        if start >= end {
            tracing::warn!(
                start = %cfg.start_datetime,
                end = %cfg.end_datetime,
                "empty time range, every record will be discarded"
            );
        }

        Ok(Self {
            num_processed_lines: AtomicU64::new(0),
            num_filtered_lines: AtomicU64::new(0),
            start,
            end,
            fidx,
        })
    }

    /// Inclusive lower bound, in epoch seconds.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Exclusive upper bound, in epoch seconds.
    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn contains(&self, ts: i64) -> bool {
        self.start <= ts && ts < self.end
    }
}

impl Filter for TimestampRange {
    fn process(&self, record: &Record, next: &mut dyn FnMut(&Record)) {
        self.num_processed_lines.fetch_add(1, Ordering::Relaxed);

        match parse_epoch(record.get(self.fidx)) {
            Some(ts) if self.contains(ts) => next(record),
            _ => {
                self.num_filtered_lines.fetch_add(1, Ordering::Release);
            }
        }
    }

    fn stats(&self) -> FilterStats {
        // filtered first: pairs with the Release increment so a snapshot
        // never shows more filtered than processed lines.
        let num_filtered_lines = self.num_filtered_lines.load(Ordering::Acquire);
        let num_processed_lines = self.num_processed_lines.load(Ordering::Relaxed);
        FilterStats {
            num_processed_lines,
            num_filtered_lines,
        }
    }
}

/// Descriptor constructor for `TimestampRange`.
pub fn new_filter(params: FilterParams<'_>) -> Result<Box<dyn Filter>> {
    let cfg = TimestampRangeConfig::from_stage_config(params.decoded_config)?;
    let filter = TimestampRange::new(&cfg, params.field_by_name)?;
    Ok(Box::new(filter))
}

/// Resolve one configured bound to epoch seconds.
pub fn parse_bound(value: &str) -> std::result::Result<i64, DatetimeError> {
    if value == NOW {
        return Ok(Timestamp::now().as_second());
    }
    parse_datetime(value)
}

/// Parse a strict `YYYY-MM-DD HH:MM:SS` UTC datetime.
pub fn parse_datetime(value: &str) -> std::result::Result<i64, DatetimeError> {
    let shaped = value.len() == SHAPE.len()
        && value.bytes().zip(SHAPE).all(|(b, &s)| match s {
            b'd' => b.is_ascii_digit(),
            _ => b == s,
        });
    if !shaped {
        return Err(DatetimeError::Layout {
            value: value.to_string(),
        });
    }

    // %S accepts a leap second and clamps it.
    if &value[17..] > "59" {
        return Err(DatetimeError::SecondOutOfRange {
            value: value.to_string(),
        });
    }

    let dt = DateTime::strptime(LAYOUT, value).map_err(|source| DatetimeError::Calendar {
        value: value.to_string(),
        source,
    })?;
    // Civil arithmetic covers years 0000..=9999, unlike a zoned Timestamp.
    Ok(dt.duration_since(UNIX_EPOCH).as_secs())
}

fn parse_epoch(raw: &[u8]) -> Option<i64> {
    std::str::from_utf8(raw).ok()?.parse().ok()
}
