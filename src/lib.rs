//! # pipeline-filters
//!
//! Filter stages for a record-processing pipeline.
//!
//! A filter is built once from its options and the active record schema, then
//! asked to decide on each record: forward it to the next stage or drop it.
//! Filters keep lock-free counters and can be shared across worker threads.
//!
//! ## Overview
//!
//! - **Records**: ordered byte fields, addressed by a resolved [`FieldIndex`]
//! - **Schema**: resolves field names to indices once, before processing
//! - **Filters**: implement [`Filter`]; registered through a [`FilterDesc`]
//! - **TimestampRange**: keeps records whose epoch-seconds field lies in
//!   `[StartDatetime, EndDatetime)`
//!
//! ## Example
//!
//! ```
//! use pipeline_filters::{Record, Schema, StageConfig, build_filter, run_filter};
//!
//! let schema = Schema::parse_list("ts,host").unwrap();
//! let config = StageConfig::from_pairs([
//!     ("StartDatetime", "2020-01-01 00:00:00"),
//!     ("EndDatetime", "2020-01-02 00:00:00"),
//!     ("Field", "ts"),
//! ]);
//! let filter = build_filter("TimestampRange", &config, &schema).unwrap();
//!
//! let records = vec![
//!     Record::from_fields(["1577836800", "web-1"]),
//!     Record::from_fields(["1577923200", "web-2"]),
//!     Record::from_fields(["abc", "web-3"]),
//! ];
//! let kept = run_filter(filter.as_ref(), &records);
//!
//! assert_eq!(kept.len(), 1);
//! assert_eq!(filter.stats().num_filtered_lines, 2);
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod record;
pub mod registry;
pub mod schema;
pub mod stage;
pub mod timestamp_range;

pub use config::{ConfigOption, StageConfig};
pub use error::{ConfigError, DatetimeError, PipelineError};
pub use executor::{run_filter, run_filter_parallel};
pub use record::{FieldIndex, Record, read_records};
pub use registry::{FILTERS, build_filter, find_filter};
pub use schema::Schema;
pub use stage::{Filter, FilterDesc, FilterParams, FilterStats};
pub use timestamp_range::{TIMESTAMP_RANGE_DESC, TimestampRange, TimestampRangeConfig};
