//! The filter-stage contract.
//!
//! A pipeline engine builds a filter once from a [`FilterDesc`], then calls
//! [`Filter::process`] for every record, possibly from several worker threads
//! at once. A filter either calls `next` with the record or drops it; it has
//! no other output. [`Filter::stats`] may be polled concurrently at any time.

use crate::config::{ConfigOption, StageConfig};
use crate::error::ConfigError;
use crate::record::{FieldIndex, Record};

/// Snapshot of a filter's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Records seen by `process`.
    pub num_processed_lines: u64,
    /// Records dropped by this filter.
    pub num_filtered_lines: u64,
}

impl FilterStats {
    /// Records handed to `next`.
    pub fn num_forwarded(&self) -> u64 {
        self.num_processed_lines
            .saturating_sub(self.num_filtered_lines)
    }
}

/// A record-at-a-time stage that forwards or drops each record.
pub trait Filter: Send + Sync {
    /// Decide on one record, calling `next` at most once to forward it.
    fn process(&self, record: &Record, next: &mut dyn FnMut(&Record));

    /// Current counters. Never blocks.
    fn stats(&self) -> FilterStats;
}

/// Everything a filter constructor gets: decoded options plus a resolver
/// bound to the active schema.
#[derive(Clone, Copy)]
pub struct FilterParams<'a> {
    pub decoded_config: &'a StageConfig,
    pub field_by_name: &'a dyn Fn(&str) -> Option<FieldIndex>,
}

/// Constructor signature stored in a [`FilterDesc`].
pub type NewFilter = fn(FilterParams<'_>) -> Result<Box<dyn Filter>, ConfigError>;

/// Registration entry for a filter.
#[derive(Clone, Copy)]
pub struct FilterDesc {
    pub name: &'static str,
    pub help: &'static str,
    pub options: &'static [ConfigOption],
    pub new: NewFilter,
}

impl std::fmt::Debug for FilterDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterDesc")
            .field("name", &self.name)
            .field("options", &self.options.len())
            .finish()
    }
}
