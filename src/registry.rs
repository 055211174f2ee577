//! Lookup table of available filters.

use crate::config::StageConfig;
use crate::error::{ConfigError, Result};
use crate::schema::Schema;
use crate::stage::{Filter, FilterDesc, FilterParams};
use crate::timestamp_range::TIMESTAMP_RANGE_DESC;

/// Every filter this crate provides.
pub static FILTERS: &[FilterDesc] = &[TIMESTAMP_RANGE_DESC];

/// Find a filter by name, ignoring ASCII case.
pub fn find_filter(name: &str) -> Option<&'static FilterDesc> {
    FILTERS.iter().find(|d| d.name.eq_ignore_ascii_case(name))
}

/// Validate `config` against the named filter's options and build it with
/// field names resolved against `schema`.
pub fn build_filter(name: &str, config: &StageConfig, schema: &Schema) -> Result<Box<dyn Filter>> {
    let desc = find_filter(name).ok_or_else(|| ConfigError::UnknownFilter(name.to_string()))?;
    config.validate(desc.name, desc.options)?;

    let field_by_name = |field: &str| schema.field_by_name(field);
    let filter = (desc.new)(FilterParams {
        decoded_config: config,
        field_by_name: &field_by_name,
    })?;
    tracing::info!(filter = desc.name, fields = schema.len(), "filter built");
    Ok(filter)
}
