//! Field name resolution.

use std::collections::HashMap;

use crate::error::{ConfigError, Result};
use crate::record::FieldIndex;

/// The named layout shared by every record in a pipeline.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    names: Vec<String>,
    by_name: HashMap<String, FieldIndex>,
}

impl Schema {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Schema::default();
        for (pos, name) in names.into_iter().enumerate() {
            let name = name.into();
            if name.is_empty() {
                return Err(ConfigError::EmptyFieldName(pos));
            }
            if schema.by_name.contains_key(&name) {
                return Err(ConfigError::DuplicateField(name));
            }
            schema.by_name.insert(name.clone(), FieldIndex::new(pos));
            schema.names.push(name);
        }
        Ok(schema)
    }

    /// Parse a comma separated list such as `ts,host,msg`.
    pub fn parse_list(list: &str) -> Result<Self> {
        Self::new(list.split(',').map(str::trim))
    }

    pub fn field_by_name(&self, name: &str) -> Option<FieldIndex> {
        self.by_name.get(name).copied()
    }

    pub fn field_name(&self, idx: FieldIndex) -> Option<&str> {
        self.names.get(idx.position()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
