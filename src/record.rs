//! Delimited records and positional field access.
//!
//! A `Record` is an ordered sequence of byte fields. Stages never look fields
//! up by name while processing; they hold a `FieldIndex` resolved once from a
//! [`Schema`](crate::Schema) and read the field at that position.

use std::io::{self, BufRead};

/// Position of a field inside every record of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldIndex(usize);

impl FieldIndex {
    /// Wraps a raw position. Engines that keep their own schema use this;
    /// everyone else gets indices from `Schema::field_by_name`.
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    pub const fn position(self) -> usize {
        self.0
    }
}

/// A single record flowing through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<Vec<u8>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from anything byte-like.
    pub fn from_fields<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        Self {
            fields: fields.into_iter().map(|f| f.as_ref().to_vec()).collect(),
        }
    }

    /// Split a delimited line into fields. A trailing line ending is dropped.
    pub fn parse(line: &[u8], delimiter: u8) -> Self {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        Self {
            fields: line
                .split(|&b| b == delimiter)
                .map(|f| f.to_vec())
                .collect(),
        }
    }

    /// Raw bytes of the field at `idx`. Positions past the end read as empty.
    pub fn get(&self, idx: FieldIndex) -> &[u8] {
        self.fields.get(idx.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Join the fields back into a delimited line (no line ending).
    pub fn to_line(&self, delimiter: u8) -> Vec<u8> {
        self.fields.join(&delimiter)
    }
}

/// Read one record per non-empty line.
pub fn read_records<R: BufRead>(mut reader: R, delimiter: u8) -> io::Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line == b"\n" || line == b"\r\n" {
            continue;
        }
        records.push(Record::parse(&line, delimiter));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::{BufReader, Write};

    #[test]
    fn test_parse_splits_on_delimiter() {
        let r = Record::parse(b"1577836800,web-1,GET /\n", b',');
        assert_eq!(r.len(), 3);
        assert_eq!(r.get(FieldIndex::new(0)), b"1577836800");
        assert_eq!(r.get(FieldIndex::new(2)), b"GET /");
    }

    #[test]
    fn test_parse_strips_crlf() {
        let r = Record::parse(b"a\tb\r\n", b'\t');
        assert_eq!(r.get(FieldIndex::new(1)), b"b");
    }

    #[test]
    fn test_get_past_end_is_empty() {
        let r = Record::from_fields(["only"]);
        assert_eq!(r.get(FieldIndex::new(5)), b"");
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let r = Record::parse(b",,x", b',');
        assert_eq!(r.len(), 3);
        assert_eq!(r.get(FieldIndex::new(0)), b"");
        assert_eq!(r.to_line(b','), b",,x");
    }

    #[test]
    fn test_read_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1,a").unwrap();
        writeln!(file).unwrap();
        write!(file, "2,b").unwrap();
        file.flush().unwrap();

        let reader = BufReader::new(File::open(file.path()).unwrap());
        let records = read_records(reader, b',').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], Record::from_fields(["2", "b"]));
    }
}
