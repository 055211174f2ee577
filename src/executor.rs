//! Drives a single filter over a batch of records.
//!
//! Both executors share one filter instance. The parallel executor splits the
//! input into contiguous chunks, one per worker thread, and concatenates the
//! accepted records in chunk order, so its output matches the sequential one.

use std::thread;

use crate::record::Record;
use crate::stage::Filter;

/// Run every record through `filter` on the calling thread.
pub fn run_filter(filter: &dyn Filter, records: &[Record]) -> Vec<Record> {
    let mut output = Vec::new();
    for record in records {
        filter.process(record, &mut |r| output.push(r.clone()));
    }
    output
}

/// Run `records` through `filter` on up to `workers` scoped threads.
///
/// A `workers` value of 0 is treated as 1.
pub fn run_filter_parallel(filter: &dyn Filter, records: &[Record], workers: usize) -> Vec<Record> {
    let workers = workers.max(1);
    if workers == 1 || records.len() < 2 {
        return run_filter(filter, records);
    }

    let chunk_size = records.len().div_ceil(workers);
    tracing::debug!(workers, chunk_size, records = records.len(), "parallel filter run");

    thread::scope(|s| {
        let handles: Vec<_> = records
            .chunks(chunk_size)
            .map(|chunk| s.spawn(move || run_filter(filter, chunk)))
            .collect();

        let mut output = Vec::new();
        for handle in handles {
            match handle.join() {
                Ok(part) => output.extend(part),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        output
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldIndex;
    use crate::schema::Schema;
    use crate::timestamp_range::{TimestampRange, TimestampRangeConfig};

    fn day_filter() -> TimestampRange {
        let schema = Schema::parse_list("ts,seq").unwrap();
        let cfg = TimestampRangeConfig {
            start_datetime: "2020-01-01 00:00:00".to_string(),
            end_datetime: "2020-01-02 00:00:00".to_string(),
            field: "ts".to_string(),
        };
        TimestampRange::new(&cfg, &|n| schema.field_by_name(n)).unwrap()
    }

    /// Every third record is out of range, every fifth is garbage.
    fn input(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let ts = if i % 5 == 0 {
                    "n/a".to_string()
                } else if i % 3 == 0 {
                    (1_577_923_200 + i).to_string()
                } else {
                    (1_577_836_800 + i).to_string()
                };
                Record::from_fields([ts, i.to_string()])
            })
            .collect()
    }

    #[test]
    fn test_run_filter_preserves_order() {
        let filter = day_filter();
        let output = run_filter(&filter, &input(10));
        let seqs: Vec<&str> = output
            .iter()
            .map(|r| std::str::from_utf8(r.get(FieldIndex::new(1))).unwrap())
            .collect();
        assert_eq!(seqs, vec!["1", "2", "4", "7", "8"]);
        assert_eq!(filter.stats().num_filtered_lines, 5);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records = input(1001);
        let sequential = run_filter(&day_filter(), &records);

        let filter = day_filter();
        let parallel = run_filter_parallel(&filter, &records, 4);
        assert_eq!(parallel, sequential);

        let stats = filter.stats();
        assert_eq!(stats.num_processed_lines, 1001);
        assert_eq!(stats.num_forwarded(), parallel.len() as u64);
    }

    #[test]
    fn test_zero_workers_runs_inline() {
        let filter = day_filter();
        let output = run_filter_parallel(&filter, &input(6), 0);
        assert_eq!(output.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let filter = day_filter();
        assert!(run_filter_parallel(&filter, &[], 8).is_empty());
        assert_eq!(filter.stats().num_processed_lines, 0);
    }
}
