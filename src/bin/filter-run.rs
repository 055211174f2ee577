//! CLI tool to run one filter stage over delimited records.
//!
//! Usage:
//!   filter-run <input> --fields ts,host --set StartDatetime=now --set ...
//!   filter-run --list-filters
//!
//! Accepted records are written to stdout unless `-o` is given.

use clap::Parser;
use pipeline_filters::{
    FILTERS, PipelineError, Schema, StageConfig, build_filter, read_records, run_filter_parallel,
};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

/// Run a filter stage against delimited input records.
#[derive(Parser)]
#[command(name = "filter-run")]
struct Cli {
    /// Input file, one record per line (`-` for stdin)
    #[arg(required_unless_present = "list_filters")]
    input: Option<String>,

    /// Comma separated field names, in record order
    #[arg(long, required_unless_present = "list_filters")]
    fields: Option<String>,

    /// Filter to run
    #[arg(long, default_value = "TimestampRange")]
    filter: String,

    /// Filter option as Key=Value (repeatable)
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// Field delimiter (a single byte)
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Worker threads sharing the filter
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Report filter statistics on stderr
    #[arg(short, long)]
    verbose: bool,

    /// List available filters and their options
    #[arg(long)]
    list_filters: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.list_filters {
        list_filters();
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn list_filters() {
    for desc in FILTERS {
        println!("{}", desc.name);
        println!("  {}", desc.help);
        for opt in desc.options {
            let required = if opt.required { " (required)" } else { "" };
            println!("  {}{}: {}", opt.name, required, opt.help);
        }
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let delimiter = u8::try_from(cli.delimiter).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("delimiter {:?} is not a single byte", cli.delimiter),
        )
    })?;

    let schema = Schema::parse_list(cli.fields.as_deref().unwrap_or_default())?;
    let mut config = StageConfig::new();
    for assignment in &cli.options {
        let (key, value) = StageConfig::parse_assignment(assignment)?;
        config.set(key, value);
    }
    let filter = build_filter(&cli.filter, &config, &schema)?;

    let input = cli.input.as_deref().unwrap_or("-");
    let records = if input == "-" {
        read_records(io::stdin().lock(), delimiter)?
    } else {
        read_records(BufReader::new(File::open(input)?), delimiter)?
    };

    let accepted = run_filter_parallel(filter.as_ref(), &records, cli.workers);

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    for record in &accepted {
        out.write_all(&record.to_line(delimiter))?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    let stats = filter.stats();
    tracing::info!(
        filter = %cli.filter,
        processed = stats.num_processed_lines,
        filtered = stats.num_filtered_lines,
        "filter finished"
    );
    if cli.verbose {
        eprintln!(
            "Processed {} -> {} records ({} filtered)",
            stats.num_processed_lines,
            stats.num_forwarded(),
            stats.num_filtered_lines
        );
    }
    Ok(())
}
