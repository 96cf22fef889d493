use clap::Parser;
use membership_filter::{
    read_keys, FilterError, KeySet, DEFAULT_FALSE_POSITIVE_RATE, DEFAULT_HEADER_LABELS,
};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, Level};

/// Builds a Bloom filter from the keys in DB_INPUT and reports, for every key in
/// DB_CHECK, whether it is in the DB, a false positive, or absent.
#[derive(Parser)]
#[command(name = "membership-check", version)]
struct Cli {
    /// Delimited file whose first column holds the keys to insert
    db_input: PathBuf,

    /// Delimited file whose first column holds the keys to check
    db_check: PathBuf,

    /// Upper bound on the false positive rate, strictly between 0 and 1
    #[arg(long, default_value_t = DEFAULT_FALSE_POSITIVE_RATE)]
    fp_rate: f64,

    /// First-column values that mark a header row (repeatable)
    #[arg(
        long = "header",
        value_name = "LABEL",
        default_values_t = DEFAULT_HEADER_LABELS.map(String::from)
    )]
    header_labels: Vec<String>,

    /// Log to stderr: -v for info, -vv for debug
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), FilterError> {
    let db_input: KeySet = read_keys(&cli.db_input, &cli.header_labels)?
        .into_iter()
        .collect();
    let db_check = read_keys(&cli.db_check, &cli.header_labels)?;

    let filter = db_input.to_bloom_filter(cli.fp_rate)?;
    info!(
        keys = db_input.len(),
        bit_array_size = filter.bit_array_size(),
        hash_count = filter.hash_count(),
        expected_false_positive_rate = filter.estimated_false_positive_rate(db_input.len()),
        "built filter"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for key in &db_check {
        writeln!(out, "{},{}", key, db_input.classify(&filter, key))?;
    }
    out.flush()?;

    Ok(())
}
