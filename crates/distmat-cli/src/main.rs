//! `distmat` CLI - ELKI distance matrix converter
//!
//! Usage:
//!   `distmat` (reads `20NG/elki_distance_matrix.txt`, writes `20ng_entity_graph_with_tfidf_NVS.p`)
//!   `distmat convert -i matrix.txt -o matrix.p`
//!   `distmat inspect matrix.p`

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use distmat_core::config::DEFAULT_CONFIG_FILE;
use distmat_core::{load_record, ConverterConfig, MatrixConverter, OutputFormat};

#[derive(Parser)]
#[command(name = "distmat")]
#[command(
    version,
    about = "distmat - convert ELKI distance matrices into aligned binary records"
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// CLI output format option
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Bincode,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Bincode => OutputFormat::Bincode,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a distance matrix text file into a record (default)
    Convert(ConvertArgs),

    /// Load a record file and print a summary
    Inspect {
        /// Record file
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a configuration file with the default settings
    Init {
        /// Output file path
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Distance matrix text file
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Record file to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Reject lines with more than three fields
    #[arg(long)]
    strict: bool,

    /// Write the output file in place instead of via temp file and rename
    #[arg(long)]
    no_atomic: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        // Does not load the config, so a broken file can be regenerated.
        Some(Commands::Init { output, force }) => generate_config(&output, force),
        Some(Commands::Inspect { file, json }) => {
            let config = load_config(config_path)?;
            init_logging(&config, cli.verbose)?;
            inspect(&file, json)
        }
        Some(Commands::Convert(args)) => {
            let mut config = load_config(config_path)?;
            apply_overrides(&mut config, &args);
            init_logging(&config, cli.verbose)?;
            run_conversion(config)
        }
        None => {
            let config = load_config(config_path)?;
            init_logging(&config, cli.verbose)?;
            run_conversion(config)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    let config = match path {
        Some(path) => {
            anyhow::ensure!(path.exists(), "Config file not found: {}", path.display());
            ConverterConfig::load_from_path(path)
        }
        None => ConverterConfig::load(),
    };
    config.context("Failed to load configuration")
}

fn apply_overrides(config: &mut ConverterConfig, args: &ConvertArgs) {
    if let Some(input) = &args.input {
        config.input.path.clone_from(input);
    }
    if let Some(output) = &args.output {
        config.output.path.clone_from(output);
    }
    if let Some(format) = args.format {
        config.output.format = format.into();
    }
    if args.strict {
        config.input.strict_fields = true;
    }
    if args.no_atomic {
        config.output.atomic = false;
    }
}

fn init_logging(config: &ConverterConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        config
            .logging
            .level
            .parse()
            .with_context(|| format!("Invalid log level '{}'", config.logging.level))?
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run_conversion(config: ConverterConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;
    let converter = MatrixConverter::new(config);
    let input = converter.config().input.path.clone();
    let output = converter.config().output.path.clone();

    let stats = converter
        .run_with(|_| println!("Going to write record file {}", output.display()))
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!(
        "Wrote {} entries ({} bytes) to {}",
        stats.entries,
        stats.bytes_written,
        stats.output.display()
    );
    Ok(())
}

fn inspect(file: &Path, json: bool) -> Result<()> {
    let record =
        load_record(file).with_context(|| format!("Failed to load {}", file.display()))?;
    let summary = record.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let range = match (summary.min_distance, summary.max_distance) {
        (Some(min), Some(max)) => format!("{min} .. {max}"),
        _ => "n/a".to_string(),
    };
    println!("Record:          {}", file.display());
    println!("Entries:         {}", summary.entries);
    println!("Distinct rows:   {}", summary.distinct_rows);
    println!("Distinct cols:   {}", summary.distinct_cols);
    println!("Duplicate pairs: {}", summary.duplicate_pairs);
    println!("NaN distances:   {}", summary.nan_distances);
    println!("Distance range:  {range}");
    Ok(())
}

fn generate_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }
    let rendered = ConverterConfig::default().to_toml()?;
    std::fs::write(output, rendered)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Configuration written to {}", output.display());
    Ok(())
}
