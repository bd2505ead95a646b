use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hashify::classifier::{ColumnRole, classify_columns};
use hashify::config::{Settings, load_settings};
use hashify::export::write_artifacts;
use hashify::io::read_table_from_path;
use hashify::pipeline::{MetaTarget, RunConfig, RunStatus, process_file};
use hashify::table::Table;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "hashify",
    about = "Normalize and hash customer PII for Google and Meta customer-match uploads"
)]
pub struct Cli {
    /// Path to a JSON settings file
    #[arg(long, global = true, env = "HASHIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Input field delimiter, overriding the settings file (default ';')
    #[arg(long, global = true)]
    pub delimiter: Option<char>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build Google customer-match files: split names, phones and emails, row by row
    Google {
        /// Input table (semicolon-delimited unless overridden)
        #[arg(short, long)]
        file: PathBuf,

        /// Where to write the output files. Defaults to the input's directory.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Build a Meta customer-match file: one deduplicated column of phones or emails
    Meta {
        /// Input table (semicolon-delimited unless overridden)
        #[arg(short, long)]
        file: PathBuf,

        /// Which data to hash
        #[arg(short, long, value_enum)]
        target: TargetArg,

        /// Where to write the output files. Defaults to the input's directory.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Show how each column header is classified
    Classify {
        /// Input table (semicolon-delimited unless overridden)
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetArg {
    Phone,
    Email,
}

impl From<TargetArg> for MetaTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Phone => Self::Phone,
            TargetArg::Email => Self::Email,
        }
    }
}

/// Load settings and dispatch the subcommand.
///
/// # Errors
///
/// Fails if the settings file cannot be loaded, the delimiter override is
/// invalid, or the output files cannot be written. Pipeline failures are
/// reported on stderr and turned into a failing exit code instead.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let mut settings =
        load_settings(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(delimiter) = cli.delimiter {
        settings.input_delimiter = delimiter;
        settings.validate()?;
    }

    match cli.command {
        Commands::Google { file, output_dir } => {
            handle_run(&file, output_dir, &RunConfig::google(), &settings)
        }
        Commands::Meta {
            file,
            target,
            output_dir,
        } => handle_run(&file, output_dir, &RunConfig::meta(target.into()), &settings),
        Commands::Classify { file } => handle_classify(&file, &settings),
    }
}

fn handle_run(
    file: &Path,
    output_dir: Option<PathBuf>,
    config: &RunConfig,
    settings: &Settings,
) -> Result<ExitCode> {
    match process_file(file, config, settings) {
        RunStatus::Success {
            message,
            output,
            artifacts,
            ..
        } => {
            println!("{message}");
            println!("\nPreview of hashed data:");
            print_table(&output.hashed.head(settings.preview_rows));

            let dir = output_dir.unwrap_or_else(|| default_output_dir(file));
            let written = write_artifacts(&dir, &artifacts)?;
            println!();
            for (artifact, path) in artifacts.iter().zip(&written) {
                println!("{}: {}", artifact.label, path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        RunStatus::Warning { message } => {
            println!("Warning: {message}");
            Ok(ExitCode::SUCCESS)
        }
        RunStatus::Failed { error } => {
            eprintln!("Error processing file: {error}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_classify(file: &Path, settings: &Settings) -> Result<ExitCode> {
    let table = read_table_from_path(file, &settings.read_options()?)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let roles = classify_columns(&table.headers());
    for (header, role) in &roles {
        println!("{header:<30} {role}");
    }
    if roles.iter().all(|(_, role)| *role == ColumnRole::Unclassified) {
        println!("\nWarning: no column header contains 'nome', 'fone', 'phone' or 'mail'.");
    }
    Ok(ExitCode::SUCCESS)
}

fn default_output_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn print_table(table: &Table) {
    let headers = table.headers();
    let records = table.records();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            records
                .iter()
                .filter_map(|r| r.iter().nth(i).and_then(|(_, v)| *v))
                .map(str::len)
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", line(headers));
    for record in &records {
        println!("{}", line(record.iter().map(|(_, v)| v.unwrap_or("")).collect()));
    }
}
