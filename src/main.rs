use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rust_procmap::{
    load_catalog, DiscoveryOptions, MalformedPolicy, MapOutcome, ProcedureMapper, TreeStyle,
};

#[derive(Parser)]
#[command(name = "rust-procmap")]
#[command(author, version, about = "Map the EXEC call tree of SQL Server stored procedures")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Folder containing the procedure scripts
    #[arg(short, long)]
    dir: PathBuf,

    /// Only read .sql files whose parent folder name ends with this ("" for any folder)
    #[arg(long, default_value = "Procedures")]
    folder_suffix: String,

    /// Glob pattern (relative to --dir) of files to ignore; may be repeated
    #[arg(long)]
    exclude: Vec<String>,

    /// Skip files and EXEC references whose procedure name cannot be read instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the call tree beneath one procedure
    Map {
        #[command(flatten)]
        source: SourceArgs,

        /// Schema of the start procedure
        #[arg(short, long, default_value = "dbo")]
        schema: String,

        /// Name of the start procedure
        #[arg(short, long)]
        procedure: String,

        /// Also write the tree to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indentation written once per level
        #[arg(long, default_value = "|\t")]
        padding: String,

        /// Suffix written after a procedure that is already on the current path
        #[arg(long, default_value = "...")]
        cycle_marker: String,
    },
    /// List every procedure found in the folder
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl SourceArgs {
    fn discovery(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            folder_suffix: self.folder_suffix.clone(),
            excludes: self.exclude.clone(),
        }
    }

    fn malformed(&self) -> MalformedPolicy {
        if self.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Strict
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rust_procmap=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Map {
            source,
            schema,
            procedure,
            output,
            padding,
            cycle_marker,
        } => {
            init_tracing(source.verbose);

            let catalog = load_catalog(&source.dir, &source.discovery(), source.malformed())?;
            let mapper = ProcedureMapper::new(
                catalog,
                TreeStyle {
                    padding,
                    cycle_marker,
                },
            );

            let mut lines = Vec::new();
            let outcome = mapper.map(&schema, &procedure, |line: &str| {
                lines.push(line.to_string())
            })?;

            if outcome == MapOutcome::NotFound {
                bail!(
                    "Procedure [{}].[{}] not found under {}",
                    schema,
                    procedure,
                    source.dir.display()
                );
            }

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for line in &lines {
                writeln!(out, "{}", line)?;
            }

            if let Some(path) = output {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                for line in &lines {
                    writeln!(writer, "{}", line)?;
                }
                writer.flush()?;
            }
        }
        Commands::List { source } => {
            init_tracing(source.verbose);

            let catalog = load_catalog(&source.dir, &source.discovery(), source.malformed())?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for record in catalog.procedures() {
                writeln!(out, "{}\t{}", record.display_name(), record.source_label())?;
            }
        }
    }

    Ok(())
}
