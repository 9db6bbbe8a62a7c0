//! GLES binding generator CLI
//!
//! Reads a filtered GL header and writes the mtots binding source.

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use glesgen::{BindingProfile, Generated, SkippedDeclaration};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

#[derive(ClapParser)]
#[command(name = "glesgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate mtots bindings from a filtered OpenGL ES header", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the binding source
    Generate {
        /// Filtered declaration header
        header: PathBuf,

        /// Write the generated source here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Binding tables (TOML) merged over the built-in GLES 3 tables
        #[arg(long, value_name = "PATH")]
        tables: Option<PathBuf>,
    },

    /// Classify every declaration and print a summary without generating
    Check {
        /// Filtered declaration header
        header: PathBuf,

        /// Binding tables (TOML) merged over the built-in GLES 3 tables
        #[arg(long, value_name = "PATH")]
        tables: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("glesgen=warn".parse().expect("valid directive")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            header,
            output,
            tables,
        } => run_generate(&header, output.as_deref(), tables.as_deref()),
        Commands::Check { header, tables } => run_check(&header, tables.as_deref()),
        Commands::Completions { shell } => run_completions(shell),
    }
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "glesgen", &mut io::stdout());
}

/// Load tables and run the whole pipeline, exiting on any fatal error
///
/// Skip notices go to stderr as the header is read.
fn run_pipeline(header: &Path, tables: Option<&Path>) -> Generated {
    let profile = match BindingProfile::load(tables) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let report = |skipped: &SkippedDeclaration| eprintln!("{}", skipped);
    match glesgen::generate_file_with(header, &profile, report) {
        Ok(generated) => generated,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_generate(header: &Path, output: Option<&Path>, tables: Option<&Path>) {
    let generated = run_pipeline(header, tables);

    let written = match output {
        Some(path) => fs::write(path, &generated.source),
        None => io::stdout().lock().write_all(generated.source.as_bytes()),
    };
    if let Err(e) = written {
        eprintln!("Error writing generated source: {}", e);
        process::exit(1);
    }

    if let Some(path) = output {
        info!(
            output = %path.display(),
            bindings = generated.bindings.len(),
            "wrote bindings"
        );
    }
}

fn run_check(header: &Path, tables: Option<&Path>) {
    let generated = run_pipeline(header, tables);
    println!("{}", generated.summary);
}
