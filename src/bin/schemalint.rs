//! schemalint CLI
//!
//! Command-line interface for linting JSON Schemas for static type
//! compatibility.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schemalint::{
    collect_schema_files, is_url, resolve_config, LintError, LintResult, Linter, OutputFormat,
    Settings, Status,
};
use tracing_subscriber::EnvFilter;

const LINT_LONG_ABOUT: &str = "\
Lint JSON Schema files and report patterns that cause problems when
generating code for statically-typed languages.

Default profile checks:
  - Unions without discriminator fields (error)
  - Missing or duplicate const values in union variants (error)
  - Property names outside the configured case convention (error)
  - Large unions with many variants (warning)
  - Deeply nested unions (warning)
  - additionalProperties: true on union variants (warning)

Scale profile additionally checks:
  - Composition keywords anyOf/oneOf/allOf (error)
  - additionalProperties: true (error)
  - Missing explicit type field (error)
  - Mixed type arrays like [\"string\", \"number\"] (error)

Settings are read from schemalint.toml (discovered upward from the current
directory) and overridden by flags.

Exit codes:
  0 - No issues found
  1 - Errors found
  2 - Warnings found but no errors
  3 - Invalid schema JSON or configuration
  4 - File or network error";

#[derive(Parser)]
#[command(name = "schemalint")]
#[command(about = "JSON Schema linter for static type compatibility")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint JSON Schema files for static type compatibility
    #[command(long_about = LINT_LONG_ABOUT)]
    Lint(LintArgs),

    /// Print version information
    Version,
}

#[derive(clap::Args)]
struct LintArgs {
    /// Schema files, directories (searched for .json files), or URLs
    #[arg(required = true)]
    paths: Vec<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Linting profile: default, scale
    #[arg(long, short)]
    profile: Option<String>,

    /// Property case convention: none, camelCase, snake_case, kebab-case, PascalCase
    #[arg(long)]
    property_case: Option<String>,

    /// Warn when a union has more variants than this
    #[arg(long, value_name = "N")]
    max_union_variants: Option<usize>,

    /// Warn when unions are nested at least this deep
    #[arg(long, value_name = "N")]
    max_union_depth: Option<usize>,

    /// Discriminator field candidate, highest priority first (repeatable)
    #[arg(long = "discriminator-field", value_name = "FIELD")]
    discriminator_fields: Vec<String>,

    /// Config file (default: discover schemalint.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Lint(args) => run_lint(args),
        Commands::Version => {
            println!("schemalint version {}", env!("CARGO_PKG_VERSION"));
            Ok(Status::Ok)
        }
    };

    match result {
        Ok(status) => ExitCode::from(status.exit_code() as u8),
        Err(code) => ExitCode::from(code),
    }
}

/// Logging is off unless RUST_LOG or --verbose asks for it.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "off" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_lint(args: LintArgs) -> Result<Status, u8> {
    let LintArgs {
        paths,
        output,
        profile,
        property_case,
        max_union_variants,
        max_union_depth,
        discriminator_fields,
        config,
    } = args;

    let cli_settings = Settings {
        profile,
        property_case,
        max_union_variants,
        max_union_depth,
        discriminator_fields: (!discriminator_fields.is_empty()).then_some(discriminator_fields),
    };
    let config = resolve_config(cli_settings, config.as_deref(), Path::new(".")).map_err(fail)?;
    let linter = Linter::new(config);

    // Everything is linted before anything is printed, so a hard failure
    // leaves no partial output behind.
    let mut results = Vec::new();
    for source in &paths {
        if is_url(source) {
            results.push(linter.lint_source(source).map_err(fail)?);
            continue;
        }

        let files = collect_schema_files(Path::new(source));
        if files.is_empty() {
            eprintln!("Warning: no .json files found in {}", source);
        }
        for file in files {
            results.push(linter.lint_file(&file).map_err(fail)?);
        }
    }

    let rendered = output.render(&results).map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        3u8
    })?;
    match output {
        OutputFormat::Json => println!("{}", rendered),
        OutputFormat::Text | OutputFormat::Github => print!("{}", rendered),
    }

    Ok(results
        .iter()
        .map(LintResult::status)
        .max()
        .unwrap_or(Status::Ok))
}

/// Report a hard failure and turn it into an exit code.
fn fail(err: LintError) -> u8 {
    eprintln!("Error: {}", err);
    err.exit_code() as u8
}
