// crates/poetry-contract-cli/src/main.rs
// ============================================================================
// Module: PoetryDB Contract CLI Entry Point
// Description: Command dispatcher for running and inspecting contract cases.
// Purpose: Run the catalog against a live service and report with exit codes.
// Dependencies: clap, poetry-contract, serde_json, thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! `poetry-contract run` executes the contract catalog (or a selection of
//! cases) and exits `0` when every check held, `1` when the service violated
//! the contract, and `2` when the harness itself could not run a case or the
//! invocation was invalid. `list` and `url` never touch the network.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use poetry_contract::CaseDeclaration;
use poetry_contract::CaseRunner;
use poetry_contract::EndpointId;
use poetry_contract::HarnessConfig;
use poetry_contract::HarnessError;
use poetry_contract::RunReport;
use poetry_contract::SearchTerm;
use poetry_contract::UrlBuilder;
use poetry_contract::catalog;
use serde_json::json;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;

// ============================================================================
// SECTION: Exit Codes
// ============================================================================

/// Exit code when a contract check failed.
const EXIT_VIOLATION: u8 = 1;
/// Exit code for harness errors and invalid invocations.
const EXIT_HARNESS: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "poetry-contract", version, about = "PoetryDB contract-testing harness")]
struct Cli {
    /// Log verbosity on stderr (overrides `RUST_LOG`; default `warn`).
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run contract cases against the service and print the report.
    Run(RunCommand),
    /// List declared cases with their request paths.
    List(ListCommand),
    /// Print the URL the harness would request for an endpoint and term.
    Url(UrlCommand),
}

/// Connection overrides shared by commands that build URLs.
#[derive(Args, Debug, Clone, Default)]
struct ConnectionArgs {
    /// Service base address (overrides `POETRY_CONTRACT_BASE_URL`).
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Whole-request timeout in seconds (overrides `POETRY_CONTRACT_TIMEOUT_SEC`).
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Case to run; repeat to select several. Runs every case when omitted.
    #[arg(long = "case", value_name = "NAME")]
    cases: Vec<String>,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Connection overrides.
    #[command(flatten)]
    connection: ConnectionArgs,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
struct ListCommand {
    /// Listing format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `url`.
#[derive(Args, Debug)]
struct UrlCommand {
    /// Endpoint identifier, e.g. `author`.
    endpoint: String,
    /// Raw search term; encoded exactly as a contract case would encode it.
    term: String,
    /// Connection overrides.
    #[command(flatten)]
    connection: ConnectionArgs,
}

/// Output formats.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Log verbosity levels.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Per-request summaries.
    Info,
    /// URL builds and fixture lifecycle.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failures; all map to [`EXIT_HARNESS`].
#[derive(Debug, Error)]
enum CliError {
    /// Harness configuration or URL construction failed.
    #[error(transparent)]
    Harness(#[from] HarnessError),
    /// A requested case is not in the catalog.
    #[error("unknown case `{0}` (see `poetry-contract list`)")]
    UnknownCase(String),
    /// Writing output failed.
    #[error("failed to write {stream}: {error}")]
    Output {
        /// Stream name.
        stream: &'static str,
        /// Underlying I/O error.
        error: std::io::Error,
    },
    /// JSON rendering failed.
    #[error("failed to render json: {0}")]
    Render(#[from] serde_json::Error),
    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments, installs logging, and dispatches.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;
    match cli.command {
        Commands::Run(command) => command_run(&command),
        Commands::List(command) => command_list(&command),
        Commands::Url(command) => command_url(&command),
    }
}

/// Installs an fmt subscriber writing to stderr.
fn init_logging(level: Option<LogLevel>) -> CliResult<()> {
    let filter = level.map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        |level| EnvFilter::new(level.as_str()),
    );
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| CliError::Logging(err.to_string()))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `run` command.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = resolve_config(&command.connection)?;
    let cases = select_cases(&command.cases)?;
    let runner = CaseRunner::from_config(&config)?;
    let report = runner.run_all(&cases);
    match command.format {
        OutputFormat::Text => write_stdout(&report.render_text())?,
        OutputFormat::Json => write_stdout_line(&report.to_json()?)?,
    }
    Ok(ExitCode::from(exit_status(&report)))
}

/// Executes the `list` command.
fn command_list(command: &ListCommand) -> CliResult<ExitCode> {
    let cases = catalog::all();
    match command.format {
        OutputFormat::Text => write_stdout(&render_case_list(&cases))?,
        OutputFormat::Json => {
            let listing: Vec<_> = cases
                .iter()
                .map(|case| {
                    json!({
                        "name": case.name(),
                        "path": case.path(),
                        "expectation": case.expectation().as_str(),
                        "checks": case.checks().iter().map(|check| check.name()).collect::<Vec<_>>(),
                    })
                })
                .collect();
            write_stdout_line(&serde_json::to_string_pretty(&listing)?)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `url` command.
fn command_url(command: &UrlCommand) -> CliResult<ExitCode> {
    let config = resolve_config(&command.connection)?;
    let url = UrlBuilder::new(&config.base_url)?
        .build(&EndpointId::new(command.endpoint.clone()), &SearchTerm::new(command.term.clone()))?;
    write_stdout_line(url.as_str())?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads environment configuration and applies flag overrides.
fn resolve_config(connection: &ConnectionArgs) -> CliResult<HarnessConfig> {
    let mut config = HarnessConfig::load()?;
    apply_overrides(&mut config, connection);
    Ok(config)
}

/// Applies flag overrides on top of loaded configuration.
fn apply_overrides(config: &mut HarnessConfig, connection: &ConnectionArgs) {
    if let Some(base_url) = &connection.base_url {
        config.base_url = base_url.trim().to_string();
    }
    if let Some(secs) = connection.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
}

/// Resolves selected case names, keeping catalog order when none are given.
fn select_cases(names: &[String]) -> CliResult<Vec<CaseDeclaration>> {
    if names.is_empty() {
        return Ok(catalog::all());
    }
    names
        .iter()
        .map(|name| catalog::find(name).ok_or_else(|| CliError::UnknownCase(name.clone())))
        .collect()
}

/// Maps a run report to a process exit status.
fn exit_status(report: &RunReport) -> u8 {
    if report.aborted > 0 {
        EXIT_HARNESS
    } else if report.failed > 0 {
        EXIT_VIOLATION
    } else {
        0
    }
}

/// Renders the case listing as aligned text.
fn render_case_list(cases: &[CaseDeclaration]) -> String {
    let width = cases.iter().map(|case| case.name().len()).max().unwrap_or(0);
    let mut out = String::new();
    for case in cases {
        let _ = writeln!(
            out,
            "{:width$}  {:22}  {}",
            case.name(),
            case.expectation().as_str(),
            case.path()
        );
    }
    out
}

/// Writes text to stdout as-is.
fn write_stdout(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(message.as_bytes()).map_err(|error| CliError::Output {
        stream: "stdout",
        error,
    })
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|error| CliError::Output {
        stream: "stdout",
        error,
    })
}

/// Writes an error to stderr and returns the harness exit code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "error: {message}");
    ExitCode::from(EXIT_HARNESS)
}
