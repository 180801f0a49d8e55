// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;
mod error;
mod output;
mod plan;

use clap::{error::ErrorKind, ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use storecap_core::{ExitCode, ENV_STORECAP_LOG_JSON, ENV_STORECAP_LOG_LEVEL};
use storecap_model::{FlagLevel, RequestStatus};

use crate::commands::{ApplyArgs, Context, SettingsArgs};
use crate::error::CliError;
use crate::output::{emit_error, OutputMode};

pub const CRATE_NAME: &str = "storecap-cli";

#[derive(Parser)]
#[command(name = "storecap")]
#[command(about = "Store capacity console CLI")]
#[command(
    after_help = "Environment:\n  STORECAP_BASE_URL     Console base URL override\n  STORECAP_TIMEOUT_MS   Request timeout override\n  STORECAP_CONFIG       Config file path\n  STORECAP_LOG_LEVEL    Log filter (default: warn)\n  STORECAP_LOG_JSON     Set to 1 for JSON logs"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    Flags {
        #[command(subcommand)]
        command: FlagsCommand,
    },
    Options {
        #[command(subcommand)]
        command: OptionsCommand,
    },
    Capacity {
        #[command(subcommand)]
        command: CapacityCommand,
    },
    /// Replay an edit plan onto the current store config and submit it.
    Apply {
        #[arg(long)]
        plan: PathBuf,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Read the store config from a file instead of the backend.
        #[arg(long)]
        store_config: Option<PathBuf>,
    },
    History {
        #[arg(long, value_enum)]
        status: Option<StatusCli>,
        #[arg(long)]
        store_id: Option<u64>,
    },
    Version,
}

#[derive(Subcommand)]
enum ConfigCommand {
    Show,
}

#[derive(Subcommand)]
enum FlagsCommand {
    List {
        #[arg(long, value_enum, default_value_t = LevelCli::Root)]
        level: LevelCli,
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[derive(Subcommand)]
enum OptionsCommand {
    ThirdParty,
}

#[derive(Subcommand)]
enum CapacityCommand {
    /// Derive capPool1 from the two editable pools.
    Check {
        #[arg(long, allow_negative_numbers = true)]
        cap_pool2: i64,
        #[arg(long, allow_negative_numbers = true)]
        cap_pool3: i64,
    },
    /// Build per-day capacity settings the way the settings dialog does.
    Settings {
        #[arg(long, value_delimiter = ',', required = true)]
        days: Vec<String>,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        cap_pool2: String,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        cap_pool3: String,
        #[arg(long, allow_hyphen_values = true)]
        dumm: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LevelCli {
    Root,
    SFeature,
}

impl From<LevelCli> for FlagLevel {
    fn from(value: LevelCli) -> Self {
        match value {
            LevelCli::Root => Self::Root,
            LevelCli::SFeature => Self::SFeature,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatusCli {
    Pending,
    Completed,
}

impl From<StatusCli> for RequestStatus {
    fn from(value: StatusCli) -> Self {
        match value {
            StatusCli::Pending => Self::Pending,
            StatusCli::Completed => Self::Completed,
        }
    }
}

#[derive(Clone, Copy)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(log_flags: LogFlags) {
    let filter = if log_flags.quiet {
        EnvFilter::new("error")
    } else {
        match log_flags.verbose {
            0 => EnvFilter::try_from_env(ENV_STORECAP_LOG_LEVEL)
                .unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if env_bool(ENV_STORECAP_LOG_JSON, false) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if installed.is_err() {
        eprintln!("storecap: tracing subscriber already installed");
    }
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.code()),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code.code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                let mut usage = CliError::usage("invalid command line arguments");
                usage.machine = usage.machine.with_detail("error", &err.to_string());
                return Err(usage);
            }
        },
    };

    init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
    });

    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;
    let ctx = Context {
        output_mode: OutputMode { json: cli.json },
        base_url: cli.base_url,
    };

    match command {
        Commands::Config {
            command: ConfigCommand::Show,
        } => commands::config_show(&ctx),
        Commands::Flags {
            command: FlagsCommand::List { level, search },
        } => commands::flags_list(&ctx, level.into(), &search),
        Commands::Options {
            command: OptionsCommand::ThirdParty,
        } => commands::third_party_options(&ctx),
        Commands::Capacity { command } => match command {
            CapacityCommand::Check {
                cap_pool2,
                cap_pool3,
            } => commands::capacity_check(ctx.output_mode, cap_pool2, cap_pool3),
            CapacityCommand::Settings {
                days,
                cap_pool2,
                cap_pool3,
                dumm,
            } => commands::capacity_settings(
                ctx.output_mode,
                SettingsArgs {
                    days,
                    cap_pool2,
                    cap_pool3,
                    dumm,
                },
            ),
        },
        Commands::Apply {
            plan,
            dry_run,
            store_config,
        } => commands::apply(
            &ctx,
            ApplyArgs {
                plan,
                dry_run,
                store_config,
            },
        ),
        Commands::History { status, store_id } => {
            commands::history(&ctx, status.map(Into::into), store_id)
        }
        Commands::Version => commands::version(ctx.output_mode),
    }
}
