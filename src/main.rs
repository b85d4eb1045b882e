use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use vpax_lib::commands::process_cmds::process_cmd;
use vpax_lib::commands::watch_cmds::watch_cmd;
use vpax_lib::services::config::load_config;
use vpax_lib::services::watcher::StopHandle;

#[derive(Parser)]
#[command(name = "vpax")]
#[command(about = "Extract DAX measures from VPAX archives into CSV files")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, value_name = "FILE", env = "VPAX_CONFIG", help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value = "info", help = "Console log level")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Extract every VPAX file in a folder once")]
    Process {
        #[arg(help = "Folder containing VPAX files (defaults to the current directory)")]
        path: Option<PathBuf>,
        #[arg(long, action = ArgAction::Set, default_value_t = true, help = "Re-extract even when the CSV is newer")]
        replace: bool,
    },
    #[command(about = "Watch a folder and extract VPAX files as they appear")]
    Watch {
        #[arg(help = "Folder to watch (defaults to the current directory)")]
        path: Option<PathBuf>,
        #[arg(long, action = ArgAction::Set, default_value_t = true, help = "Re-extract even when the CSV is newer")]
        replace: bool,
        #[arg(long, help = "Process files already in the folder before watching")]
        initial_scan: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    None,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => "off",
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Process { path, replace } => {
            let summary = process_cmd(path.as_deref(), config, replace)?;
            println!(
                "{} extracted ({} measures), {} failed, {} up to date",
                summary.succeeded(),
                summary.total_records(),
                summary.failed(),
                summary.skipped.len()
            );
            Ok(())
        }
        Commands::Watch {
            path,
            replace,
            initial_scan,
        } => watch_until_interrupted(path, config, replace, initial_scan),
    }
}

#[tokio::main]
async fn watch_until_interrupted(
    path: Option<PathBuf>,
    config: vpax_lib::services::config::ExtractorConfig,
    replace: bool,
    initial_scan: bool,
) -> Result<()> {
    let stop = StopHandle::new();

    let worker_stop = stop.clone();
    let mut worker = tokio::task::spawn_blocking(move || {
        watch_cmd(path.as_deref(), config, replace, initial_scan, &worker_stop)
    });

    tokio::select! {
        result = &mut worker => {
            // The loop ended on its own (bad folder or watcher shut down).
            result.context("watch task panicked")??;
            return Ok(());
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            log::info!("Ctrl-C received, shutting down watcher");
            stop.stop();
        }
    }

    worker.await.context("watch task panicked")??;
    Ok(())
}
