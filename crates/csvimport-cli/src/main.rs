#![deny(unsafe_code)]

use clap::Parser;

use csvimport_cli::cli::{Cli, Command, LogFormatArg};
use csvimport_cli::commands;
use csvimport_cli::logging::{LogConfig, LogFormat, init_logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.write_global();

    let level_filter = cli
        .log_level
        .map(level_from_arg)
        .unwrap_or_else(|| cli.verbosity.tracing_level_filter());
    let config = LogConfig::from_verbosity(0)
        .with_level_filter(level_filter)
        .with_format(format_from_arg(cli.log_format))
        .with_log_file(cli.log_file);
    init_logging(&config)?;

    match &cli.command {
        Command::Parse(args) => commands::run_parse(args),
        Command::Map(args) => commands::run_map(args),
        Command::Validate(args) => commands::run_validate(args),
        Command::Import(args) => commands::run_import(args),
    }
}

fn level_from_arg(level: csvimport_cli::cli::LogLevelArg) -> tracing::level_filters::LevelFilter {
    use csvimport_cli::cli::LogLevelArg::*;
    use tracing::level_filters::LevelFilter;
    match level {
        Error => LevelFilter::ERROR,
        Warn => LevelFilter::WARN,
        Info => LevelFilter::INFO,
        Debug => LevelFilter::DEBUG,
        Trace => LevelFilter::TRACE,
    }
}

fn format_from_arg(format: LogFormatArg) -> LogFormat {
    match format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    }
}
