use crate::report::{run_report, ReportArgs};
use crate::statuses::{run_statuses, StatusesArgs};
use clap::{Parser, Subcommand};
use momentum_report::config::AppConfig;
use momentum_report::error::AppError;
use momentum_report::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "momentum-report",
    about = "Generate market momentum reports from MLS listing exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute momentum metrics and write the report document
    Report(ReportArgs),
    /// List every distinct status in an export with the bucket it maps to
    Statuses(StatusesArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(
        ?config.environment,
        window_days = config.report.window_days,
        "momentum report cli ready"
    );

    match cli.command {
        Command::Report(args) => run_report(args, &config.report),
        Command::Statuses(args) => run_statuses(args),
    }
}
