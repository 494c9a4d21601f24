use crate::output::{default_output_dir, report_file_name, write_report};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, ValueEnum};
use momentum_report::config::ReportConfig;
use momentum_report::error::AppError;
use momentum_report::workflows::momentum::report::{render_markdown, DocumentOptions};
use momentum_report::workflows::momentum::{ListingImporter, MomentumEngine, MomentumReport};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    Markdown,
    Json,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Path to the MLS CSV export
    pub(crate) csv_path: PathBuf,
    /// Closed-sales lookback window in days (defaults to APP_WINDOW_DAYS, then 90)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) days: Option<u32>,
    /// Reference date the window counts back from (YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = crate::output::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Output document format
    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    pub(crate) format: ReportFormat,
    /// Directory for the report (defaults to APP_OUTPUT_DIR, then the CSV's directory)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// Leave the status counts chart out of the document
    #[arg(long)]
    pub(crate) no_chart: bool,
    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    pub(crate) print: bool,
}

pub(crate) fn run_report(args: ReportArgs, config: &ReportConfig) -> Result<(), AppError> {
    let reference_now = args
        .as_of
        .map(|date| date.and_time(NaiveTime::MIN))
        .unwrap_or_else(|| Local::now().naive_local());

    let report = generate(&args, config, reference_now)?;
    let contents = render(&report, args.format, !args.no_chart)?;

    if args.print {
        print!("{contents}");
        return Ok(());
    }

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| default_output_dir(&args.csv_path));
    let file_name = report_file_name(reference_now.date(), args.format.extension());
    let path = write_report(&output_dir, &file_name, &contents)?;

    info!(path = %path.display(), format = ?args.format, "momentum report saved");
    println!("Report saved: {}", path.display());
    Ok(())
}

fn generate(
    args: &ReportArgs,
    config: &ReportConfig,
    reference_now: NaiveDateTime,
) -> Result<MomentumReport, AppError> {
    let window_days = args.days.unwrap_or(config.window_days);
    let dataset = ListingImporter::from_path(&args.csv_path)?;

    info!(
        csv = %args.csv_path.display(),
        rows = dataset.len(),
        window_days,
        %reference_now,
        "generating momentum report"
    );

    Ok(MomentumEngine::default().generate(&dataset, window_days, reference_now))
}

fn render(
    report: &MomentumReport,
    format: ReportFormat,
    include_chart: bool,
) -> Result<String, AppError> {
    match format {
        ReportFormat::Markdown => Ok(render_markdown(
            report,
            &DocumentOptions { include_chart },
        )),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report.summary())?;
            json.push('\n');
            Ok(json)
        }
    }
}
