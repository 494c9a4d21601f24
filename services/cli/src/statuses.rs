use clap::Args;
use momentum_report::error::AppError;
use momentum_report::workflows::momentum::{ListingImporter, MomentumEngine, StatusTally};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct StatusesArgs {
    /// Path to the MLS CSV export
    pub(crate) csv_path: PathBuf,
    /// Emit the breakdown as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_statuses(args: StatusesArgs) -> Result<(), AppError> {
    let dataset = ListingImporter::from_path(&args.csv_path)?;
    let tallies = MomentumEngine::default().status_breakdown(&dataset);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tallies)?);
    } else {
        print!("{}", render_table(&tallies));
    }
    Ok(())
}

fn render_table(tallies: &[StatusTally]) -> String {
    let status_width = tallies
        .iter()
        .map(|tally| tally.status.chars().count())
        .chain(std::iter::once("Status".len()))
        .max()
        .unwrap_or(0);

    let mut table = format!("{:<8} {:>6}  {}\n", "Bucket", "Count", "Status");
    table.push_str(&format!("{} {}  {}\n", "-".repeat(8), "-".repeat(6), "-".repeat(status_width)));
    for tally in tallies {
        table.push_str(&format!(
            "{:<8} {:>6}  {}\n",
            tally.bucket.label(),
            tally.count,
            tally.status
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use momentum_report::workflows::momentum::StatusBucket;

    #[test]
    fn table_lists_bucket_count_and_status() {
        let tallies = vec![
            StatusTally {
                status: "Active".to_string(),
                bucket: StatusBucket::Active,
                count: 12,
            },
            StatusTally {
                status: "Active/Under Contract".to_string(),
                bucket: StatusBucket::Pending,
                count: 3,
            },
        ];

        let table = render_table(&tallies);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Bucket    Count  Status");
        assert_eq!(lines[1], format!("-------- ------  {}", "-".repeat(21)));
        assert_eq!(lines[2], "Active       12  Active");
        assert_eq!(lines[3], "Pending       3  Active/Under Contract");
    }

    #[test]
    fn empty_breakdown_still_prints_header() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 2);
    }
}
