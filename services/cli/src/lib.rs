mod cli;
mod output;
mod report;
mod statuses;

use momentum_report::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
