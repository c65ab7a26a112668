mod cli;
mod demo;
mod output;

use support_triage::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
