pub mod config;
pub mod error;
pub mod guidance;
pub mod telemetry;

mod cli;

use error::AppError;

/// Parses the command line and runs the selected command.
pub fn run() -> Result<(), AppError> {
    cli::run()
}
