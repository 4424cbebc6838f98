//! Subcommand implementations.
//!
//! Each command returns the process exit status on a completed run and an
//! error when it could not run at all.

mod etl;
mod grade;
mod validate;

pub use etl::run_etl;
pub use grade::run_grade;
pub use validate::run_validate;

use crate::config::Command;
use crate::ExamError;

/// Dispatch a parsed command.
pub async fn run(command: Command) -> Result<i32, ExamError> {
    match command {
        Command::Etl(args) => run_etl(&args).await,
        Command::Grade(args) => run_grade(&args),
        Command::ValidateQueries(args) => run_validate(&args).await,
    }
}
