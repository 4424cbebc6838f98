use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use review_exam::commands;
use review_exam::config::{init_tracing, load_dotenv};
use review_exam::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env_file = load_dotenv();
    let cli = Cli::parse();

    init_tracing(cli.log_json);
    if let Some(path) = env_file {
        info!(path = %path.display(), "Loaded environment file");
    }

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("\n❌ Error: {}", e);

            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            1
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let name = command_name(&cli);
    commands::run(cli.command)
        .await
        .with_context(|| format!("{} failed", name))
}

fn command_name(cli: &Cli) -> &'static str {
    match cli.command {
        Command::Etl(_) => "etl",
        Command::Grade(_) => "grade",
        Command::ValidateQueries(_) => "validate-queries",
    }
}
