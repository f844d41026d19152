use std::process::ExitCode;

use colored::*;
use log::debug;

use voxcmd::cli;
use voxcmd::config::Settings;
use voxcmd::registry::{CommandRegistry, BIN_NAME};
use voxcmd::terminal::Console;
use voxcmd::VoxError;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    dotenv::dotenv().ok();

    let settings = Settings::from_env();
    debug!("Using model {} at {}", settings.llm_model, settings.llm_host);

    let registry = CommandRegistry::builtin();
    let matches = cli::build(&registry).get_matches();

    let result = match Console::stdio() {
        Ok(mut console) => cli::run(&matches, registry, &settings, &mut console).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(err: &anyhow::Error) -> ExitCode {
    let vox = err.downcast_ref::<VoxError>();
    match vox {
        Some(e) if e.exit_code() == 0 => {
            eprintln!("{}", "Cancelled.".yellow());
        }
        Some(VoxError::NotConfigured) => {
            eprintln!("{}", "ERROR: Gemini API key not found.".red());
            eprintln!("Please set your key using the command:");
            eprintln!("{}", format!("  {} set-api-key YOUR_API_KEY", BIN_NAME).yellow());
        }
        _ => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
        }
    }

    let code = vox.map(VoxError::exit_code).unwrap_or(1);
    ExitCode::from(code as u8)
}
