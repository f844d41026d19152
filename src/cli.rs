// src/cli.rs
use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::debug;

use crate::assistant::Assistant;
use crate::commands::Executor;
use crate::config::{ConfigStore, Settings};
use crate::llm::APIClient;
use crate::registry::CommandRegistry;
use crate::terminal::Console;

/// Full command surface: the registry commands plus `ask` and `set-api-key`,
/// which the assistant itself can never suggest.
pub fn build(registry: &CommandRegistry) -> Command {
    registry
        .clap_command()
        .version(env!("CARGO_PKG_VERSION"))
        .about("A natural-language file assistant for your terminal, powered by Gemini.")
        .subcommand(
            Command::new("set-api-key")
                .about("Save your Google Gemini API key")
                .arg(
                    Arg::new("api_key")
                        .value_name("API_KEY")
                        .help("Your Google Gemini API key")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("ask")
                .about("Ask for something in plain language")
                .arg(
                    Arg::new("query")
                        .value_name("QUERY")
                        .help("Your request in natural language")
                        .required(true)
                        .num_args(1..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true),
                ),
        )
}

pub fn join_query(matches: &ArgMatches) -> String {
    matches
        .get_many::<String>("query")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

pub async fn run(
    matches: &ArgMatches,
    registry: CommandRegistry,
    settings: &Settings,
    console: &mut Console,
) -> Result<()> {
    match matches.subcommand() {
        Some(("set-api-key", m)) => {
            let key = m
                .get_one::<String>("api_key")
                .ok_or_else(|| anyhow!("missing API key"))?;
            let store = ConfigStore::new(&settings.config_file);
            store
                .save(key)
                .with_context(|| format!("Failed to save API key to {}", store.path().display()))?;
            console.success(format!("API key saved successfully to {}", store.path().display()))?;
        }
        Some(("ask", m)) => {
            let query = join_query(m);
            debug!("ask: {}", query);

            let credential = ConfigStore::new(&settings.config_file).load()?;
            let client = APIClient::new(settings, credential)?;
            let executor = Executor::default();
            let outcome = Assistant::new(&client, registry, &executor).ask(&query, console).await?;
            debug!("ask finished: {:?}", outcome);
        }
        Some((name, m)) => {
            let invocation = registry.invocation_from(name, m)?;
            Executor::default().execute(&invocation, console)?;
        }
        None => return Err(anyhow!("no command given; try --help")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoxError;
    use crate::terminal::{ScriptedPrompter, SharedBuffer};
    use std::fs;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> Settings {
        Settings {
            llm_host: "http://127.0.0.1:9".to_string(),
            llm_model: "test-model".to_string(),
            request_timeout: None,
            config_file: dir.path().join(".voxcmd").join("config.json"),
        }
    }

    fn console_in(dir: &TempDir) -> (Console, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let console = Console::new(Box::new(buffer.clone()), Box::new(ScriptedPrompter::new([])), dir.path());
        (console, buffer)
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        build(&CommandRegistry::builtin()).debug_assert();
    }

    #[test]
    fn test_ask_joins_words_with_single_spaces() {
        let matches = build(&CommandRegistry::builtin())
            .try_get_matches_from(["voxcmd", "ask", "make", "a", "file", "--called", "x"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "ask");
        assert_eq!(join_query(sub), "make a file --called x");
    }

    #[tokio::test]
    async fn test_set_api_key_then_load() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let (mut console, buffer) = console_in(&dir);
        let registry = CommandRegistry::builtin();

        let matches = build(&registry)
            .try_get_matches_from(["voxcmd", "set-api-key", "my-key"])
            .unwrap();
        run(&matches, registry, &settings, &mut console).await.unwrap();

        assert_eq!(ConfigStore::new(&settings.config_file).load().unwrap().expose(), "my-key");
        assert!(buffer.contents().contains("API key saved successfully"));
    }

    #[tokio::test]
    async fn test_ask_without_key_is_not_configured() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let (mut console, _) = console_in(&dir);
        let registry = CommandRegistry::builtin();

        let matches = build(&registry)
            .try_get_matches_from(["voxcmd", "ask", "hello"])
            .unwrap();
        let err = run(&matches, registry, &settings, &mut console).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<VoxError>(), Some(VoxError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_registry_command_dispatch() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let (mut console, buffer) = console_in(&dir);
        let registry = CommandRegistry::builtin();

        let matches = build(&registry)
            .try_get_matches_from(["voxcmd", "create-file", "out/hello.txt", "-c", "one\\ntwo"])
            .unwrap();
        run(&matches, registry, &settings, &mut console).await.unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("out/hello.txt")).unwrap(), "one\ntwo");

        let matches = build(&registry)
            .try_get_matches_from(["voxcmd", "hello", "Ada", "--times", "2"])
            .unwrap();
        run(&matches, registry, &settings, &mut console).await.unwrap();
        assert_eq!(buffer.contents().matches("Hello, Ada!").count(), 2);
    }

    #[tokio::test]
    async fn test_view_missing_path_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let (mut console, _) = console_in(&dir);
        let registry = CommandRegistry::builtin();

        let matches = build(&registry)
            .try_get_matches_from(["voxcmd", "view", "nope.txt"])
            .unwrap();
        let err = run(&matches, registry, &settings, &mut console).await.unwrap_err();
        let vox = err.downcast_ref::<VoxError>().unwrap();
        assert!(matches!(vox, VoxError::NotFound(_)));
        assert_eq!(vox.exit_code(), 1);
    }
}
