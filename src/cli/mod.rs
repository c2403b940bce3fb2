//! CLI module for Term Explainer
//!
//! Provides subcommands for:
//! - `serve`: the HTTP message router for UI surfaces
//! - `explain`: a one-shot explanation
//! - `models`: model profile management
//! - `history`: the explanation history

pub mod explain;
pub mod history;
pub mod models;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Term Explainer - plain-language explanations of AI terms
#[derive(Parser)]
#[command(name = "term-explainer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP service used by UI surfaces
    Serve,

    /// Explain a term with the default or a named model profile
    Explain(explain::ExplainArgs),

    /// Manage model profiles
    Models(models::ModelsArgs),

    /// Inspect or clear the explanation history
    History(history::HistoryArgs),
}

/// Load configuration, install logging and build the services
pub(crate) async fn bootstrap() -> anyhow::Result<(AppConfig, AppState)> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state_with_config(&config).await?;
    Ok((config, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli =
            Cli::try_parse_from(["term-explainer", "explain", "RAG", "--model", "p1"]).unwrap();
        match cli.command {
            Command::Explain(args) => {
                assert_eq!(args.term, vec!["RAG"]);
                assert_eq!(args.model.as_deref(), Some("p1"));
            }
            _ => panic!("expected explain"),
        }

        let cli = Cli::try_parse_from(["term-explainer", "models", "set-default", "p1"]).unwrap();
        assert!(matches!(cli.command, Command::Models(_)));

        let cli =
            Cli::try_parse_from(["term-explainer", "history", "list", "--limit", "5"]).unwrap();
        assert!(matches!(cli.command, Command::History(_)));
    }

    #[test]
    fn test_explain_requires_term() {
        assert!(Cli::try_parse_from(["term-explainer", "explain"]).is_err());
    }
}
