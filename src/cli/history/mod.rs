//! History command - inspect or clear saved explanations

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use crate::domain::HistoryEntry;

#[derive(Args, Clone)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

#[derive(Subcommand, Clone)]
pub enum HistoryCommand {
    /// Show saved explanations, newest first
    List {
        /// Show at most this many entries
        #[arg(long, short, default_value_t = 20)]
        limit: usize,
    },

    /// Remove every saved explanation
    Clear,
}

pub async fn run(args: HistoryArgs) -> anyhow::Result<()> {
    let (_, state) = super::bootstrap().await?;

    match args.command {
        HistoryCommand::List { limit } => {
            let entries = state.history.list().await?;
            if entries.is_empty() {
                println!("History is empty");
            }
            for entry in entries.iter().take(limit) {
                println!("{}", format_entry(entry));
            }
        }
        HistoryCommand::Clear => {
            state.history.clear().await?;
            println!("History cleared");
        }
    }

    Ok(())
}

fn format_entry(entry: &HistoryEntry) -> String {
    let when = DateTime::<Utc>::from_timestamp_millis(entry.timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    let preview: String = entry.explanation.chars().take(60).collect();

    format!("{}  {:<20} [{}] {}", when, entry.term, entry.model_id, preview)
}
