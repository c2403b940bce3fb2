use clap::Parser;
use term_explainer::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Explain(args) => cli::explain::run(args).await,
        Command::Models(args) => cli::models::run(args).await,
        Command::History(args) => cli::history::run(args).await,
    }
}
