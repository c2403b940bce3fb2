//! Explain command - one-shot explanation from the terminal

use clap::Args;

#[derive(Args, Clone)]
pub struct ExplainArgs {
    /// The term to explain; several words are joined with spaces
    #[arg(required = true)]
    pub term: Vec<String>,

    /// Profile id to use instead of the default
    #[arg(long, short)]
    pub model: Option<String>,

    /// Store the explanation in the history
    #[arg(long)]
    pub record: bool,
}

pub async fn run(args: ExplainArgs) -> anyhow::Result<()> {
    let (_, state) = super::bootstrap().await?;

    let term = args.term.join(" ");
    let result = state
        .explanations
        .explain(args.model.as_deref(), &term, args.record)
        .await?;

    println!("{} ({})", result.term, result.profile_display_name);
    println!();
    println!("{}", result.explanation_text);
    Ok(())
}
