//! Models command - manage model profiles from the terminal

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::domain::{DomainError, ModelProfile, ProfileDraft};

#[derive(Args, Clone)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommand,
}

#[derive(Subcommand, Clone)]
pub enum ModelsCommand {
    /// List every profile
    List,

    /// List profiles that are enabled and have a credential
    Enabled,

    /// Print the profile used when none is named
    Default,

    /// Select the default profile
    SetDefault { id: String },

    /// Delete a profile
    Delete { id: String },

    /// Send a test request through a profile
    Test { id: String },

    /// Write profiles as JSON
    Export {
        /// Keep credentials in the output
        #[arg(long)]
        include_credentials: bool,

        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Add profiles from a JSON array
    Import { file: PathBuf },
}

pub async fn run(args: ModelsArgs) -> anyhow::Result<()> {
    let (_, state) = super::bootstrap().await?;
    let registry = &state.registry;

    match args.command {
        ModelsCommand::List => {
            let default_id = registry.resolve_default_id().await?;
            print_profiles(&registry.list_all().await?, default_id.as_deref());
        }
        ModelsCommand::Enabled => {
            let default_id = registry.resolve_default_id().await?;
            print_profiles(&registry.list_enabled().await?, default_id.as_deref());
        }
        ModelsCommand::Default => match registry.resolve_default_id().await? {
            Some(id) => println!("{}", id),
            None => println!("No enabled model with a credential"),
        },
        ModelsCommand::SetDefault { id } => {
            registry.set_default(&id).await?;
            println!("Default model set to {}", id);
        }
        ModelsCommand::Delete { id } => {
            registry.delete(&id).await?;
            println!("Deleted {}", id);
        }
        ModelsCommand::Test { id } => {
            let profile = registry.get_by_id(&id).await?.ok_or_else(|| {
                DomainError::profile_not_found(format!("Profile '{}' does not exist", id))
            })?;

            let outcome = state.explanations.test_profile(&profile).await;
            match outcome.error {
                None => println!("{}: connection ok", profile.display_name()),
                Some(error) => anyhow::bail!("{}: {}", profile.display_name(), error),
            }
        }
        ModelsCommand::Export {
            include_credentials,
            output,
        } => {
            let profiles = registry.export_profiles(include_credentials).await?;
            let json = serde_json::to_string_pretty(&profiles)?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported {} profiles to {}", profiles.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
        ModelsCommand::Import { file } => {
            let content = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let drafts = parse_import(&content)?;

            let report = registry.import_profiles(drafts).await?;
            println!("Imported {} profiles", report.imported);
            for error in &report.errors {
                println!("  skipped {}", error);
            }
        }
    }

    Ok(())
}

/// Accepts either a bare array or an `{ "models": [...] }` export object
fn parse_import(content: &str) -> anyhow::Result<Vec<ProfileDraft>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum ImportFile {
        List(Vec<ProfileDraft>),
        Wrapped { models: Vec<ProfileDraft> },
    }

    let parsed: ImportFile =
        serde_json::from_str(content).context("Import file must hold a JSON array of profiles")?;

    Ok(match parsed {
        ImportFile::List(drafts) | ImportFile::Wrapped { models: drafts } => drafts,
    })
}

fn print_profiles(profiles: &[ModelProfile], default_id: Option<&str>) {
    if profiles.is_empty() {
        println!("No model profiles");
        return;
    }

    for profile in profiles {
        println!("{}", format_profile_line(profile, default_id));
    }
}

fn format_profile_line(profile: &ModelProfile, default_id: Option<&str>) -> String {
    let marker = if Some(profile.id()) == default_id { "*" } else { " " };
    let state = match (profile.is_enabled(), profile.is_configured()) {
        (true, true) => "ready",
        (true, false) => "no credential",
        (false, _) => "disabled",
    };

    format!(
        "{} {:<22} {:<26} {:<28} {}",
        marker,
        profile.id(),
        profile.display_name(),
        profile.default_model_name(),
        state
    )
}
