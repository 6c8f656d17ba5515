use super::{yes_no, Ctx};
use crate::output::{print_fields, print_json};
use anyhow::Context;
use clap::Subcommand;
use dreamlife_core::config::{Config, WarnLevel};

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show profile and preferences
    Show,
    /// Change one setting, e.g. `preferences.theme dark`
    Set { key: String, value: String },
    /// Check the settings for mistakes
    Validate,
}

pub fn run(ctx: &Ctx, subcmd: SettingsSubcommand) -> anyhow::Result<()> {
    match subcmd {
        SettingsSubcommand::Show => show(ctx),
        SettingsSubcommand::Set { key, value } => set(ctx, &key, &value),
        SettingsSubcommand::Validate => validate(ctx),
    }
}

fn load(ctx: &Ctx) -> anyhow::Result<Config> {
    Config::load_or_default(ctx.root()).context("failed to load config")
}

fn show(ctx: &Ctx) -> anyhow::Result<()> {
    let cfg = load(ctx)?;
    if ctx.json {
        return print_json(&cfg);
    }
    print_fields(&[
        ("Name", cfg.profile.name.clone()),
        ("Email", cfg.profile.email.clone()),
        ("Theme", cfg.preferences.theme.to_string()),
        ("Notifications", yes_no(cfg.preferences.notifications).to_string()),
        ("Email updates", yes_no(cfg.preferences.email_updates).to_string()),
    ]);
    Ok(())
}

fn set(ctx: &Ctx, key: &str, value: &str) -> anyhow::Result<()> {
    let mut cfg = load(ctx)?;
    cfg.set(key, value)?;
    cfg.save(ctx.root()).context("failed to write config.yaml")?;

    if ctx.json {
        print_json(&cfg)?;
    } else {
        println!("Set {key} = {value}");
    }
    Ok(())
}

fn validate(ctx: &Ctx) -> anyhow::Result<()> {
    let cfg = load(ctx)?;
    let warnings = cfg.validate();

    if ctx.json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Settings are valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("settings validation found errors");
    }
    Ok(())
}
