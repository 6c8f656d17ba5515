use super::Ctx;
use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use dreamlife_core::dream;

#[derive(Subcommand)]
pub enum DreamSubcommand {
    /// Show your dream statement
    Show,
    /// Set your dream statement
    Set {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Remove your dream statement
    Clear,
}

pub fn run(ctx: &Ctx, subcmd: DreamSubcommand) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    match subcmd {
        DreamSubcommand::Show => {
            let statement = dream::load(&store);
            if ctx.json {
                print_json(&serde_json::json!({ "dream": statement }))?;
            } else {
                match statement {
                    Some(s) => println!("{s}"),
                    None => println!("No dream statement yet. Set one with `dreamlife dream set`."),
                }
            }
        }
        DreamSubcommand::Set { text } => {
            let saved = dream::save(&mut store, &text.join(" "))
                .context("failed to save dream statement")?;
            if ctx.json {
                print_json(&serde_json::json!({ "dream": saved }))?;
            } else {
                println!("Dream statement saved.");
            }
        }
        DreamSubcommand::Clear => {
            let cleared = dream::clear(&mut store).context("failed to clear dream statement")?;
            if ctx.json {
                print_json(&serde_json::json!({ "cleared": cleared }))?;
            } else if cleared {
                println!("Dream statement cleared.");
            } else {
                println!("No dream statement to clear.");
            }
        }
    }
    Ok(())
}
