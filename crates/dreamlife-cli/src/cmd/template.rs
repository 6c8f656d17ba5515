use super::Ctx;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use dreamlife_core::template::{self, Template, TEMPLATES};

#[derive(Subcommand)]
pub enum TemplateSubcommand {
    /// List bundled templates
    List,
    /// Preview a template's goals and habits
    Show { template: String },
    /// Add a template's goals and habits to your collections
    Apply { template: String },
}

pub fn run(ctx: &Ctx, subcmd: TemplateSubcommand) -> anyhow::Result<()> {
    match subcmd {
        TemplateSubcommand::List => list(ctx),
        TemplateSubcommand::Show { template } => show(ctx, template::find(&template)?),
        TemplateSubcommand::Apply { template } => apply(ctx, template::find(&template)?),
    }
}

fn list(ctx: &Ctx) -> anyhow::Result<()> {
    if ctx.json {
        return print_json(&TEMPLATES);
    }
    let rows = TEMPLATES
        .iter()
        .map(|t| {
            vec![
                t.slug.to_string(),
                format!("{} {}", t.icon, t.name),
                t.goals.len().to_string(),
                t.habits.len().to_string(),
            ]
        })
        .collect();
    print_table(&["KEY", "TEMPLATE", "GOALS", "HABITS"], rows);
    Ok(())
}

fn show(ctx: &Ctx, t: &Template) -> anyhow::Result<()> {
    if ctx.json {
        return print_json(t);
    }
    println!("{} {}\n{}\n", t.icon, t.name, t.description);
    println!("Goals:");
    for g in t.goals {
        println!("  - {} [{}]: {}", g.title, g.category, g.why);
    }
    println!("\nHabits:");
    for h in t.habits {
        println!("  - {} [{}]", h.name, h.category);
    }
    Ok(())
}

fn apply(ctx: &Ctx, t: &Template) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let applied = template::apply(&mut store, t, ctx.clock())
        .with_context(|| format!("failed to apply template '{}'", t.slug))?;

    if ctx.json {
        print_json(&serde_json::json!({ "template": t.slug, "added": applied }))?;
    } else {
        println!(
            "Applied {}: added {} goals and {} habits",
            t.name,
            applied.goals.len(),
            applied.habits.len()
        );
    }
    Ok(())
}
