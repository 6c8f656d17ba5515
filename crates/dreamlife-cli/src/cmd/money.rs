use super::{not_found, save, Ctx};
use crate::output::{bar, print_json, print_table};
use chrono::NaiveDate;
use clap::Subcommand;
use dreamlife_core::editor;
use dreamlife_core::money::{self, MoneyGoal, MoneyGoalDraft};
use dreamlife_core::{Collection, RecordId};

#[derive(Subcommand)]
pub enum MoneySubcommand {
    /// List savings goals with progress and totals
    List,
    /// Create a savings goal
    Add {
        #[arg(required = true)]
        name: Vec<String>,
        #[arg(long)]
        target: f64,
        #[arg(long, value_name = "DATE")]
        deadline: Option<NaiveDate>,
        #[arg(long)]
        emoji: Option<String>,
    },
    /// Put money toward a goal
    Save {
        id: RecordId,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// Delete a savings goal
    Delete { id: RecordId },
}

pub fn run(ctx: &Ctx, subcmd: MoneySubcommand) -> anyhow::Result<()> {
    match subcmd {
        MoneySubcommand::List => list(ctx),
        MoneySubcommand::Add {
            name,
            target,
            deadline,
            emoji,
        } => {
            let mut draft = MoneyGoalDraft {
                deadline,
                ..MoneyGoalDraft::new(name.join(" "), target, ctx.clock().today())
            };
            if let Some(emoji) = emoji {
                draft.emoji = emoji;
            }
            add(ctx, draft)
        }
        MoneySubcommand::Save { id, amount } => deposit(ctx, id, amount),
        MoneySubcommand::Delete { id } => super::delete::<MoneyGoal>(ctx, id),
    }
}

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

fn list(ctx: &Ctx) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let goals: Collection<MoneyGoal> = ctx.load(&store);
    let today = ctx.clock().today();
    let summary = money::summary(&goals);

    if ctx.json {
        let rows: Vec<_> = goals
            .iter()
            .map(|g| {
                serde_json::json!({
                    "goal": g,
                    "progress": g.progress(),
                    "days_remaining": g.days_remaining(today),
                })
            })
            .collect();
        return print_json(&serde_json::json!({ "goals": rows, "summary": summary }));
    }

    if goals.is_empty() {
        println!("No savings goals. Add one with `dreamlife money add <name> --target <amount>`.");
    } else {
        let rows = goals
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    format!("{} {}", g.emoji, g.name),
                    format!("{} / {}", money(g.saved), money(g.target)),
                    bar(g.progress()),
                    format!("{}d", g.days_remaining(today)),
                ]
            })
            .collect();
        print_table(&["ID", "GOAL", "SAVED", "PROGRESS", "LEFT"], rows);
    }
    println!(
        "\nTotal saved {} of {} ({:.0}%)",
        money(summary.total_saved),
        money(summary.total_target),
        summary.total_progress
    );
    Ok(())
}

fn add(ctx: &Ctx, draft: MoneyGoalDraft) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let goals: Collection<MoneyGoal> = ctx.load(&store);
    let (next, created) = editor::create(&goals, draft, ctx.clock())?;
    save(&mut store, &next)?;

    if ctx.json {
        print_json(&created)?;
    } else {
        println!(
            "Added savings goal [{}]: {} {} (target {}, by {})",
            created.id,
            created.emoji,
            created.name,
            money(created.target),
            created.deadline
        );
    }
    Ok(())
}

fn deposit(ctx: &Ctx, id: RecordId, amount: f64) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let goals: Collection<MoneyGoal> = ctx.load(&store);
    let (next, found) = money::add_savings(&goals, id, amount)?;
    if !found {
        return Err(not_found::<MoneyGoal>(id));
    }
    save(&mut store, &next)?;

    let g = next.get(id).ok_or_else(|| not_found::<MoneyGoal>(id))?;
    if ctx.json {
        print_json(&serde_json::json!({ "goal": g, "progress": g.progress() }))?;
    } else {
        println!(
            "{} {}: {} of {} saved {}",
            g.emoji,
            g.name,
            money(g.saved),
            money(g.target),
            bar(g.progress())
        );
    }
    Ok(())
}
