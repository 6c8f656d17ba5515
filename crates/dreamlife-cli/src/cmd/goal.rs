use super::{not_found, save, Ctx};
use crate::output::{bar, print_fields, print_json, print_table};
use chrono::NaiveDate;
use clap::Subcommand;
use dreamlife_core::editor;
use dreamlife_core::goal::{self, Goal, GoalDraft, GoalPatch};
use dreamlife_core::types::GoalStatus;
use dreamlife_core::{Collection, RecordId};

#[derive(Subcommand)]
pub enum GoalSubcommand {
    /// List goals with average progress
    List {
        /// Only goals with this status (dreaming, in-progress, achieved)
        #[arg(long)]
        status: Option<GoalStatus>,
    },
    /// Add a goal
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_name = "DATE")]
        deadline: Option<NaiveDate>,
        /// Why this goal matters
        #[arg(long)]
        why: Option<String>,
        /// 0..100
        #[arg(long)]
        progress: Option<u8>,
        #[arg(long)]
        status: Option<GoalStatus>,
    },
    /// Edit goal fields
    Edit {
        id: RecordId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_name = "DATE", conflicts_with = "no_deadline")]
        deadline: Option<NaiveDate>,
        /// Remove the deadline
        #[arg(long)]
        no_deadline: bool,
        #[arg(long)]
        why: Option<String>,
        #[arg(long)]
        progress: Option<u8>,
        #[arg(long)]
        status: Option<GoalStatus>,
    },
    /// Show one goal with its milestones
    Show { id: RecordId },
    /// Delete a goal
    Delete { id: RecordId },
    /// Add a milestone to a goal
    Milestone {
        id: RecordId,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Tick or untick milestone N (1-based)
    Check { id: RecordId, index: usize },
}

pub fn run(ctx: &Ctx, subcmd: GoalSubcommand) -> anyhow::Result<()> {
    match subcmd {
        GoalSubcommand::List { status } => list(ctx, status),
        GoalSubcommand::Add {
            title,
            category,
            deadline,
            why,
            progress,
            status,
        } => {
            let defaults = GoalDraft::new(title.join(" "));
            let draft = GoalDraft {
                category: category.unwrap_or(defaults.category.clone()),
                deadline,
                why: why.unwrap_or_default(),
                progress: progress.unwrap_or(0),
                status: status.unwrap_or(defaults.status),
                ..defaults
            };
            add(ctx, draft)
        }
        GoalSubcommand::Edit {
            id,
            title,
            category,
            deadline,
            no_deadline,
            why,
            progress,
            status,
        } => {
            let deadline = if no_deadline { Some(None) } else { deadline.map(Some) };
            let patch = GoalPatch {
                title,
                category,
                deadline,
                why,
                progress,
                status,
            };
            edit(ctx, id, patch)
        }
        GoalSubcommand::Show { id } => show(ctx, id),
        GoalSubcommand::Delete { id } => super::delete::<Goal>(ctx, id),
        GoalSubcommand::Milestone { id, text } => add_milestone(ctx, id, &text.join(" ")),
        GoalSubcommand::Check { id, index } => check(ctx, id, index),
    }
}

fn list(ctx: &Ctx, status: Option<GoalStatus>) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let goals: Collection<Goal> = ctx.load(&store);
    let today = ctx.clock().today();
    let shown: Vec<&Goal> = goals
        .iter()
        .filter(|g| status.map_or(true, |s| g.status == s))
        .collect();

    if ctx.json {
        return print_json(&serde_json::json!({
            "goals": shown,
            "average_progress": goal::average_progress(&goals),
            "achieved": goal::achieved_count(&goals),
        }));
    }

    if shown.is_empty() {
        println!("No goals yet. Add one with `dreamlife goal add <title>`.");
    } else {
        let rows = shown
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.title.clone(),
                    g.category.clone(),
                    g.status.label().to_string(),
                    format!("{}%", g.progress),
                    g.days_to_deadline(today)
                        .map(|d| format!("{d}d"))
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        print_table(&["ID", "TITLE", "CATEGORY", "STATUS", "PROGRESS", "DUE"], rows);
    }
    println!(
        "\nAverage progress: {}%  Achieved: {}/{}",
        goal::average_progress(&goals),
        goal::achieved_count(&goals),
        goals.len()
    );
    Ok(())
}

fn add(ctx: &Ctx, draft: GoalDraft) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let goals: Collection<Goal> = ctx.load(&store);
    let (next, created) = editor::create(&goals, draft, ctx.clock())?;
    save(&mut store, &next)?;

    if ctx.json {
        print_json(&created)?;
    } else {
        println!("Added goal [{}]: {}", created.id, created.title);
    }
    Ok(())
}

fn edit(ctx: &Ctx, id: RecordId, patch: GoalPatch) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let goals: Collection<Goal> = ctx.load(&store);
    let (next, found) = editor::update(&goals, id, patch)?;
    if !found {
        return Err(not_found::<Goal>(id));
    }
    save(&mut store, &next)?;
    print_goal(ctx, &next, id)
}

fn show(ctx: &Ctx, id: RecordId) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let goals: Collection<Goal> = ctx.load(&store);
    print_goal(ctx, &goals, id)
}

fn add_milestone(ctx: &Ctx, id: RecordId, text: &str) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let goals: Collection<Goal> = ctx.load(&store);
    let (next, found) = goal::add_milestone(&goals, id, text)?;
    if !found {
        return Err(not_found::<Goal>(id));
    }
    save(&mut store, &next)?;
    print_goal(ctx, &next, id)
}

fn check(ctx: &Ctx, id: RecordId, index: usize) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let goals: Collection<Goal> = ctx.load(&store);
    if !goals.contains(id) {
        return Err(not_found::<Goal>(id));
    }
    let (next, found) = goal::toggle_milestone(&goals, id, index.saturating_sub(1));
    if !found {
        anyhow::bail!("goal {id} has no milestone {index}");
    }
    save(&mut store, &next)?;
    print_goal(ctx, &next, id)
}

fn print_goal(ctx: &Ctx, goals: &Collection<Goal>, id: RecordId) -> anyhow::Result<()> {
    let g = goals.get(id).ok_or_else(|| not_found::<Goal>(id))?;
    if ctx.json {
        return print_json(g);
    }

    let today = ctx.clock().today();
    print_fields(&[
        ("Goal", format!("[{}] {}", g.id, g.title)),
        ("Category", g.category.clone()),
        ("Status", g.status.label().to_string()),
        ("Progress", bar(f64::from(g.progress))),
        (
            "Deadline",
            match (g.deadline, g.days_to_deadline(today)) {
                (Some(d), Some(days)) => format!("{d} ({days} days)"),
                _ => "none".to_string(),
            },
        ),
        ("Why", g.why.clone()),
    ]);
    if !g.milestones.is_empty() {
        println!("\nMilestones ({}% done):", g.milestone_progress());
        for (i, m) in g.milestones.iter().enumerate() {
            let mark = if m.completed { "x" } else { " " };
            println!("  {}. [{mark}] {}", i + 1, m.text);
        }
    }
    Ok(())
}
