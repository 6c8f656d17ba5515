use super::{not_found, save, Ctx};
use crate::output::{print_json, print_table};
use chrono::NaiveDate;
use clap::Subcommand;
use dreamlife_core::editor;
use dreamlife_core::planner::{self, PlannerTask, TaskDraft};
use dreamlife_core::types::Priority;
use dreamlife_core::{Collection, RecordId};

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Tasks for one day (default today)
    List {
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// Add a task
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
        /// Goal this task works toward
        #[arg(long = "goal")]
        linked_goal: Option<String>,
    },
    /// Mark a task done or not done
    Toggle { id: RecordId },
    /// Task counts for each day of the week
    Week {
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// Delete a task
    Delete { id: RecordId },
}

pub fn run(ctx: &Ctx, subcmd: PlanSubcommand) -> anyhow::Result<()> {
    match subcmd {
        PlanSubcommand::List { date } => list(ctx, date.unwrap_or(ctx.clock().today())),
        PlanSubcommand::Add {
            title,
            priority,
            date,
            linked_goal,
        } => add(
            ctx,
            TaskDraft {
                priority,
                date,
                linked_goal: linked_goal.unwrap_or_default(),
                ..TaskDraft::new(title.join(" "))
            },
        ),
        PlanSubcommand::Toggle { id } => toggle(ctx, id),
        PlanSubcommand::Week { date } => week(ctx, date.unwrap_or(ctx.clock().today())),
        PlanSubcommand::Delete { id } => super::delete::<PlannerTask>(ctx, id),
    }
}

fn list(ctx: &Ctx, day: NaiveDate) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let tasks: Collection<PlannerTask> = ctx.load(&store);
    let shown = planner::for_day(&tasks, day);
    let stats = planner::day_stats(&tasks, day);

    if ctx.json {
        return print_json(&serde_json::json!({ "tasks": shown, "stats": stats }));
    }
    println!("Plan for {day}\n");
    if shown.is_empty() {
        println!("Nothing planned.");
    } else {
        let rows = shown
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    if t.completed { "[x]" } else { "[ ]" }.to_string(),
                    t.title.clone(),
                    t.priority.to_string(),
                    t.linked_goal.clone(),
                ]
            })
            .collect();
        print_table(&["ID", "DONE", "TASK", "PRIORITY", "GOAL"], rows);
    }
    println!(
        "\n{}/{} done ({}%), {} high priority",
        stats.completed, stats.total, stats.percent, stats.high_priority
    );
    Ok(())
}

fn add(ctx: &Ctx, draft: TaskDraft) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let tasks: Collection<PlannerTask> = ctx.load(&store);
    let (next, created) = editor::create(&tasks, draft, ctx.clock())?;
    save(&mut store, &next)?;

    if ctx.json {
        print_json(&created)?;
    } else {
        println!(
            "Planned [{}]: {} on {} ({})",
            created.id, created.title, created.date, created.priority
        );
    }
    Ok(())
}

fn toggle(ctx: &Ctx, id: RecordId) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let tasks: Collection<PlannerTask> = ctx.load(&store);
    let (next, found) = planner::toggle(&tasks, id);
    if !found {
        return Err(not_found::<PlannerTask>(id));
    }
    save(&mut store, &next)?;

    let t = next.get(id).ok_or_else(|| not_found::<PlannerTask>(id))?;
    if ctx.json {
        print_json(t)?;
    } else {
        let state = if t.completed { "done" } else { "not done" };
        println!("{}: {state}", t.title);
    }
    Ok(())
}

fn week(ctx: &Ctx, day: NaiveDate) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let tasks: Collection<PlannerTask> = ctx.load(&store);
    let days = planner::week_overview(&tasks, day);

    if ctx.json {
        return print_json(&days);
    }
    let rows = days
        .iter()
        .map(|d| {
            vec![
                d.date.format("%a %Y-%m-%d").to_string(),
                format!("{}/{}", d.completed, d.total),
                format!("{}%", d.percent),
            ]
        })
        .collect();
    print_table(&["DAY", "DONE", "%"], rows);
    Ok(())
}
