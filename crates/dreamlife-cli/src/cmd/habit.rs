use super::{not_found, save, Ctx};
use crate::output::{print_json, print_table};
use chrono::NaiveDate;
use clap::Subcommand;
use dreamlife_core::editor;
use dreamlife_core::habit::{self, Habit, HabitDraft};
use dreamlife_core::{Collection, RecordId};

const WEEKDAYS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

#[derive(Subcommand)]
pub enum HabitSubcommand {
    /// This week's grid, streaks and consistency
    List,
    /// Add a habit
    Add {
        #[arg(required = true)]
        name: Vec<String>,
        #[arg(long)]
        emoji: Option<String>,
        /// Target streak length
        #[arg(long)]
        goal_days: Option<u32>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Tick or untick a day (default today)
    Toggle {
        id: RecordId,
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// Show the recent history of one habit
    Show {
        id: RecordId,
        /// Days of history
        #[arg(long, default_value = "14")]
        days: u32,
    },
    /// Delete a habit
    Delete { id: RecordId },
}

pub fn run(ctx: &Ctx, subcmd: HabitSubcommand) -> anyhow::Result<()> {
    match subcmd {
        HabitSubcommand::List => list(ctx),
        HabitSubcommand::Add {
            name,
            emoji,
            goal_days,
            category,
        } => {
            let defaults = HabitDraft::new(name.join(" "));
            let draft = HabitDraft {
                emoji: emoji.unwrap_or(defaults.emoji.clone()),
                goal_days: goal_days.unwrap_or(defaults.goal_days),
                category: category.unwrap_or(defaults.category.clone()),
                ..defaults
            };
            add(ctx, draft)
        }
        HabitSubcommand::Toggle { id, date } => toggle(ctx, id, date),
        HabitSubcommand::Show { id, days } => show(ctx, id, days),
        HabitSubcommand::Delete { id } => super::delete::<Habit>(ctx, id),
    }
}

fn week_grid(week: &[bool; 7]) -> String {
    week.iter()
        .zip(WEEKDAYS)
        .map(|(done, day)| if *done { day.to_string() } else { ".".to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}

fn list(ctx: &Ctx) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let habits: Collection<Habit> = ctx.load(&store);
    let today = ctx.clock().today();

    if ctx.json {
        let rows: Vec<_> = habits
            .iter()
            .map(|h| {
                serde_json::json!({
                    "habit": h,
                    "week": h.weekly_progress(today),
                    "streak": h.current_streak(today),
                    "consistency": h.consistency(today),
                    "goal_completion": h.goal_completion(today),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "habits": rows,
            "consistency": habit::habit_consistency(&habits, today),
        }));
    }

    if habits.is_empty() {
        println!("No habits yet. Add one with `dreamlife habit add <name>`.");
        return Ok(());
    }
    let rows = habits
        .iter()
        .map(|h| {
            vec![
                h.id.to_string(),
                format!("{} {}", h.emoji, h.name),
                week_grid(&h.weekly_progress(today)),
                format!("{}/{}", h.current_streak(today), h.goal_days),
                format!("{}%", h.consistency(today)),
            ]
        })
        .collect();
    print_table(&["ID", "HABIT", "THIS WEEK", "STREAK", "WEEK %"], rows);
    println!(
        "\nConsistency this week: {}%",
        habit::habit_consistency(&habits, today)
    );
    Ok(())
}

fn add(ctx: &Ctx, draft: HabitDraft) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let habits: Collection<Habit> = ctx.load(&store);
    let (next, created) = editor::create(&habits, draft, ctx.clock())?;
    save(&mut store, &next)?;

    if ctx.json {
        print_json(&created)?;
    } else {
        println!("Added habit [{}]: {} {}", created.id, created.emoji, created.name);
    }
    Ok(())
}

fn toggle(ctx: &Ctx, id: RecordId, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let habits: Collection<Habit> = ctx.load(&store);
    let today = ctx.clock().today();
    let day = date.unwrap_or(today);
    let (next, found) = habit::toggle_day(&habits, id, day);
    if !found {
        return Err(not_found::<Habit>(id));
    }
    save(&mut store, &next)?;

    let h = next.get(id).ok_or_else(|| not_found::<Habit>(id))?;
    let done = h.is_done(day);
    if ctx.json {
        print_json(&serde_json::json!({
            "id": id,
            "date": day,
            "done": done,
            "streak": h.current_streak(today),
        }))?;
    } else {
        let state = if done { "done" } else { "not done" };
        println!(
            "{} {}: {day} marked {state} (streak {})",
            h.emoji,
            h.name,
            h.current_streak(today)
        );
    }
    Ok(())
}

fn show(ctx: &Ctx, id: RecordId, days: u32) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let habits: Collection<Habit> = ctx.load(&store);
    let h = habits.get(id).ok_or_else(|| not_found::<Habit>(id))?;
    let today = ctx.clock().today();
    let history = h.history(today, days);

    if ctx.json {
        return print_json(&serde_json::json!({ "habit": h, "history": history }));
    }
    println!("{} {} ({})", h.emoji, h.name, h.category);
    println!(
        "Streak {} of {} days ({}% of goal)",
        h.current_streak(today),
        h.goal_days,
        h.goal_completion(today)
    );
    let line: String = history
        .iter()
        .map(|(_, done)| if *done { '#' } else { '.' })
        .collect();
    println!("Last {days} days: {line}");
    Ok(())
}
