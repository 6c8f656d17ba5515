use super::{save, Ctx};
use crate::output::{print_json, print_table};
use chrono::NaiveDate;
use clap::Subcommand;
use dreamlife_core::journal::{self, EntryForm, JournalEntry};
use dreamlife_core::{Collection, RecordId};

#[derive(Subcommand)]
pub enum JournalSubcommand {
    /// Show the entry for a date (default today)
    Show {
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// Save the entry for a date, replacing any earlier one
    Write {
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
        /// 0 (terrible) to 5 (amazing)
        #[arg(long, default_value_t = journal::DEFAULT_MOOD)]
        mood: u8,
        /// Something you are grateful for (repeatable)
        #[arg(long = "grateful")]
        gratitude: Vec<String>,
        /// A lesson learned (repeatable)
        #[arg(long = "lesson")]
        lessons: Vec<String>,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// All entries with their moods
    List,
    /// Delete an entry
    Delete { id: RecordId },
}

pub fn run(ctx: &Ctx, subcmd: JournalSubcommand) -> anyhow::Result<()> {
    match subcmd {
        JournalSubcommand::Show { date } => show(ctx, date.unwrap_or(ctx.clock().today())),
        JournalSubcommand::Write {
            date,
            mood,
            gratitude,
            lessons,
            text,
        } => write(
            ctx,
            EntryForm {
                text: text.join(" "),
                mood,
                gratitude,
                lessons,
                ..EntryForm::new(date.unwrap_or(ctx.clock().today()))
            },
        ),
        JournalSubcommand::List => list(ctx),
        JournalSubcommand::Delete { id } => super::delete::<JournalEntry>(ctx, id),
    }
}

fn mood(m: u8) -> String {
    format!("{} {}", journal::mood_emoji(m), journal::mood_label(m))
}

fn show(ctx: &Ctx, day: NaiveDate) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let entries: Collection<JournalEntry> = ctx.load(&store);
    let entry = journal::entry_for(&entries, day);

    if ctx.json {
        return print_json(&entry);
    }
    let Some(e) = entry else {
        println!("No entry for {day}. Write one with `dreamlife journal write`.");
        return Ok(());
    };
    println!("{day}  {}\n", mood(e.mood));
    println!("{}", e.journal_entry);
    if !e.gratitude.is_empty() {
        println!("\nGrateful for:");
        for g in &e.gratitude {
            println!("  - {g}");
        }
    }
    if !e.lessons_learned.is_empty() {
        println!("\nLessons:");
        for l in &e.lessons_learned {
            println!("  - {l}");
        }
    }
    Ok(())
}

fn write(ctx: &Ctx, form: EntryForm) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let entries: Collection<JournalEntry> = ctx.load(&store);
    let (next, entry, created) = journal::save_entry(&entries, form, ctx.clock());
    save(&mut store, &next)?;

    if ctx.json {
        print_json(&entry)?;
    } else {
        let verb = if created { "Saved" } else { "Updated" };
        println!("{verb} entry for {} ({})", entry.date, mood(entry.mood));
    }
    Ok(())
}

fn list(ctx: &Ctx) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let entries: Collection<JournalEntry> = ctx.load(&store);
    let average = journal::average_mood(&entries);

    if ctx.json {
        return print_json(&serde_json::json!({ "entries": entries, "average_mood": average }));
    }
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.date.to_string(),
                mood(e.mood),
                e.gratitude.len().to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "DATE", "MOOD", "GRATEFUL"], rows);
    match average {
        Some(m) => println!("\nAverage mood: {}", mood(m)),
        None => println!("\nNo entries yet."),
    }
    Ok(())
}
