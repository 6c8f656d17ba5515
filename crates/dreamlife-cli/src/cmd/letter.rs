use super::{not_found, save, Ctx};
use crate::output::{print_json, print_table};
use chrono::NaiveDate;
use clap::Subcommand;
use dreamlife_core::editor;
use dreamlife_core::letter::{self, Letter, LetterDraft};
use dreamlife_core::storage::FileStore;
use dreamlife_core::{Collection, RecordId, Store};

#[derive(Subcommand)]
pub enum LetterSubcommand {
    /// List letters and their lock state
    List,
    /// Write a letter that opens on a future date
    Write {
        #[arg(long)]
        title: String,
        /// Date the letter can be opened
        #[arg(long, value_name = "DATE")]
        unlock: Option<NaiveDate>,
        #[arg(required = true)]
        content: Vec<String>,
    },
    /// Read an unlocked letter
    Read { id: RecordId },
    /// Delete a letter
    Delete { id: RecordId },
}

pub fn run(ctx: &Ctx, subcmd: LetterSubcommand) -> anyhow::Result<()> {
    match subcmd {
        LetterSubcommand::List => list(ctx),
        LetterSubcommand::Write {
            title,
            unlock,
            content,
        } => write(
            ctx,
            LetterDraft {
                title,
                content: content.join(" "),
                unlock_date: unlock,
            },
        ),
        LetterSubcommand::Read { id } => read(ctx, id),
        LetterSubcommand::Delete { id } => super::delete::<Letter>(ctx, id),
    }
}

/// Load letters and persist any that have reached their unlock date.
fn load_refreshed(ctx: &Ctx, store: &mut Store<FileStore>) -> anyhow::Result<Collection<Letter>> {
    let letters: Collection<Letter> = ctx.load(store);
    let (refreshed, unlocked) = letter::refresh_all(&letters, ctx.clock().today());
    if unlocked > 0 {
        tracing::info!(unlocked, "letters reached their unlock date");
        save(store, &refreshed)?;
    }
    Ok(refreshed)
}

fn list(ctx: &Ctx) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let letters = load_refreshed(ctx, &mut store)?;
    let today = ctx.clock().today();
    let stats = letter::stats(&letters, today);

    if ctx.json {
        let rows: Vec<_> = letters
            .iter()
            .map(|l| {
                serde_json::json!({
                    "id": l.id,
                    "title": l.title,
                    "written_on": l.written_on,
                    "unlock_date": l.unlock_date,
                    "locked": l.is_locked(today),
                    "days_until": l.days_until(today),
                    "opened_on": l.opened_on,
                })
            })
            .collect();
        return print_json(&serde_json::json!({ "letters": rows, "stats": stats }));
    }

    if letters.is_empty() {
        println!("No letters yet. Write one with `dreamlife letter write`.");
    } else {
        let rows = letters
            .iter()
            .map(|l| {
                let state = if l.is_locked(today) {
                    format!("locked, {} days left", l.days_until(today))
                } else if l.is_unread(today) {
                    "unlocked, unread".to_string()
                } else {
                    "unlocked".to_string()
                };
                vec![
                    l.id.to_string(),
                    l.title.clone(),
                    l.written_on.to_string(),
                    l.unlock_date.to_string(),
                    state,
                ]
            })
            .collect();
        print_table(&["ID", "TITLE", "WRITTEN", "OPENS", "STATE"], rows);
    }
    println!(
        "\n{} letters: {} locked, {} unlocked",
        stats.total, stats.locked, stats.unlocked
    );
    Ok(())
}

fn write(ctx: &Ctx, draft: LetterDraft) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let letters: Collection<Letter> = ctx.load(&store);
    let (next, created) = editor::create(&letters, draft, ctx.clock())?;
    save(&mut store, &next)?;

    let today = ctx.clock().today();
    if ctx.json {
        print_json(&created)?;
    } else if created.is_locked(today) {
        println!(
            "Sealed letter [{}]: {} (opens in {} days, on {})",
            created.id,
            created.title,
            created.days_until(today),
            created.unlock_date
        );
    } else {
        println!("Saved letter [{}]: {} (already open)", created.id, created.title);
    }
    Ok(())
}

fn read(ctx: &Ctx, id: RecordId) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let letters = load_refreshed(ctx, &mut store)?;
    if !letters.contains(id) {
        return Err(not_found::<Letter>(id));
    }
    let (next, opened) = letter::open(&letters, id, ctx.clock().today())?;
    save(&mut store, &next)?;

    if ctx.json {
        print_json(&opened)?;
    } else {
        println!("{}", opened.title);
        println!("Written {}, unlocked {}\n", opened.written_on, opened.unlock_date);
        println!("{}", opened.content);
    }
    Ok(())
}
