use super::{not_found, save, Ctx};
use crate::output::{print_json, print_table};
use clap::Subcommand;
use dreamlife_core::editor;
use dreamlife_core::types::BoardMood;
use dreamlife_core::vision::{self, BoardDraft, VisionBoard};
use dreamlife_core::{Collection, RecordId};

#[derive(Subcommand)]
pub enum BoardSubcommand {
    /// List boards, optionally for one mood
    List {
        /// career, love, travel, health or finance
        #[arg(long)]
        mood: Option<BoardMood>,
    },
    /// Create a board
    Create {
        #[arg(required = true)]
        title: Vec<String>,
        #[arg(long, default_value = "career")]
        mood: BoardMood,
    },
    /// Pin a text card to a board
    Pin {
        board: RecordId,
        #[arg(required = true)]
        content: Vec<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a card from a board
    Unpin { board: RecordId, item: u32 },
    /// Delete a board
    Delete { id: RecordId },
}

pub fn run(ctx: &Ctx, subcmd: BoardSubcommand) -> anyhow::Result<()> {
    match subcmd {
        BoardSubcommand::List { mood } => list(ctx, mood),
        BoardSubcommand::Create { title, mood } => create(
            ctx,
            BoardDraft {
                mood,
                ..BoardDraft::new(title.join(" "))
            },
        ),
        BoardSubcommand::Pin {
            board,
            content,
            color,
        } => pin(ctx, board, &content.join(" "), color.as_deref()),
        BoardSubcommand::Unpin { board, item } => unpin(ctx, board, item),
        BoardSubcommand::Delete { id } => super::delete::<VisionBoard>(ctx, id),
    }
}

fn list(ctx: &Ctx, mood: Option<BoardMood>) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let boards: Collection<VisionBoard> = ctx.load(&store);
    let shown = vision::by_mood(&boards, mood);

    if ctx.json {
        return print_json(&shown);
    }
    if shown.is_empty() {
        println!("No boards. Create one with `dreamlife board create <title>`.");
        return Ok(());
    }
    for b in shown {
        println!("[{}] {} ({})", b.id, b.title, b.mood.label());
        if b.items.is_empty() {
            println!("  (empty)");
        } else {
            let rows = b
                .items
                .iter()
                .map(|i| vec![i.id.to_string(), i.content.clone(), i.color.clone()])
                .collect();
            print_table(&["  #", "CARD", "COLOR"], rows);
        }
        println!();
    }
    Ok(())
}

fn create(ctx: &Ctx, draft: BoardDraft) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let boards: Collection<VisionBoard> = ctx.load(&store);
    let (next, created) = editor::create(&boards, draft, ctx.clock())?;
    save(&mut store, &next)?;

    if ctx.json {
        print_json(&created)?;
    } else {
        println!(
            "Created board [{}]: {} ({})",
            created.id,
            created.title,
            created.mood.label()
        );
    }
    Ok(())
}

fn pin(ctx: &Ctx, board: RecordId, content: &str, color: Option<&str>) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let boards: Collection<VisionBoard> = ctx.load(&store);
    let (next, found) = vision::add_board_item(&boards, board, content, color)?;
    if !found {
        return Err(not_found::<VisionBoard>(board));
    }
    save(&mut store, &next)?;
    print_board_result(ctx, &next, board, "Pinned to")
}

fn unpin(ctx: &Ctx, board: RecordId, item: u32) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let boards: Collection<VisionBoard> = ctx.load(&store);
    if !boards.contains(board) {
        return Err(not_found::<VisionBoard>(board));
    }
    let (next, removed) = vision::remove_board_item(&boards, board, item);
    if !removed {
        anyhow::bail!("board {board} has no card {item}");
    }
    save(&mut store, &next)?;
    print_board_result(ctx, &next, board, "Removed card from")
}

fn print_board_result(
    ctx: &Ctx,
    boards: &Collection<VisionBoard>,
    id: RecordId,
    verb: &str,
) -> anyhow::Result<()> {
    let b = boards.get(id).ok_or_else(|| not_found::<VisionBoard>(id))?;
    if ctx.json {
        print_json(b)
    } else {
        println!("{verb} {} ({} cards)", b.title, b.items.len());
        Ok(())
    }
}
