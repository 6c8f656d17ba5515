use super::{not_found, save, Ctx};
use crate::output::{print_json, print_table};
use clap::Subcommand;
use dreamlife_core::editor;
use dreamlife_core::travel::{self, Destination, DestinationDraft};
use dreamlife_core::types::DestinationStatus;
use dreamlife_core::{Collection, RecordId};

#[derive(Subcommand)]
pub enum TravelSubcommand {
    /// List destinations
    List {
        /// wishlist or visited
        #[arg(long)]
        status: Option<DestinationStatus>,
    },
    /// Add a destination to the wishlist
    Add {
        #[arg(required = true)]
        name: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
        /// Add it as already visited
        #[arg(long)]
        visited: bool,
    },
    /// Move a destination between wishlist and visited
    Toggle { id: RecordId },
    /// Delete a destination
    Delete { id: RecordId },
}

pub fn run(ctx: &Ctx, subcmd: TravelSubcommand) -> anyhow::Result<()> {
    match subcmd {
        TravelSubcommand::List { status } => list(ctx, status),
        TravelSubcommand::Add {
            name,
            notes,
            visited,
        } => {
            let status = if visited {
                DestinationStatus::Visited
            } else {
                DestinationStatus::Wishlist
            };
            add(
                ctx,
                DestinationDraft {
                    notes,
                    status,
                    ..DestinationDraft::new(name.join(" "))
                },
            )
        }
        TravelSubcommand::Toggle { id } => toggle(ctx, id),
        TravelSubcommand::Delete { id } => super::delete::<Destination>(ctx, id),
    }
}

fn list(ctx: &Ctx, status: Option<DestinationStatus>) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let all: Collection<Destination> = ctx.load(&store);
    let shown = travel::filter(&all, status);
    let stats = travel::stats(&all);

    if ctx.json {
        return print_json(&serde_json::json!({ "destinations": shown, "stats": stats }));
    }
    if shown.is_empty() {
        println!("No destinations. Add one with `dreamlife travel add <name>`.");
    } else {
        let rows = shown
            .iter()
            .map(|d| {
                vec![
                    d.id.to_string(),
                    d.name.clone(),
                    d.status.to_string(),
                    d.notes.clone(),
                ]
            })
            .collect();
        print_table(&["ID", "DESTINATION", "STATUS", "NOTES"], rows);
    }
    println!(
        "\nWishlist: {}  Visited: {}  Total: {}",
        stats.wishlist, stats.visited, stats.total
    );
    Ok(())
}

fn add(ctx: &Ctx, draft: DestinationDraft) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let all: Collection<Destination> = ctx.load(&store);
    let (next, created) = editor::create(&all, draft, ctx.clock())?;
    save(&mut store, &next)?;

    if ctx.json {
        print_json(&created)?;
    } else {
        println!("Added [{}]: {} ({})", created.id, created.name, created.status);
    }
    Ok(())
}

fn toggle(ctx: &Ctx, id: RecordId) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let all: Collection<Destination> = ctx.load(&store);
    let (next, found) = travel::toggle_status(&all, id);
    if !found {
        return Err(not_found::<Destination>(id));
    }
    save(&mut store, &next)?;

    let d = next.get(id).ok_or_else(|| not_found::<Destination>(id))?;
    if ctx.json {
        print_json(d)?;
    } else {
        println!("{} is now {}", d.name, d.status);
    }
    Ok(())
}
