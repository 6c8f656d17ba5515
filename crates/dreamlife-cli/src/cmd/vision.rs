use super::{save, Ctx};
use crate::output::{print_json, print_table};
use clap::Subcommand;
use dreamlife_core::editor::{self, Draft};
use dreamlife_core::vision::{ImageDraft, QuoteDraft, VisionContent, VisionItem};
use dreamlife_core::{Collection, RecordId};

#[derive(Subcommand)]
pub enum VisionSubcommand {
    /// Show every quote and image
    List,
    /// Pin a quote
    Quote {
        #[arg(required = true)]
        text: Vec<String>,
        /// Defaults to "Unknown"
        #[arg(long, default_value = "")]
        author: String,
    },
    /// Pin an image by URL
    Image { url: String },
    /// Remove an item
    Delete { id: RecordId },
}

pub fn run(ctx: &Ctx, subcmd: VisionSubcommand) -> anyhow::Result<()> {
    match subcmd {
        VisionSubcommand::List => list(ctx),
        VisionSubcommand::Quote { text, author } => add(
            ctx,
            QuoteDraft {
                content: text.join(" "),
                author,
            },
        ),
        VisionSubcommand::Image { url } => add(ctx, ImageDraft { url }),
        VisionSubcommand::Delete { id } => super::delete::<VisionItem>(ctx, id),
    }
}

fn describe(item: &VisionItem) -> (&'static str, String) {
    match &item.content {
        VisionContent::Quote { content, author } => ("quote", format!("\"{content}\" - {author}")),
        VisionContent::Image { url } => ("image", url.clone()),
    }
}

fn list(ctx: &Ctx) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let items: Collection<VisionItem> = ctx.load(&store);

    if ctx.json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("Your vision board is empty.");
        return Ok(());
    }
    let rows = items
        .iter()
        .map(|item| {
            let (kind, text) = describe(item);
            vec![item.id.to_string(), kind.to_string(), text]
        })
        .collect();
    print_table(&["ID", "KIND", "ITEM"], rows);
    Ok(())
}

fn add<D: Draft<Record = VisionItem>>(ctx: &Ctx, draft: D) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let items: Collection<VisionItem> = ctx.load(&store);
    let (next, created) = editor::create(&items, draft, ctx.clock())?;
    save(&mut store, &next)?;

    if ctx.json {
        print_json(&created)?;
    } else {
        let (kind, text) = describe(&created);
        println!("Pinned {kind} [{}]: {text}", created.id);
    }
    Ok(())
}
