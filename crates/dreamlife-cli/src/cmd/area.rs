use super::{save, Ctx};
use crate::output::{print_json, print_table};
use clap::Subcommand;
use dreamlife_core::life_area::{self, LifeArea, LifeAreaPatch};
use dreamlife_core::{Collection, DreamlifeError, Record};

#[derive(Subcommand)]
pub enum AreaSubcommand {
    /// List life areas and the overall balance
    List,
    /// Update an area by id or name
    Set {
        area: String,
        #[arg(long)]
        vision: Option<String>,
        /// 1..10
        #[arg(long)]
        level: Option<u8>,
        #[arg(long)]
        plan: Option<String>,
    },
}

pub fn run(ctx: &Ctx, subcmd: AreaSubcommand) -> anyhow::Result<()> {
    match subcmd {
        AreaSubcommand::List => list(ctx),
        AreaSubcommand::Set {
            area,
            vision,
            level,
            plan,
        } => set(ctx, &area, LifeAreaPatch {
            vision,
            level,
            plan,
        }),
    }
}

fn list(ctx: &Ctx) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let areas: Collection<LifeArea> = ctx.load(&store);
    let balance = life_area::overall_balance(&areas);

    if ctx.json {
        return print_json(&serde_json::json!({
            "areas": areas,
            "balance": balance,
            "balance_percent": life_area::balance_percent(&areas),
        }));
    }
    let rows = areas
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                format!("{} {}", a.icon, a.name),
                format!("{}/10", a.current_level),
                a.improvement_plan.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "AREA", "LEVEL", "PLAN"], rows);
    println!("\nOverall balance: {balance}/10");
    Ok(())
}

fn set(ctx: &Ctx, key: &str, patch: LifeAreaPatch) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let areas: Collection<LifeArea> = ctx.load(&store);
    let id = life_area::find(&areas, key)
        .map(|a| a.id)
        .ok_or_else(|| DreamlifeError::InvalidValue {
            kind: LifeArea::KIND,
            value: key.to_string(),
        })?;
    let (next, _) = life_area::update(&areas, id, patch);
    save(&mut store, &next)?;

    let area = next.get(id).ok_or_else(|| super::not_found::<LifeArea>(id))?;
    if ctx.json {
        print_json(area)?;
    } else {
        println!(
            "{} {}: level {}/10, balance now {}/10",
            area.icon,
            area.name,
            area.current_level,
            life_area::overall_balance(&next)
        );
    }
    Ok(())
}
