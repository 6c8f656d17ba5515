use super::Ctx;
use crate::output::{bar, print_fields, print_json};
use dreamlife_core::{dream, journal, progress};

pub fn run(ctx: &Ctx) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let report = progress::report(&store, ctx.clock());
    let statement = dream::load(&store);

    if ctx.json {
        return print_json(&serde_json::json!({ "dream": statement, "report": report }));
    }

    if let Some(s) = statement {
        println!("\"{s}\"\n");
    }
    let r = &report;
    print_fields(&[
        ("Date", r.date.to_string()),
        (
            "Goals",
            format!(
                "{} ({} achieved) {}",
                r.goals.total,
                r.goals.achieved,
                bar(f64::from(r.goals.average_progress))
            ),
        ),
        (
            "Habits",
            format!(
                "{} (best streak {}) {}",
                r.habits.total,
                r.habits.longest_streak,
                bar(f64::from(r.habits.consistency))
            ),
        ),
        ("Life balance", format!("{}/10 {}", r.life_balance, bar(f64::from(r.life_balance_percent)))),
        (
            "Savings",
            format!(
                "${:.2} of ${:.2} {}",
                r.money.total_saved,
                r.money.total_target,
                bar(r.money.total_progress)
            ),
        ),
        (
            "Letters",
            format!("{} locked, {} unlocked", r.letters.locked, r.letters.unlocked),
        ),
        (
            "Travel",
            format!("{} visited, {} on the wishlist", r.travel.visited, r.travel.wishlist),
        ),
        (
            "Today",
            format!("{}/{} tasks done ({}%)", r.today.completed, r.today.total, r.today.percent),
        ),
        (
            "Mood",
            r.average_mood
                .map(|m| format!("{} {}", journal::mood_emoji(m), journal::mood_label(m)))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]);
    Ok(())
}
