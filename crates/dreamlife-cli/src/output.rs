use serde::Serialize;

const BAR_WIDTH: usize = 20;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display width in characters (not bytes), so emoji and accents line up.
fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(cell: &str, w: usize) -> String {
    let fill = w.saturating_sub(width(cell));
    format!("{cell}{}", " ".repeat(fill))
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let line = |cells: Vec<String>| cells.join("  ").trim_end().to_string();

    println!(
        "{}",
        line(headers.iter().zip(&widths).map(|(h, &w)| pad(h, w)).collect())
    );
    println!("{}", line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in &rows {
        println!(
            "{}",
            line(row.iter().zip(&widths).map(|(c, &w)| pad(c, w)).collect())
        );
    }
}

/// Aligned `label: value` lines.
pub fn print_fields(fields: &[(&str, String)]) {
    let w = fields.iter().map(|(k, _)| width(k)).max().unwrap_or(0);
    for (k, v) in fields {
        println!("{}  {v}", pad(&format!("{k}:"), w + 1));
    }
}

/// `[#####-----] 50%`
pub fn bar(percent: f64) -> String {
    let p = percent.clamp(0.0, 100.0);
    let filled = ((p / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        p
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(50.0), format!("[{}{}] 50%", "#".repeat(10), "-".repeat(10)));
        assert_eq!(bar(-5.0), format!("[{}] 0%", "-".repeat(20)));
        assert_eq!(bar(250.0), format!("[{}] 100%", "#".repeat(20)));
    }

    #[test]
    fn pad_counts_chars() {
        assert_eq!(pad("é", 3), "é  ");
        assert_eq!(pad("long", 2), "long");
    }
}
