use super::Ctx;
use anyhow::Context;
use dreamlife_core::{config::Config, io, paths};

pub fn run(ctx: &Ctx) -> anyhow::Result<()> {
    let root = ctx.root();
    println!("Initializing dreamlife in: {}", root.display());

    for dir in [paths::DREAMLIFE_DIR, paths::SLOTS_DIR] {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    let data = Config::default()
        .to_yaml()
        .context("failed to serialize default config")?;
    if io::write_if_missing(&paths::config_path(root), data.as_bytes())
        .context("failed to write config.yaml")?
    {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    println!("\nReady. Try `dreamlife progress` or `dreamlife goal list`.");
    Ok(())
}
