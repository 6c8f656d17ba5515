pub mod area;
pub mod auth;
pub mod board;
pub mod dream;
pub mod goal;
pub mod habit;
pub mod init;
pub mod journal;
pub mod letter;
pub mod money;
pub mod plan;
pub mod progress;
pub mod settings;
pub mod template;
pub mod travel;
pub mod vision;

use anyhow::Context;
use dreamlife_core::clock::Clock;
use dreamlife_core::storage::FileStore;
use dreamlife_core::{Collection, DreamlifeError, Record, RecordId, Store};
use std::path::{Path, PathBuf};

/// Everything a command needs besides its own arguments.
pub struct Ctx {
    pub root: PathBuf,
    pub clock: Box<dyn Clock>,
    pub json: bool,
}

impl Ctx {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn store(&self) -> anyhow::Result<Store<FileStore>> {
        let backend = FileStore::open(&self.root)
            .with_context(|| format!("failed to open data dir under {}", self.root.display()))?;
        Ok(Store::new(backend))
    }

    pub fn load<R: Record>(&self, store: &Store<FileStore>) -> Collection<R> {
        store.load_records::<R>(self.clock())
    }
}

pub fn save<R: Record>(store: &mut Store<FileStore>, records: &Collection<R>) -> anyhow::Result<()> {
    store
        .save_records(records)
        .with_context(|| format!("failed to save {}", R::SLOT))
}

pub fn not_found<R: Record>(id: RecordId) -> anyhow::Error {
    DreamlifeError::RecordNotFound { kind: R::KIND, id }.into()
}

/// Shared tail of every `delete` subcommand: unknown ids are reported, not fatal.
pub fn delete<R: Record>(ctx: &Ctx, id: RecordId) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let records: Collection<R> = ctx.load(&store);
    let existed = records.contains(id);
    let next = dreamlife_core::editor::delete(&records, id);
    save(&mut store, &next)?;

    if ctx.json {
        crate::output::print_json(&serde_json::json!({ "deleted": existed, "id": id }))?;
    } else if existed {
        println!("Deleted {} {id}", R::KIND);
    } else {
        println!("No {} with id {id}; nothing to delete", R::KIND);
    }
    Ok(())
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
