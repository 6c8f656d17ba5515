//! The one-line dream statement shown at the top of the dashboard.

use crate::collection::Store;
use crate::error::{require_text, Result};
use crate::paths;
use crate::storage::KeyValueStore;

pub fn load<S: KeyValueStore>(store: &Store<S>) -> Option<String> {
    store
        .load_value::<String>(paths::SLOT_DREAM_STATEMENT)
        .filter(|s| !s.trim().is_empty())
}

pub fn save<S: KeyValueStore>(store: &mut Store<S>, statement: &str) -> Result<String> {
    require_text("dream statement", statement)?;
    let statement = statement.trim().to_string();
    store.save_value(paths::SLOT_DREAM_STATEMENT, &statement)?;
    Ok(statement)
}

pub fn clear<S: KeyValueStore>(store: &mut Store<S>) -> Result<bool> {
    store.clear(paths::SLOT_DREAM_STATEMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn set_show_clear() {
        let mut store = Store::new(MemoryStore::new());
        assert_eq!(load(&store), None);
        save(&mut store, "  Live by the ocean and build things  ").unwrap();
        assert_eq!(load(&store).as_deref(), Some("Live by the ocean and build things"));
        assert!(clear(&mut store).unwrap());
        assert!(!clear(&mut store).unwrap());
        assert_eq!(load(&store), None);
    }

    #[test]
    fn blank_statement_is_refused() {
        let mut store = Store::new(MemoryStore::new());
        assert!(save(&mut store, " \t").is_err());
        assert!(store.backend().is_empty());
    }
}
