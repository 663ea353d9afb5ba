use super::kv::KeyValueStore;
use super::list::History;
use crate::model::HistoryItem;

use std::collections::HashSet;

use tracing::{debug, warn};

/// Key the history sequence is persisted under.
pub const HISTORY_KEY: &str = "nameHistory";

/// Persists the history list. Storage failures are logged and absorbed: the
/// in-memory list stays authoritative for the session.
#[derive(Debug)]
pub struct HistoryStore<S> {
    kv: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Absent, unreadable or malformed data all yield an empty history. Items
    /// must be complete, carry unique ids and be ordered newest first.
    pub fn load(&self) -> History {
        let raw = match self.kv.get(HISTORY_KEY) {
            Ok(Some(s)) => s,
            Ok(None) => return History::new(),
            Err(e) => {
                warn!(error = %e, "failed to read history, starting empty");
                return History::new();
            }
        };

        let items: Vec<HistoryItem> = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to parse history, starting empty");
                return History::new();
            }
        };

        let items = match check_items(items) {
            Ok(v) => v,
            Err(reason) => {
                warn!(reason = %reason, "stored history is invalid, starting empty");
                return History::new();
            }
        };

        if items.len() > History::CAPACITY {
            warn!(
                stored = items.len(),
                capacity = History::CAPACITY,
                "stored history over capacity, keeping newest"
            );
        }

        let history = History::from_items(items);
        debug!(len = history.len(), "history loaded");
        history
    }

    pub fn save(&self, history: &History) {
        let json = match serde_json::to_string(history.items()) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to serialize history");
                return;
            }
        };

        if let Err(e) = self.kv.set(HISTORY_KEY, &json) {
            warn!(error = %e, "failed to persist history");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.kv.remove(HISTORY_KEY) {
            warn!(error = %e, "failed to remove persisted history");
        }
    }
}

fn check_items(items: Vec<HistoryItem>) -> Result<Vec<HistoryItem>, String> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut previous: Option<i64> = None;
    let mut checked = Vec::with_capacity(items.len());

    for mut item in items {
        item.translation = item
            .translation
            .validated()
            .map_err(|e| format!("item `{}`: {e}", item.id))?;

        if !seen.insert(item.id.clone()) {
            return Err(format!("duplicate id `{}`", item.id));
        }

        if previous.is_some_and(|newer| item.timestamp > newer) {
            return Err(format!("item `{}` is out of order", item.id));
        }
        previous = Some(item.timestamp);

        checked.push(item);
    }

    Ok(checked)
}
