pub mod id;
pub mod kv;
pub mod list;
pub mod store;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use list::History;
pub use store::{HistoryStore, HISTORY_KEY};
