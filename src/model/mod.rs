pub mod translation;

pub use translation::{HistoryItem, NameTranslation};
