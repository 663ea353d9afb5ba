//! Converts foreign personal names into natural Korean Hangul with a
//! generative text service and keeps a short history of past conversions.

pub mod config;
pub mod error;
pub mod model;
pub mod protocol;
pub mod runtime;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{TranslationError, TRANSLATION_FAILED_MESSAGE};
pub use model::{HistoryItem, NameTranslation};
pub use services::ai::{GeminiClient, Translator};
pub use state::{StateMachine, View};
