use serde::Serialize;
use std::cell::RefCell;

use crate::services::actions::{ClipboardWriter, Sharer, Speaker};

/// Platform action for the front-end to carry out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    Speak { text: String, lang: String },
    Copy { text: String },
    Share { title: String, text: String },
}

/// Collects effects instead of performing them; they travel back to the host
/// in the response.
#[derive(Debug)]
pub struct HostBridge {
    share_supported: bool,
    effects: RefCell<Vec<Effect>>,
}

impl HostBridge {
    pub fn new(share_supported: bool) -> Self {
        Self {
            share_supported,
            effects: RefCell::new(Vec::new()),
        }
    }

    pub fn into_effects(self) -> Vec<Effect> {
        self.effects.into_inner()
    }
}

impl Speaker for HostBridge {
    fn speak(&self, text: &str, lang: &str) {
        self.effects.borrow_mut().push(Effect::Speak {
            text: text.to_string(),
            lang: lang.to_string(),
        });
    }
}

impl ClipboardWriter for HostBridge {
    fn write_text(&self, text: &str) {
        self.effects.borrow_mut().push(Effect::Copy {
            text: text.to_string(),
        });
    }
}

impl Sharer for HostBridge {
    fn share(&self, title: &str, text: &str) -> Option<Result<(), String>> {
        if !self.share_supported {
            return None;
        }
        self.effects.borrow_mut().push(Effect::Share {
            title: title.to_string(),
            text: text.to_string(),
        });
        Some(Ok(()))
    }
}
