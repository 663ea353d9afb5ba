//! Application state machine.
//!
//! Owns the view state, the input field and the history list. Translation is
//! split in two steps so the caller decides where the request runs:
//! [`StateMachine::submit`] hands out a [`Submission`] and
//! [`StateMachine::finish`] applies its outcome.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::TranslationError;
use crate::model::{HistoryItem, NameTranslation};
use crate::services::history::{id, History, HistoryStore, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    Idle,
    Loading,
    Result { data: NameTranslation },
    Error { message: String },
}

/// A translation that has been started and not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    seq: u64,
    name: String,
    original_name: String,
}

impl Submission {
    /// Trimmed name to send to the translator.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The input exactly as typed.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }
}

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub view: &'a View,
    pub history_visible: bool,
    pub input: &'a str,
    /// A translation is in flight, whatever the view shows.
    pub busy: bool,
    pub history: &'a [HistoryItem],
}

pub struct StateMachine<S> {
    view: View,
    history_visible: bool,
    input: String,
    history: History,
    store: HistoryStore<S>,
    in_flight: Option<Submission>,
    next_seq: u64,
}

impl<S: KeyValueStore> StateMachine<S> {
    /// Starts idle, with whatever history the store holds.
    pub fn new(store: HistoryStore<S>) -> Self {
        let history = store.load();
        Self {
            view: View::Idle,
            history_visible: false,
            input: String::new(),
            history,
            store,
            in_flight: None,
            next_seq: 0,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_visible(&self) -> bool {
        self.history_visible
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            view: &self.view,
            history_visible: self.history_visible,
            input: &self.input,
            busy: self.is_loading(),
            history: self.history.items(),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Sets the input to `name` and submits it.
    pub fn submit(&mut self, name: &str) -> Option<Submission> {
        if self.in_flight.is_some() {
            debug!("translation already in flight, submission ignored");
            return None;
        }
        self.set_input(name);
        self.submit_input()
    }

    /// Submits the current input. Returns `None`, changing nothing, when the
    /// input is blank or another translation is still in flight.
    pub fn submit_input(&mut self) -> Option<Submission> {
        if self.in_flight.is_some() {
            debug!("translation already in flight, submission ignored");
            return None;
        }

        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let submission = Submission {
            seq: self.next_seq,
            name: trimmed.to_string(),
            original_name: self.input.clone(),
        };
        self.next_seq += 1;

        self.view = View::Loading;
        self.history_visible = false;
        self.in_flight = Some(submission.clone());

        debug!(input = submission.name(), "translation started");
        Some(submission)
    }

    /// Applies the outcome of `submission`, stamped with the current time.
    pub fn finish(
        &mut self,
        submission: &Submission,
        outcome: Result<NameTranslation, TranslationError>,
    ) -> bool {
        self.finish_at(submission, outcome, chrono::Utc::now().timestamp_millis())
    }

    /// Applies the outcome of `submission`. Returns `false` if it is not the
    /// translation currently in flight.
    pub fn finish_at(
        &mut self,
        submission: &Submission,
        outcome: Result<NameTranslation, TranslationError>,
        now_ms: i64,
    ) -> bool {
        match &self.in_flight {
            Some(current) if current == submission => {}
            _ => {
                warn!(input = submission.name(), "outcome for unknown submission dropped");
                return false;
            }
        }
        self.in_flight = None;

        match outcome {
            Ok(data) => {
                let timestamp = self
                    .history
                    .newest()
                    .map_or(now_ms, |newest| now_ms.max(newest.timestamp));
                let item_id = id::generate(timestamp, |candidate| {
                    self.history.contains_id(candidate)
                });

                info!(
                    input = submission.original_name(),
                    hangul = %data.hangul,
                    "translation finished"
                );

                self.history.push_front(HistoryItem {
                    translation: data.clone(),
                    id: item_id,
                    original_name: submission.original_name.clone(),
                    timestamp,
                });
                self.store.save(&self.history);

                self.view = View::Result { data };
            }
            Err(e) => {
                self.view = View::Error {
                    message: e.to_string(),
                };
            }
        }

        true
    }

    pub fn toggle_history(&mut self) {
        self.history_visible = !self.history_visible;
    }

    /// Shows a past result and restores its input. History is not touched.
    pub fn select_history_item(&mut self, id: &str) -> bool {
        let Some(item) = self.history.find(id) else {
            return false;
        };

        self.input = item.original_name.clone();
        self.view = View::Result {
            data: item.translation.clone(),
        };
        self.history_visible = false;
        true
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.store.clear();
    }
}
