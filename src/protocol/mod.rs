use serde_json::{json, Value};
use tracing::debug;

use crate::error::TranslationError;
use crate::model::NameTranslation;
use crate::services::actions::{self, ShareOutcome};
use crate::services::history::KeyValueStore;
use crate::state::{StateMachine, Submission, View};

mod command;
mod effects;
use command::Command;
pub use effects::{Effect, HostBridge};

/// Suggestions offered on the empty screen.
pub const SAMPLE_NAMES: [&str; 4] = ["James", "Yuki", "Isabella", "Muhammad"];

pub const TRANSLATION_FINISHED: &str = "translation.finished";

/// A translation to run off the control thread. `request_id` is echoed in the
/// completion event.
#[derive(Debug, Clone)]
pub struct Job {
    pub request_id: Value,
    pub submission: Submission,
}

#[derive(Debug)]
pub struct Reply {
    pub line: String,
    pub job: Option<Job>,
}

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

/// Answer for a request whose handler panicked.
pub fn internal_error() -> String {
    json!({
        "status": "error",
        "message": "internal core error"
    })
    .to_string()
}

/// Front-end session: turns protocol lines into state machine transitions.
pub struct Session<S> {
    state: StateMachine<S>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(state: StateMachine<S>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &StateMachine<S> {
        &self.state
    }

    pub fn handle(&mut self, input: &str) -> Reply {
        let req: Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(_) => {
                return Reply {
                    line: json!({
                        "status": "error",
                        "message": "invalid json"
                    })
                    .to_string(),
                    job: None,
                };
            }
        };

        let id = get_id(&req);
        let cmd_str = get_cmd(&req);
        let payload = get_payload(&req);

        debug!(cmd = cmd_str, "request");

        let line = match Command::from(cmd_str) {
            Command::Ping => ok(id, json!({ "message": "hangul-name core alive" })),

            Command::State => ok(id, json!(self.state.snapshot())),

            Command::SetInput => {
                let Some(text) = payload.get("text").and_then(|v| v.as_str()) else {
                    return Reply {
                        line: err(id, "payload.text is required"),
                        job: None,
                    };
                };
                self.state.set_input(text);
                ok(id, json!(self.state.snapshot()))
            }

            Command::Translate => {
                let submission = match payload.get("name").and_then(|v| v.as_str()) {
                    Some(name) => self.state.submit(name),
                    None => self.state.submit_input(),
                };

                let line = ok(
                    id.clone(),
                    json!({
                        "accepted": submission.is_some(),
                        "snapshot": self.state.snapshot()
                    }),
                );

                return Reply {
                    line,
                    job: submission.map(|submission| Job {
                        request_id: id,
                        submission,
                    }),
                };
            }

            Command::ToggleHistory => {
                self.state.toggle_history();
                ok(id, json!(self.state.snapshot()))
            }

            Command::ListHistory => ok(id, json!({ "history": self.state.history().items() })),

            Command::SelectHistory => {
                let item_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("");
                if item_id.is_empty() {
                    err(id, "payload.id is required")
                } else if self.state.select_history_item(item_id) {
                    ok(id, json!(self.state.snapshot()))
                } else {
                    err(id, "unknown history item")
                }
            }

            Command::ClearHistory => {
                self.state.clear_history();
                ok(id, json!(self.state.snapshot()))
            }

            Command::Samples => ok(id, json!({ "names": SAMPLE_NAMES })),

            cmd @ (Command::Speak | Command::Copy | Command::Share) => {
                self.act(id, cmd, payload)
            }

            Command::Unknown => err(id, "unknown command"),
        };

        Reply { line, job: None }
    }

    fn act(&self, id: Value, cmd: Command, payload: &Value) -> String {
        let View::Result { data } = self.state.view() else {
            return err(id, "no result to act on");
        };

        let share_supported = payload
            .get("share_supported")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        let bridge = HostBridge::new(share_supported);

        let mut copied_instead = false;
        match cmd {
            Command::Speak => actions::speak_result(&bridge, data),
            Command::Copy => actions::copy_result(&bridge, data),
            Command::Share => {
                let outcome = actions::share_result(&bridge, &bridge, self.state.input(), data);
                copied_instead = outcome == ShareOutcome::CopiedInstead;
            }
            _ => {}
        }

        ok(
            id,
            json!({
                "effects": bridge.into_effects(),
                "copied_instead": copied_instead
            }),
        )
    }

    /// Applies a finished job and renders the completion event. Returns `None`
    /// when the job is not the translation in flight; nothing is applied then.
    pub fn complete(
        &mut self,
        job: Job,
        outcome: Result<NameTranslation, TranslationError>,
    ) -> Option<String> {
        if !self.state.finish(&job.submission, outcome) {
            return None;
        }

        let event = json!({
            "id": job.request_id,
            "status": "ok",
            "event": TRANSLATION_FINISHED,
            "payload": self.state.snapshot()
        });
        Some(event.to_string())
    }
}
