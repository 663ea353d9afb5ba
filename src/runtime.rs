//! Event loop.
//!
//! One control thread owns the [`Session`]. A reader thread feeds it input
//! lines and each accepted translation runs on its own worker thread; both
//! report back through one channel, so state is only ever touched here.

use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;

use tracing::{debug, error, warn};

use crate::error::TranslationError;
use crate::model::NameTranslation;
use crate::protocol::{self, Job, Session};
use crate::services::ai::Translator;
use crate::services::history::KeyValueStore;

enum Event {
    Line(String),
    InputClosed,
    Finished {
        job: Job,
        outcome: Result<NameTranslation, TranslationError>,
    },
}

/// Runs until `input` is exhausted and the in-flight translation, if any, has
/// been applied.
pub fn run<S, R, W>(
    session: &mut Session<S>,
    translator: Arc<dyn Translator>,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead + Send + 'static,
    W: Write,
{
    let (tx, rx) = mpsc::channel();

    let reader_tx = tx.clone();
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(l) => {
                    if reader_tx.send(Event::Line(l)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to read input");
                    break;
                }
            }
        }
        let _ = reader_tx.send(Event::InputClosed);
    });

    let mut input_open = true;
    let mut in_flight = 0usize;

    while input_open || in_flight > 0 {
        // `tx` is still alive here, so this only fails if every sender is gone.
        let Ok(event) = rx.recv() else { break };

        match event {
            Event::Line(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                let reply = panic::catch_unwind(AssertUnwindSafe(|| session.handle(&line)));
                let (text, job) = match reply {
                    Ok(r) => (r.line, r.job),
                    Err(_) => {
                        error!("request handler panicked");
                        (protocol::internal_error(), None)
                    }
                };

                writeln!(output, "{text}")?;
                output.flush()?;

                if let Some(job) = job {
                    in_flight += 1;
                    spawn_worker(job, Arc::clone(&translator), tx.clone());
                }
            }
            Event::InputClosed => {
                debug!(in_flight, "input closed");
                input_open = false;
            }
            Event::Finished { job, outcome } => {
                in_flight -= 1;
                if let Some(text) = session.complete(job, outcome) {
                    writeln!(output, "{text}")?;
                    output.flush()?;
                }
            }
        }
    }

    Ok(())
}

fn spawn_worker(job: Job, translator: Arc<dyn Translator>, tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        let name = job.submission.name().to_string();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| translator.translate(&name)))
            .unwrap_or_else(|_| {
                error!(input = %name, "translator panicked");
                Err(TranslationError::new())
            });

        let _ = tx.send(Event::Finished { job, outcome });
    });
}
