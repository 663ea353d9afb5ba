//! Platform capabilities the front-end exposes for the current result.
//!
//! The state machine never calls these; they only read a result.

use crate::model::NameTranslation;

use tracing::debug;

pub const SPEECH_LANG: &str = "ko-KR";
pub const SHARE_TITLE: &str = "한글 이름 변환 결과";

pub trait Speaker {
    fn speak(&self, text: &str, lang: &str);
}

pub trait ClipboardWriter {
    fn write_text(&self, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// The platform has no share sheet; the caller copied instead.
    CopiedInstead,
    Failed(String),
}

pub trait Sharer {
    /// `None` when sharing is not available on this platform.
    fn share(&self, title: &str, text: &str) -> Option<Result<(), String>>;
}

pub fn share_text(original_name: &str, data: &NameTranslation) -> String {
    format!("{original_name} -> {}\n({})", data.hangul, data.romanization)
}

pub fn speak_result(speaker: &dyn Speaker, data: &NameTranslation) {
    speaker.speak(&data.hangul, SPEECH_LANG);
}

pub fn copy_result(clipboard: &dyn ClipboardWriter, data: &NameTranslation) {
    clipboard.write_text(&data.hangul);
}

/// Shares the result, copying the Hangul instead when sharing is unavailable.
pub fn share_result(
    sharer: &dyn Sharer,
    clipboard: &dyn ClipboardWriter,
    original_name: &str,
    data: &NameTranslation,
) -> ShareOutcome {
    match sharer.share(SHARE_TITLE, &share_text(original_name, data)) {
        Some(Ok(())) => ShareOutcome::Shared,
        Some(Err(e)) => {
            debug!(error = %e, "share failed");
            ShareOutcome::Failed(e)
        }
        None => {
            copy_result(clipboard, data);
            ShareOutcome::CopiedInstead
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        share: Option<Result<(), String>>,
    }

    impl Speaker for Recorder {
        fn speak(&self, text: &str, lang: &str) {
            self.calls.borrow_mut().push(format!("speak:{lang}:{text}"));
        }
    }

    impl ClipboardWriter for Recorder {
        fn write_text(&self, text: &str) {
            self.calls.borrow_mut().push(format!("copy:{text}"));
        }
    }

    impl Sharer for Recorder {
        fn share(&self, title: &str, text: &str) -> Option<Result<(), String>> {
            self.calls.borrow_mut().push(format!("share:{title}:{text}"));
            self.share.clone()
        }
    }

    fn michael() -> NameTranslation {
        NameTranslation {
            hangul: "마이클".into(),
            romanization: "Maikeul".into(),
            meaning: "...".into(),
            origin: "English".into(),
        }
    }

    #[test]
    fn share_text_format() {
        assert_eq!(share_text("Michael", &michael()), "Michael -> 마이클\n(Maikeul)");
    }

    #[test]
    fn speak_uses_korean_voice() {
        let r = Recorder::default();
        speak_result(&r, &michael());
        assert_eq!(r.calls.borrow().as_slice(), ["speak:ko-KR:마이클"]);
    }

    #[test]
    fn share_falls_back_to_copy() {
        let r = Recorder::default();
        let outcome = share_result(&r, &r, "Michael", &michael());
        assert_eq!(outcome, ShareOutcome::CopiedInstead);
        assert_eq!(r.calls.borrow().last().unwrap(), "copy:마이클");
    }

    #[test]
    fn share_failure_does_not_copy() {
        let r = Recorder {
            share: Some(Err("cancelled".into())),
            ..Recorder::default()
        };
        let outcome = share_result(&r, &r, "Michael", &michael());
        assert_eq!(outcome, ShareOutcome::Failed("cancelled".into()));
        assert_eq!(r.calls.borrow().len(), 1);
    }
}
