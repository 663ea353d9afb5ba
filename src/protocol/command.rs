#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    State,
    SetInput,
    Translate,
    ToggleHistory,
    ListHistory,
    SelectHistory,
    ClearHistory,
    Samples,
    Speak,
    Copy,
    Share,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "state" => Command::State,
            "input.set" => Command::SetInput,
            "translate" => Command::Translate,
            "history.toggle" => Command::ToggleHistory,
            "history.list" => Command::ListHistory,
            "history.select" => Command::SelectHistory,
            "history.clear" => Command::ClearHistory,
            "samples" => Command::Samples,
            "result.speak" => Command::Speak,
            "result.copy" => Command::Copy,
            "result.share" => Command::Share,
            _ => Command::Unknown,
        }
    }
}
