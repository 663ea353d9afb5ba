//! Error types.
//!
//! Only [`TranslationError`] ever reaches the user. Everything else is logged
//! where it happens and either collapsed into it or absorbed.

use thiserror::Error;

/// Fixed message shown for any failed conversion.
pub const TRANSLATION_FAILED_MESSAGE: &str =
    "이름을 변환하는 중에 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// Opaque failure of a name conversion. The cause is logged, never carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", TRANSLATION_FAILED_MESSAGE)]
pub struct TranslationError {
    _private: (),
}

impl TranslationError {
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        TRANSLATION_FAILED_MESSAGE
    }
}

/// Why a request to the text-generation service did not produce a usable result.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("no response text received")]
    EmptyResponse,

    #[error("response does not match the schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("field `{0}` is blank")]
    BlankField(&'static str),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("no API key configured (set HANGUL_NAME__GEMINI__API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,
}
