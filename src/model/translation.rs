use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NameTranslation {
    pub hangul: String,
    pub romanization: String,
    pub meaning: String,
    pub origin: String,
}

impl NameTranslation {
    /// Trims every field and rejects the result if any of them ends up empty.
    pub fn validated(self) -> Result<Self, ClientError> {
        let NameTranslation {
            hangul,
            romanization,
            meaning,
            origin,
        } = self;

        Ok(NameTranslation {
            hangul: required("hangul", hangul)?,
            romanization: required("romanization", romanization)?,
            meaning: required("meaning", meaning)?,
            origin: required("origin", origin)?,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, ClientError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

/// One persisted conversion. Serialized flat, in the camelCase layout the
/// front-end reads back (`originalName`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[serde(flatten)]
    pub translation: NameTranslation,

    pub id: String,

    pub original_name: String,

    pub timestamp: i64,
}
