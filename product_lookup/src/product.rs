use serde::{Deserialize, Serialize};
use shared_kernel::string_key;
use std::fmt::{Display, Formatter};

// Identifier exactly as typed into the input field. Never trimmed or coerced,
// so an empty value is still sent.
string_key!(ProductId);

/// The service echoes ids back either as numbers or as strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(number) => number.fmt(f),
            RecordId::Text(text) => text.fmt(f),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub origin: String,
}
