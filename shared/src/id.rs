use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque record identifier.
///
/// The backend assigns numbers while selector controls hand back text, so both
/// forms are kept as received and compare equal whenever their textual form
/// matches: `RecordId::from(7) == RecordId::from("7")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Id picked in a selector; the empty option means "nothing selected".
    pub fn from_choice(value: &str) -> Option<RecordId> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(RecordId::Text(value.to_string()))
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(text) => f.write_str(text),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecordId::Number(a), RecordId::Number(b)) => a == b,
            (RecordId::Text(a), RecordId::Text(b)) => a == b,
            (RecordId::Number(n), RecordId::Text(t)) | (RecordId::Text(t), RecordId::Number(n)) => {
                *t == n.to_string()
            }
        }
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(text: &str) -> Self {
        RecordId::Text(text.to_string())
    }
}

impl From<String> for RecordId {
    fn from(text: String) -> Self {
        RecordId::Text(text)
    }
}
