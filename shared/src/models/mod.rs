pub mod activity;
pub mod course;
pub mod participation;
pub mod person;

use serde::{Deserialize, Deserializer};

/// Text fields may come back as `null` from the backend; treat that as empty.
pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
