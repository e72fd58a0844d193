// src/entity/submission.rs
use serde::{Deserialize, Serialize};

/// Patient intake fields as posted by the form.
///
/// Field names follow the form inputs, so the phone number arrives as
/// `number` and the symptoms as `disease`. Nothing is validated; a field the
/// form leaves out is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub address: String,
    pub number: String,
    pub disease: String,
}

impl Submission {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// True when every field is blank.
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.age,
            &self.gender,
            &self.address,
            &self.number,
            &self.disease,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
    }
}
