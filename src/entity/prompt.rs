// src/entity/prompt.rs
use std::fmt;

use super::Submission;

/// Instruction text sent to the completion model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Build the physician instruction for a submission.
    ///
    /// Field values are interpolated as-is.
    pub fn from_submission(submission: &Submission) -> Self {
        let text = format!(
            "\nYou are a certified physician. Generate a clean and realistic prescription \
             in markdown format using the following patient details:\n\
             \n\
             - Name: {}\n\
             - Age: {}\n\
             - Gender: {}\n\
             - Address: {}\n\
             - Phone: {}\n\
             - Symptoms: {}\n\
             \n\
             Do not add AI disclaimer, signature placeholder, or physician name block.\n",
            submission.name,
            submission.age,
            submission.gender,
            submission.address,
            submission.number,
            submission.disease,
        );
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Submission> for Prompt {
    fn from(submission: &Submission) -> Self {
        Self::from_submission(submission)
    }
}
