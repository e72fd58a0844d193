mod completion;
mod prompt;
mod submission;

pub use completion::Completion;
pub use prompt::Prompt;
pub use submission::Submission;
