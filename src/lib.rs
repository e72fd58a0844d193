pub mod cli;
pub mod completion;
pub mod entity;
pub mod error;
pub mod prescription;
pub mod render;
pub mod server;

pub use completion::{CompletionClient, CompletionConfig, GeminiClient};
pub use entity::{Completion, Prompt, Submission};
pub use error::{Result, RxError};
pub use prescription::prescribe;
pub use render::CompletionMarkup;
pub use server::{router, AppState};
