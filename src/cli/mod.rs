mod commands;
mod handlers;

pub use commands::{Cli, Commands, ModelArgs, PatientArgs};
pub use handlers::{handle_generate, handle_prompt, handle_serve};
