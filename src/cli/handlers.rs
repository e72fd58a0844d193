use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::commands::{ModelArgs, PatientArgs};
use crate::completion::{CompletionConfig, GeminiClient};
use crate::entity::{Prompt, Submission};
use crate::error::Result;
use crate::prescription::prescribe;
use crate::render::CompletionMarkup;
use crate::server::{self, AppState};

/// Load the completion config from the environment and apply CLI overrides.
fn completion_config(args: ModelArgs) -> Result<CompletionConfig> {
    let mut config = CompletionConfig::from_env()?;
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    if args.timeout_secs.is_some() {
        config = config.with_timeout(args.timeout_secs);
    }
    Ok(config)
}

fn markup(escape_completion: bool) -> CompletionMarkup {
    if escape_completion {
        CompletionMarkup::Escaped
    } else {
        CompletionMarkup::Raw
    }
}

pub fn handle_serve(
    port: u16,
    public_dir: PathBuf,
    model: ModelArgs,
    escape_completion: bool,
) -> Result<()> {
    let client = GeminiClient::new(completion_config(model)?)?;
    info!(config = ?client.config(), public_dir = %public_dir.display(), "Starting server");

    if !public_dir.is_dir() {
        tracing::warn!(
            public_dir = %public_dir.display(),
            "Public directory not found; serving the built-in form only"
        );
    }

    let state = AppState::new(Arc::new(client), public_dir).with_markup(markup(escape_completion));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(state, addr))
}

pub fn handle_prompt(patient: PatientArgs) -> Result<()> {
    let submission = Submission::from(patient);
    print!("{}", Prompt::from_submission(&submission));
    Ok(())
}

pub fn handle_generate(
    patient: PatientArgs,
    model: ModelArgs,
    output: Option<PathBuf>,
    escape_completion: bool,
) -> Result<()> {
    let config = completion_config(model)?;
    let client = GeminiClient::new(config)?;
    let submission = Submission::from(patient);

    let runtime = tokio::runtime::Runtime::new()?;
    let page = runtime.block_on(prescribe(&client, &submission, markup(escape_completion)))?;

    match output {
        Some(path) => {
            fs::write(&path, page)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", page),
    }

    Ok(())
}
