use tracing::info;

use crate::completion::CompletionClient;
use crate::entity::{Prompt, Submission};
use crate::error::Result;
use crate::render::{render_prescription, CompletionMarkup};

/// Run one submission through prompt, completion and render.
///
/// Nothing is rendered unless the completion succeeds.
pub async fn prescribe(
    client: &dyn CompletionClient,
    submission: &Submission,
    markup: CompletionMarkup,
) -> Result<String> {
    let prompt = Prompt::from_submission(submission);
    let completion = client.complete(&prompt).await?;
    info!(
        model = completion.model.as_deref().unwrap_or("unknown"),
        chars = completion.text.len(),
        "Completion received"
    );
    Ok(render_prescription(&submission.name, &completion.text, markup))
}
