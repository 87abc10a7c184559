use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};
use wayfinder_core::{GenerationOptions, LLMProvider, TierError};

/// Run a single completion under a deadline.
///
/// One attempt only; on any error the calling tier moves to its local
/// heuristic.
///
/// # Arguments
/// * `provider` - The model collaborator
/// * `prompt` - Full prompt text, sent as one user message
/// * `options` - Sampling parameters for the call
/// * `deadline` - Upper bound on the whole request
///
/// # Returns
/// The raw reply text, or the reason the call could not be used
pub async fn generate_once(
    provider: &dyn LLMProvider,
    prompt: &str,
    options: &GenerationOptions,
    deadline: Duration,
) -> Result<String, TierError> {
    debug!(
        "Calling model {} ({} prompt chars, deadline {:?})",
        provider.model(),
        prompt.len(),
        deadline
    );

    match timeout(deadline, provider.generate(prompt, options)).await {
        Ok(Ok(reply)) => Ok(reply),
        Ok(Err(e)) => {
            warn!("Model call failed: {e:#}");
            Err(TierError::Unavailable(format!("{e:#}")))
        }
        Err(_) => {
            warn!("Model call exceeded {deadline:?}");
            Err(TierError::Timeout(deadline))
        }
    }
}
