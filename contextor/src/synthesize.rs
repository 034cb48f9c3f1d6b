//! Answer synthesis: prompt template + one generation call.

use ai_llm_service::TextGenerator;
use tracing::{debug, instrument};

use crate::{error::ContextorError, prompt::build_prompt};

/// Generates a whitespace-trimmed answer to `question` grounded in `context`.
///
/// No retries happen here; the generator's own policy applies and any failure
/// is returned unchanged.
///
/// # Errors
/// [`ContextorError::Llm`] when the generation call fails.
#[instrument(skip_all, fields(model = %generator.model(), passages = context.len()))]
pub async fn synthesize_answer(
    generator: &dyn TextGenerator,
    question: &str,
    context: &[String],
) -> Result<String, ContextorError> {
    let prompt = build_prompt(question, context);
    debug!(prompt_len = prompt.len(), "prompt built");

    let raw = generator.generate(&prompt).await?;
    Ok(raw.trim().to_string())
}
