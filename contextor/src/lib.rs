//! RAG gateway: context provider + answer synthesizer.
//!
//! Public API: [`ask`]. It asks a [`ContextProvider`] for up to `top_k`
//! passages, embeds them with the question into a fixed prompt template,
//! sends that prompt to a [`TextGenerator`] and returns the trimmed answer
//! together with the passages used.
//!
//! Both collaborators are passed in by the caller, so the HTTP layer can
//! share one client for the whole process and tests can substitute stubs.

mod api_types;
mod error;
pub mod prompt;
mod retrieve;
mod synthesize;

pub use ai_llm_service::TextGenerator;
pub use api_types::{AskOptions, DEFAULT_TOP_K, QaAnswer};
pub use error::ContextorError;
pub use retrieve::{CONTRACT_CLAUSES, ContextProvider, StaticContextProvider};
pub use synthesize::synthesize_answer;

use tracing::{debug, instrument};

/// Retrieve context for `question`, then synthesize an answer from it.
///
/// The two steps run sequentially; a failure in either aborts the whole call
/// and nothing partial is returned.
///
/// # Errors
/// - [`ContextorError::Retrieval`] from the provider
/// - [`ContextorError::Llm`] from the generation call
///
/// # Example
/// ```no_run
/// # use contextor::{ask, AskOptions, StaticContextProvider, TextGenerator};
/// # async fn demo(generator: &dyn TextGenerator) {
/// let provider = StaticContextProvider::default();
/// let qa = ask("When is payment due?", AskOptions { top_k: 2 }, &provider, generator)
///     .await
///     .unwrap();
/// println!("Answer: {}", qa.answer);
/// println!("Context items: {}", qa.context.len());
/// # }
/// ```
#[instrument(skip_all, fields(top_k = opts.top_k))]
pub async fn ask(
    question: &str,
    opts: AskOptions,
    provider: &dyn ContextProvider,
    generator: &dyn TextGenerator,
) -> Result<QaAnswer, ContextorError> {
    // 1) Retrieve
    let context = provider.retrieve(question, opts.top_k).await?;
    debug!(passages = context.len(), "context retrieved");

    // 2) Synthesize
    let answer = synthesize_answer(generator, question, &context).await?;

    Ok(QaAnswer { answer, context })
}
